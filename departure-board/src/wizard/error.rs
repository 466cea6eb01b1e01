//! Wizard error types.

use crate::domain::DomainError;
use crate::state::Phase;

/// Errors from configuration requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// Invalid country, slot index or station count
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Tried to leave a step before every slot has a station
    #[error("cannot leave {phase:?}: {missing} of {count} stations not selected")]
    IncompleteConfiguration {
        phase: Phase,
        missing: usize,
        count: usize,
    },
}
