//! Domain error types.
//!
//! These errors represent invalid configuration requests. They are distinct
//! from upstream/IO errors, which are always recovered locally.

use super::UnknownCountry;

/// Domain-level errors for configuration changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Country key or code not in the supported table
    #[error(transparent)]
    UnknownCountry(#[from] UnknownCountry),

    /// Board slot index past the configured station count
    #[error("station index {index} out of range (configured: {count})")]
    StationIndexOutOfRange { index: usize, count: usize },

    /// Station count outside the supported range
    #[error("station count must be between {min} and {max}, got {count}")]
    InvalidStationCount { count: usize, min: usize, max: usize },
}
