//! Deciding which phase a restored session starts in.
//!
//! A session saved while monitoring resumes monitoring when its
//! configuration is complete. Every other saved phase is restored verbatim,
//! and an incomplete configuration is never repaired by moving the phase.

use super::app::{AppState, Phase};

/// State to start from after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub state: AppState,
    /// The board can be shown straight away.
    pub resumed_monitoring: bool,
}

/// Apply the restore rule to freshly loaded state.
pub fn reconcile(saved: AppState) -> Restored {
    let complete = saved.configuration_complete();
    let was_monitoring = saved.phase == Phase::Monitoring;

    if was_monitoring && complete {
        tracing::info!(stations = saved.stations.len(), "resuming monitoring");
        return Restored {
            state: saved,
            resumed_monitoring: true,
        };
    }

    if was_monitoring {
        tracing::warn!(
            station_count = saved.station_count,
            stations = saved.stations.len(),
            "saved monitoring session has incomplete configuration"
        );
    }

    Restored {
        state: saved,
        resumed_monitoring: false,
    }
}
