//! Live departure monitoring.
//!
//! - [`Poller`] refreshes every configured board on a fixed interval and
//!   publishes a [`BoardSnapshot`]
//! - [`ViewportTracker`] turns viewport and theme changes into a debounced
//!   row capacity

mod poller;
mod snapshot;
mod viewport;

pub use poller::{MonitorHandle, PollTarget, Poller};
pub use snapshot::{BoardSnapshot, SnapshotCell, StationBoardView};
pub use viewport::{CapacityInputs, ViewportTracker};
