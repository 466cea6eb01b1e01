//! Application state, its persistence, and session restore.

mod app;
mod error;
mod restore;
mod store;

pub use app::{AppState, MAX_STATIONS, MIN_STATIONS, Phase};
pub use error::StoreError;
pub use restore::{Restored, reconcile};
pub use store::{CORRUPT_STATE_NOTICE, Loaded, StateStore};
