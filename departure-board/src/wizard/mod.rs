//! Configuration wizard: country, station count, station search,
//! customization, then monitoring.

mod controller;
mod error;
mod lines;
mod search;

pub use controller::{Controller, MonitorView, PreferencesUpdate};
pub use error::WizardError;
pub use lines::LineOption;
pub use search::{SearchResults, StationSearch};
