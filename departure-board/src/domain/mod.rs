//! Domain types for the departure board.
//!
//! Countries, station search results, per-slot station configuration and
//! display preferences. Types validate on construction where a string form
//! crosses a boundary (country codes), so downstream code can trust them.

mod country;
mod error;
mod location;
mod preferences;
mod station;

pub use country::{Country, UnknownCountry};
pub use error::DomainError;
pub use location::Location;
pub use preferences::{Language, Theme};
pub use station::{DirectionStatus, Severity, StationConfig, StationUpdate};
