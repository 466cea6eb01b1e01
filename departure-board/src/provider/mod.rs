//! Country transit providers.
//!
//! Each supported country adapts a distinct upstream API into one common
//! shape:
//! - Switzerland: transport.opendata.ch, already in the common shape
//! - Germany: db.transport.rest, converted from its HAFAS-style departures
//! - Any other country: an explicit unsupported variant with empty results
//!
//! A fixture directory can stand in for every country during development.

mod error;
mod fixture;
mod german;
mod http;
mod registry;
mod swiss;
mod types;
mod variant;

pub use error::ProviderError;
pub use fixture::FixtureProvider;
pub use german::{GermanClient, GermanConfig};
pub use registry::{Providers, ProvidersConfig};
pub use swiss::{SwissClient, SwissConfig};
pub use types::{Prognosis, RawDeparture, RawStop, StationBoard};
pub use variant::{CountryProvider, MIN_QUERY_CHARS};
