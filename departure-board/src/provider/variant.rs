//! The per-country provider capability.

use crate::domain::{Country, Location};

use super::error::ProviderError;
use super::fixture::FixtureProvider;
use super::german::GermanClient;
use super::swiss::SwissClient;
use super::types::StationBoard;

/// Queries shorter than this (in characters, after trimming) are not sent
/// upstream.
pub const MIN_QUERY_CHARS: usize = 2;

/// A country's transit data source.
///
/// Every variant offers the same two operations. Countries without an
/// upstream integration get [`CountryProvider::Unsupported`], which answers
/// with empty results.
#[derive(Debug, Clone)]
pub enum CountryProvider {
    Swiss(SwissClient),
    German(GermanClient),
    Fixture(FixtureProvider),
    Unsupported(Country),
}

impl CountryProvider {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CountryProvider::Swiss(_) => "swiss",
            CountryProvider::German(_) => "german",
            CountryProvider::Fixture(_) => "fixture",
            CountryProvider::Unsupported(_) => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CountryProvider::Unsupported(_))
    }

    /// Search stations, surfacing upstream errors.
    pub async fn try_search_stations(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Location>, ProviderError> {
        match self {
            CountryProvider::Swiss(client) => client.search(query, limit).await,
            CountryProvider::German(client) => client.search(query, limit).await,
            CountryProvider::Fixture(fixture) => Ok(fixture.search(query, limit)),
            CountryProvider::Unsupported(_) => Ok(Vec::new()),
        }
    }

    /// Fetch a station board, surfacing upstream errors.
    pub async fn try_get_station_board(
        &self,
        station_id: &str,
    ) -> Result<StationBoard, ProviderError> {
        match self {
            CountryProvider::Swiss(client) => client.station_board(station_id).await,
            CountryProvider::German(client) => client.station_board(station_id).await,
            CountryProvider::Fixture(fixture) => fixture.station_board(station_id),
            CountryProvider::Unsupported(country) => {
                Err(ProviderError::Unsupported(*country))
            }
        }
    }

    /// Search stations by name.
    ///
    /// Returns an empty list for queries shorter than two characters and on
    /// any upstream error.
    pub async fn search_stations(&self, query: &str, limit: usize) -> Vec<Location> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        match self.try_search_stations(query, limit).await {
            Ok(locations) => locations,
            Err(e) => {
                tracing::warn!(provider = self.name(), %query, error = %e, "station search failed");
                Vec::new()
            }
        }
    }
}
