//! Country → provider lookup with a shared board cache.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{BoardCache, CacheConfig};
use crate::domain::{Country, Location};

use super::error::ProviderError;
use super::fixture::FixtureProvider;
use super::german::{GermanClient, GermanConfig};
use super::swiss::{SwissClient, SwissConfig};
use super::types::StationBoard;
use super::variant::CountryProvider;

/// Configuration for the provider registry.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    pub swiss: SwissConfig,
    pub german: GermanConfig,
    /// Serve every country from this directory of `{id}.json` boards.
    pub fixture_dir: Option<PathBuf>,
    pub cache: CacheConfig,
    /// Maximum station suggestions per search.
    pub search_limit: usize,
}

impl ProvidersConfig {
    pub fn new() -> Self {
        Self {
            swiss: SwissConfig::new(),
            german: GermanConfig::new(),
            fixture_dir: None,
            cache: CacheConfig::default(),
            search_limit: 10,
        }
    }

    pub fn with_swiss(mut self, swiss: SwissConfig) -> Self {
        self.swiss = swiss;
        self
    }

    pub fn with_german(mut self, german: GermanConfig) -> Self {
        self.german = german;
        self
    }

    /// Serve fixture boards instead of live upstreams.
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// All country providers plus the board cache.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct Providers {
    swiss: SwissClient,
    german: GermanClient,
    fixture: Option<FixtureProvider>,
    cache: BoardCache,
    search_limit: usize,
}

impl Providers {
    pub fn new(config: ProvidersConfig) -> Result<Self, ProviderError> {
        let fixture = config
            .fixture_dir
            .as_ref()
            .map(FixtureProvider::load)
            .transpose()?;

        Ok(Self {
            swiss: SwissClient::new(config.swiss)?,
            german: GermanClient::new(config.german)?,
            fixture,
            cache: BoardCache::new(&config.cache),
            search_limit: config.search_limit,
        })
    }

    /// Provider for a country. A fixture directory overrides every country.
    pub fn for_country(&self, country: Country) -> CountryProvider {
        if let Some(fixture) = &self.fixture {
            return CountryProvider::Fixture(fixture.clone());
        }

        match country {
            Country::Switzerland => CountryProvider::Swiss(self.swiss.clone()),
            Country::Germany => CountryProvider::German(self.german.clone()),
            other => CountryProvider::Unsupported(other),
        }
    }

    /// Search stations in a country. Never fails; see
    /// [`CountryProvider::search_stations`].
    pub async fn search_stations(&self, country: Country, query: &str) -> Vec<Location> {
        self.for_country(country)
            .search_stations(query, self.search_limit)
            .await
    }

    /// Fetch a station board through the cache, or `None` on failure.
    pub async fn get_station_board(
        &self,
        country: Country,
        station_id: &str,
    ) -> Option<Arc<StationBoard>> {
        let provider = self.for_country(country);
        if !provider.is_supported() {
            return None;
        }

        let result = self
            .cache
            .get_or_fetch(country, station_id, provider.try_get_station_board(station_id))
            .await;

        match result {
            Ok(board) => Some(board),
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    %country,
                    station = %station_id,
                    error = %e,
                    "station board fetch failed"
                );
                None
            }
        }
    }

    pub fn cache(&self) -> &BoardCache {
        &self.cache
    }
}
