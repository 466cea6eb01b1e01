//! In-memory cache of the last fetched station boards.
//!
//! Boards are keyed by (country, station id) and live for roughly one poll
//! interval, so the monitor, the customization step and the `/api/board`
//! proxy share one upstream request per station per cycle. Concurrent misses
//! for the same key are coalesced into a single load; failed loads are not
//! cached.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Country;
use crate::provider::{ProviderError, StationBoard};

/// Cache key for station boards: (country, station id).
type BoardKey = (Country, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_capacity: 256,
        }
    }
}

/// Cache for station boards.
#[derive(Clone)]
pub struct BoardCache {
    boards: MokaCache<BoardKey, Arc<StationBoard>>,
}

impl BoardCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let boards = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { boards }
    }

    /// Return the cached board, or run `load` and cache its result.
    pub async fn get_or_fetch<F>(
        &self,
        country: Country,
        station_id: &str,
        load: F,
    ) -> Result<Arc<StationBoard>, Arc<ProviderError>>
    where
        F: Future<Output = Result<StationBoard, ProviderError>>,
    {
        let key = (country, station_id.to_string());
        self.boards
            .try_get_with(key, async { load.await.map(Arc::new) })
            .await
    }

    /// Get a cached board without loading.
    pub async fn get(&self, country: Country, station_id: &str) -> Option<Arc<StationBoard>> {
        self.boards.get(&(country, station_id.to_string())).await
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.boards.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.boards.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn board(n: usize) -> StationBoard {
        StationBoard {
            station: None,
            departures: vec![Default::default(); n],
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(15));
        assert_eq!(config.max_capacity, 256);

        let config = config.with_ttl(Duration::from_secs(20));
        assert_eq!(config.ttl, Duration::from_secs(20));
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let cache = BoardCache::new(&CacheConfig::default());
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = cache
                .get_or_fetch(Country::Switzerland, "8503000", async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(board(2))
                })
                .await
                .unwrap();
            assert_eq!(got.departures.len(), 2);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(cache.get(Country::Switzerland, "8503000").await.is_some());
    }

    #[tokio::test]
    async fn key_includes_country() {
        let cache = BoardCache::new(&CacheConfig::default());
        cache
            .get_or_fetch(Country::Switzerland, "1", async { Ok(board(1)) })
            .await
            .unwrap();

        assert!(cache.get(Country::Germany, "1").await.is_none());
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = BoardCache::new(&CacheConfig::default());

        let err = cache
            .get_or_fetch(Country::Germany, "8000261", async {
                Err(ProviderError::RateLimited)
            })
            .await;
        assert!(err.is_err());

        let ok = cache
            .get_or_fetch(Country::Germany, "8000261", async { Ok(board(4)) })
            .await
            .unwrap();
        assert_eq!(ok.departures.len(), 4);
    }
}
