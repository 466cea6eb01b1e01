//! Debounced station search box.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::{Country, Location};
use crate::provider::{MIN_QUERY_CHARS, Providers};
use crate::timer::Debouncer;

/// Suggestions for the latest query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Query the suggestions answer.
    pub query: String,
    pub locations: Vec<Location>,
}

/// Search-as-you-type over a country's stations.
///
/// Each keystroke restarts the quiet period; only the last query is sent.
/// Queries too short to search clear the suggestions at once.
pub struct StationSearch {
    providers: Providers,
    debouncer: Debouncer,
    results: Arc<watch::Sender<SearchResults>>,
}

impl StationSearch {
    pub fn new(providers: Providers, delay: Duration) -> Self {
        let (results, _) = watch::channel(SearchResults::default());
        Self {
            providers,
            debouncer: Debouncer::new(delay),
            results: Arc::new(results),
        }
    }

    /// Record a keystroke.
    pub fn input(&self, country: Country, query: &str) {
        let query = query.trim().to_string();

        if query.chars().count() < MIN_QUERY_CHARS {
            self.debouncer.cancel();
            self.results.send_replace(SearchResults {
                query,
                locations: Vec::new(),
            });
            return;
        }

        let providers = self.providers.clone();
        let results = self.results.clone();
        self.debouncer.call(async move {
            let locations = providers.search_stations(country, &query).await;
            tracing::debug!(%country, %query, hits = locations.len(), "station search");
            results.send_replace(SearchResults { query, locations });
        });
    }

    /// Latest published suggestions.
    pub fn results(&self) -> SearchResults {
        self.results.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancel any pending search and clear suggestions.
    pub fn clear(&self) {
        self.debouncer.cancel();
        self.results.send_replace(SearchResults::default());
    }
}
