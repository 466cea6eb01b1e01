//! Timing configuration for the wizard and the live monitor.

use std::time::Duration;

/// Tunables for polling and input debouncing.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// How often every configured board is refetched (milliseconds).
    pub poll_interval_ms: u64,

    /// Quiet period after the last keystroke before searching (milliseconds).
    pub search_debounce_ms: u64,

    /// Quiet period after the last viewport change before recomputing
    /// capacity (milliseconds).
    pub resize_debounce_ms: u64,

    /// Departures requested from upstream per station.
    pub departures_per_station: usize,

    /// Maximum station suggestions shown per search.
    pub search_limit: usize,
}

impl MonitorConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        poll_interval_ms: u64,
        search_debounce_ms: u64,
        resize_debounce_ms: u64,
        departures_per_station: usize,
        search_limit: usize,
    ) -> Self {
        Self {
            poll_interval_ms,
            search_debounce_ms,
            resize_debounce_ms,
            departures_per_station,
            search_limit,
        }
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Returns the poll interval as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns the search debounce as a Duration.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Returns the resize debounce as a Duration.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 20_000,
            search_debounce_ms: 300,
            resize_debounce_ms: 50,
            departures_per_station: 40,
            search_limit: 10,
        }
    }
}
