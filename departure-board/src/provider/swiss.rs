//! transport.opendata.ch client (Switzerland).
//!
//! Its station board layout is the common [`StationBoard`] shape, so
//! departures pass through unchanged.

use crate::domain::Location;

use super::error::ProviderError;
use super::http::{build_client, get_json};
use super::types::{StationBoard, SwissLocation, SwissLocations, SwissStationBoard};

/// Default base URL for the Swiss public transport API.
const DEFAULT_BASE_URL: &str = "https://transport.opendata.ch/v1";

/// Configuration for the Swiss client.
#[derive(Debug, Clone)]
pub struct SwissConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Departures requested per station board
    pub board_limit: usize,
}

impl SwissConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            board_limit: 40,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of departures requested per board.
    pub fn with_board_limit(mut self, n: usize) -> Self {
        self.board_limit = n;
        self
    }
}

impl Default for SwissConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for transport.opendata.ch.
#[derive(Debug, Clone)]
pub struct SwissClient {
    http: reqwest::Client,
    base_url: String,
    board_limit: usize,
}

impl SwissClient {
    pub fn new(config: SwissConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            board_limit: config.board_limit,
        })
    }

    /// Search stations by name.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>, ProviderError> {
        let url = format!("{}/locations", self.base_url);
        let response: SwissLocations = get_json(
            &self.http,
            &url,
            &[("query", query.to_string()), ("type", "station".to_string())],
        )
        .await?;

        Ok(response
            .stations
            .into_iter()
            .filter_map(SwissLocation::into_location)
            .take(limit)
            .collect())
    }

    /// Fetch the departure board of a station.
    pub async fn station_board(&self, station_id: &str) -> Result<StationBoard, ProviderError> {
        let url = format!("{}/stationboard", self.base_url);
        let response: SwissStationBoard = get_json(
            &self.http,
            &url,
            &[
                ("id", station_id.to_string()),
                ("limit", self.board_limit.to_string()),
            ],
        )
        .await?;

        Ok(StationBoard {
            station: response.station.and_then(SwissLocation::into_location),
            departures: response.stationboard,
        })
    }
}
