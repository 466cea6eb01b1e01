//! db.transport.rest client (Germany).
//!
//! Departures come back in the HAFAS-derived layout (`when`, `plannedWhen`,
//! a `line` object, delays in seconds) and are converted to the common
//! [`RawDeparture`] shape here.

use crate::domain::Location;

use super::error::ProviderError;
use super::http::{build_client, get_json};
use super::types::{
    GermanCoordinates, GermanDeparture, GermanDepartures, GermanLocation, Prognosis,
    RawDeparture, RawStop, StationBoard,
};

/// Default base URL for the DB transport REST API.
const DEFAULT_BASE_URL: &str = "https://v6.db.transport.rest";

/// Configuration for the German client.
#[derive(Debug, Clone)]
pub struct GermanConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Departures requested per station board
    pub board_limit: usize,
    /// Look-ahead window for departures, in minutes
    pub duration_mins: u32,
}

impl GermanConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            board_limit: 40,
            duration_mins: 120,
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

impl Default for GermanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for db.transport.rest.
#[derive(Debug, Clone)]
pub struct GermanClient {
    http: reqwest::Client,
    base_url: String,
    board_limit: usize,
    duration_mins: u32,
}

impl GermanClient {
    pub fn new(config: GermanConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            board_limit: config.board_limit,
            duration_mins: config.duration_mins,
        })
    }

    /// Search stops and stations by name.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>, ProviderError> {
        let url = format!("{}/locations", self.base_url);
        let response: Vec<GermanLocation> = get_json(
            &self.http,
            &url,
            &[
                ("query", query.to_string()),
                ("results", limit.to_string()),
                ("poi", "false".to_string()),
                ("addresses", "false".to_string()),
            ],
        )
        .await?;

        Ok(response
            .into_iter()
            .filter_map(convert_location)
            .take(limit)
            .collect())
    }

    /// Fetch upcoming departures of a stop.
    pub async fn station_board(&self, station_id: &str) -> Result<StationBoard, ProviderError> {
        let url = format!("{}/stops/{}/departures", self.base_url, station_id);
        let response: GermanDepartures = get_json(
            &self.http,
            &url,
            &[
                ("duration", self.duration_mins.to_string()),
                ("results", self.board_limit.to_string()),
            ],
        )
        .await?;

        Ok(StationBoard {
            station: None,
            departures: response
                .into_vec()
                .into_iter()
                .map(convert_departure)
                .collect(),
        })
    }
}

/// Keep stops and stations; addresses and POIs are not boardable.
fn convert_location(loc: GermanLocation) -> Option<Location> {
    if matches!(loc.kind.as_deref(), Some("location") | Some("poi")) {
        return None;
    }

    let location = Location::new(loc.id?, loc.name?);
    match loc.location {
        Some(GermanCoordinates {
            latitude: Some(lat),
            longitude: Some(lon),
        }) => Some(location.with_coordinates(lat, lon)),
        _ => Some(location),
    }
}

/// Convert one departure to the common shape.
///
/// The line name usually repeats the product ("S 1", "Bus 100"); the number
/// is whatever follows it. Names without that prefix ("U2") are kept whole.
pub(super) fn convert_departure(dep: GermanDeparture) -> RawDeparture {
    let line = dep.line.unwrap_or_default();
    let category = line.product_name.clone();
    let number = line
        .name
        .as_deref()
        .map(|name| line_number(name, category.as_deref()));

    let scheduled = dep.planned_when.or_else(|| dep.when.clone());
    let prognosis = if dep.when.is_some() || dep.platform.is_some() {
        Some(Prognosis {
            departure: dep.when,
            platform: dep.platform.clone(),
        })
    } else {
        None
    };

    RawDeparture {
        category,
        number,
        name: line.name,
        to: dep.direction,
        stop: RawStop {
            departure: scheduled,
            departure_timestamp: None,
            delay: dep.delay.map(|secs| secs / 60),
            platform: dep.planned_platform.or(dep.platform),
            prognosis,
        },
    }
}

fn line_number(name: &str, product: Option<&str>) -> String {
    let name = name.trim();
    let stripped = product.and_then(|product| {
        let (head, rest) = name.split_once(char::is_whitespace)?;
        let rest = rest.trim();
        (head.eq_ignore_ascii_case(product) && !rest.is_empty()).then_some(rest)
    });
    stripped.unwrap_or(name).to_string()
}
