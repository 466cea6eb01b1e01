//! Provider response DTOs.
//!
//! [`StationBoard`] and [`RawDeparture`] are the common shape every country
//! adapter produces and the `/api/board` proxy returns. It follows the
//! transport.opendata.ch station board layout, which is why the Swiss adapter
//! deserializes straight into it. Fields are `Option` throughout because
//! upstreams omit them rather than send nulls, and a partial record must still
//! render.
//!
//! The `German*` types map the db.transport.rest (HAFAS) responses.

use serde::{Deserialize, Serialize};

use crate::domain::Location;

/// A station board in the common shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoard {
    /// The station the board belongs to, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<Location>,

    /// Departures in upstream order.
    #[serde(default)]
    pub departures: Vec<RawDeparture>,
}

/// One upstream departure, loosely typed.
///
/// Line identification is split inconsistently across `category`, `number`
/// and `name` depending on the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeparture {
    /// Transport category, e.g. "S", "B", "T", "IC", "Bus".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Line number within the category, e.g. "12".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Free-form line or journey name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Timing at the board station.
    #[serde(default)]
    pub stop: RawStop,
}

/// The board station's stop within a departure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStop {
    /// Scheduled departure timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,

    /// Scheduled departure as unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_timestamp: Option<i64>,

    /// Upstream delay in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,

    /// Scheduled platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Real-time forecast, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prognosis: Option<Prognosis>,
}

/// Real-time forecast for a stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prognosis {
    /// Expected departure timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,

    /// Expected platform, when changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl RawStop {
    /// Forecast departure, if the provider sent one.
    pub fn prognosis_departure(&self) -> Option<&str> {
        self.prognosis.as_ref()?.departure.as_deref()
    }

    /// Platform to display: forecast first, then scheduled.
    pub fn effective_platform(&self) -> Option<&str> {
        self.prognosis
            .as_ref()
            .and_then(|p| p.platform.as_deref())
            .or(self.platform.as_deref())
            .filter(|p| !p.trim().is_empty())
    }
}

// ============================================================================
// transport.opendata.ch (Switzerland)
// ============================================================================

/// Response from `/v1/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct SwissLocations {
    #[serde(default)]
    pub stations: Vec<SwissLocation>,
}

/// A location entry. Addresses and POIs come back without an `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct SwissLocation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub coordinate: Option<SwissCoordinate>,
}

/// WGS84 coordinate; `x` is latitude, `y` is longitude.
#[derive(Debug, Clone, Deserialize)]
pub struct SwissCoordinate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Response from `/v1/stationboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct SwissStationBoard {
    pub station: Option<SwissLocation>,
    #[serde(default)]
    pub stationboard: Vec<RawDeparture>,
}

impl SwissLocation {
    /// Convert to a [`Location`], dropping entries without id or name.
    pub fn into_location(self) -> Option<Location> {
        let id = self.id.filter(|s| !s.is_empty())?;
        let name = self.name.filter(|s| !s.is_empty())?;
        let location = Location::new(id, name);
        match self.coordinate {
            Some(SwissCoordinate {
                x: Some(lat),
                y: Some(lon),
            }) => Some(location.with_coordinates(lat, lon)),
            _ => Some(location),
        }
    }
}

// ============================================================================
// db.transport.rest (Germany)
// ============================================================================

/// A location from `/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct GermanLocation {
    /// "stop", "station", "location" (address) or "poi"
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<GermanCoordinates>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GermanCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Response from `/stops/{id}/departures`.
///
/// Older API versions return a bare array, newer ones wrap it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GermanDepartures {
    Wrapped { departures: Vec<GermanDeparture> },
    Bare(Vec<GermanDeparture>),
}

impl GermanDepartures {
    pub fn into_vec(self) -> Vec<GermanDeparture> {
        match self {
            GermanDepartures::Wrapped { departures } => departures,
            GermanDepartures::Bare(departures) => departures,
        }
    }
}

/// A departure from db.transport.rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GermanDeparture {
    /// Expected departure (ISO 8601), null when cancelled.
    pub when: Option<String>,
    /// Scheduled departure (ISO 8601).
    pub planned_when: Option<String>,
    /// Delay in seconds.
    pub delay: Option<i64>,
    pub platform: Option<String>,
    pub planned_platform: Option<String>,
    pub direction: Option<String>,
    pub line: Option<GermanLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GermanLine {
    /// Display name, e.g. "S 1", "Bus 100", "U2".
    pub name: Option<String>,
    /// Short product name, e.g. "S", "Bus", "STR".
    pub product_name: Option<String>,
    /// Product key, e.g. "suburban", "bus", "tram".
    pub product: Option<String>,
}
