//! Station search results.

use serde::{Deserialize, Serialize};

/// A station suggestion returned by a country provider's search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Provider-specific station identifier.
    pub id: String,

    /// Human-readable station name.
    pub name: String,

    /// Latitude (WGS84), when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Longitude (WGS84), when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl Location {
    /// Create a location without coordinates.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat: None,
            lon: None,
        }
    }

    /// Attach coordinates.
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_omitted_when_absent() {
        let json = serde_json::to_string(&Location::new("8503000", "Zürich HB")).unwrap();
        assert_eq!(json, r#"{"id":"8503000","name":"Zürich HB"}"#);
    }

    #[test]
    fn deserialize_with_coordinates() {
        let loc: Location =
            serde_json::from_str(r#"{"id":"1","name":"Bern","lat":46.94,"lon":7.43}"#).unwrap();
        assert_eq!(loc, Location::new("1", "Bern").with_coordinates(46.94, 7.43));
    }
}
