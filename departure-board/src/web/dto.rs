//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query for the location search proxy.
#[derive(Debug, Deserialize)]
pub struct LocationsQuery {
    /// Country key or two-letter code
    pub country: String,

    /// Free-text station name
    #[serde(default)]
    pub query: String,
}

/// Query for the station board proxy.
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    /// Country key or two-letter code
    pub country: String,

    /// Provider station identifier
    pub station: String,
}

/// Request to change the country.
#[derive(Debug, Deserialize)]
pub struct CountryRequest {
    pub country: String,
}

/// Request to change the number of boards.
#[derive(Debug, Deserialize)]
pub struct StationCountRequest {
    pub count: usize,
}

/// A keystroke in the station search box.
#[derive(Debug, Deserialize)]
pub struct SearchInputRequest {
    #[serde(default)]
    pub query: String,
}

/// Checkbox change for one direction of a line.
#[derive(Debug, Deserialize)]
pub struct DirectionToggleRequest {
    pub line: String,
    pub direction: String,
    pub shown: bool,
}

/// Pending user notices.
#[derive(Debug, Serialize)]
pub struct NoticesResponse {
    pub notices: Vec<String>,
}

/// Current capacity after a viewport change is recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportResponse {
    /// Capacity as of now; a debounced recompute may still be pending
    pub max_entries: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_input_defaults_to_empty() {
        let req: SearchInputRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.query, "");
    }

    #[test]
    fn locations_query_defaults_to_empty() {
        let req: LocationsQuery = serde_json::from_str(r#"{ "country": "ch" }"#).unwrap();
        assert_eq!(req.country, "ch");
        assert_eq!(req.query, "");
    }
}
