//! Country provider error types.

use crate::domain::Country;

/// Errors from upstream transit APIs.
///
/// These never reach the UI: the public provider operations log them and
/// degrade to empty results.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the upstream
    #[error("rate limited by upstream API")]
    RateLimited,

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Station not known to the provider
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// Country has no upstream integration
    #[error("no transit provider for {0}")]
    Unsupported(Country),

    /// Fixture directory could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
