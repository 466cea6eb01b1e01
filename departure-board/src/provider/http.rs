//! Shared HTTP plumbing for provider clients.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::ProviderError;

const USER_AGENT: &str = concat!("departure-board/", env!("CARGO_PKG_VERSION"));

/// Build a client with the crate's user agent and a request timeout.
pub(super) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(http)
}

/// GET a JSON document, mapping non-2xx statuses and parse failures.
pub(super) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    let response = http.get(url).query(query).send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ProviderError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}
