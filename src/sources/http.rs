//! Shared HTTP client construction

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::error::{FxError, FxResult};

/// Build a blocking client with the given connect and read timeout
pub fn build_client(timeout: Duration) -> FxResult<Client> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(concat!("fxpro/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FxError::Network(format!("Failed to create HTTP client: {}", e)))
}

/// GET a URL and fail on any non-success status
pub fn get(client: &Client, url: &str) -> FxResult<Response> {
    tracing::debug!(%url, "GET");

    let response = client
        .get(url)
        .send()
        .map_err(|e| FxError::Network(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FxError::Network(format!("API request failed: {}", status)));
    }

    Ok(response)
}

/// Trim a trailing slash so paths can be appended with `/`
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
