//! exchangerate-api.com integration
//!
//! `GET {base}/latest/{FROM}` returns every rate quoted against `FROM`.
//! No API key is required for the v4 endpoint.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::http::{build_client, get, normalize_base_url};
use super::RateProvider;
use crate::error::{FxError, FxResult};
use crate::models::CurrencyCode;

/// Default public endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, f64>,
}

/// Latest-rate source backed by exchangerate-api.com
pub struct ExchangeRateApi {
    client: Client,
    base_url: String,
}

impl ExchangeRateApi {
    pub fn new(base_url: &str, timeout: Duration) -> FxResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: normalize_base_url(base_url),
        })
    }

    fn latest_url(&self, base: CurrencyCode) -> String {
        format!("{}/latest/{}", self.base_url, base)
    }
}

impl RateProvider for ExchangeRateApi {
    fn name(&self) -> &'static str {
        "exchangerate-api"
    }

    fn latest_rates(&self, base: CurrencyCode) -> FxResult<HashMap<String, f64>> {
        let response = get(&self.client, &self.latest_url(base))?;

        let body: LatestResponse = response
            .json()
            .map_err(|e| FxError::Network(format!("Invalid response from exchangerate-api: {}", e)))?;

        Ok(body.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_url() {
        let api = ExchangeRateApi::new("https://example.test/v4/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.latest_url(CurrencyCode::USD),
            "https://example.test/v4/latest/USD"
        );
    }

    #[test]
    fn test_parse_response_body() {
        let body = r#"{"base":"USD","date":"2024-03-01","time_last_updated":1709251201,
                       "rates":{"USD":1,"EUR":0.925,"INR":82.9}}"#;
        let parsed: LatestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rates["EUR"], 0.925);
        assert_eq!(parsed.rates["USD"], 1.0);
    }
}
