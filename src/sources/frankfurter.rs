//! frankfurter.app integration (no API key required)
//!
//! `GET {base}/{start}..{end}?from=BASE&to=TARGET` returns an object keyed by
//! date, each holding the target rate for that day. Weekends and holidays
//! have no entry.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::http::{build_client, get, normalize_base_url};
use super::{window_start, TrendProvider};
use crate::error::{FxError, FxResult};
use crate::models::{CurrencyCode, TrendPoint};

/// Default public endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    #[serde(default)]
    rates: BTreeMap<String, HashMap<String, f64>>,
}

/// Timeseries source backed by frankfurter.app
pub struct Frankfurter {
    client: Client,
    base_url: String,
}

impl Frankfurter {
    pub fn new(base_url: &str, timeout: Duration) -> FxResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: normalize_base_url(base_url),
        })
    }

    fn timeseries_url(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> String {
        format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url, start, end, base, target
        )
    }
}

/// Turn the date-keyed map into chronological points
///
/// Dates that fail to parse or lack the target currency are skipped.
fn points_from_response(body: TimeseriesResponse, target: CurrencyCode) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = body
        .rates
        .into_iter()
        .filter_map(|(date, rates)| {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
            let rate = rates.get(target.as_str()).copied()?;
            rate.is_finite().then_some(TrendPoint { date, rate })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

impl TrendProvider for Frankfurter {
    fn name(&self) -> &'static str {
        "frankfurter"
    }

    fn trend(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
        end: NaiveDate,
    ) -> FxResult<Vec<TrendPoint>> {
        let start = window_start(end, days)?;
        let response = get(&self.client, &self.timeseries_url(base, target, start, end))?;

        let body: TimeseriesResponse = response
            .json()
            .map_err(|e| FxError::Network(format!("Invalid response from frankfurter: {}", e)))?;

        Ok(points_from_response(body, target))
    }
}
