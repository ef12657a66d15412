//! Exchange rates and where they came from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;
use super::currency::CurrencyCode;
use crate::error::FxError;

/// Origin of a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Fetched from a remote API
    Live,
    /// Taken from the built-in mock rate table
    Mock,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Mock => "mock",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateSource {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            other => Err(FxError::Validation(format!("Unknown rate source '{}'", other))),
        }
    }
}

/// The price of one unit of `from` expressed in `to`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
    pub source: RateSource,
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Create a rate stamped with the current time
    pub fn new(from: CurrencyCode, to: CurrencyCode, rate: f64, source: RateSource) -> Self {
        Self {
            from,
            to,
            rate,
            source,
            fetched_at: Utc::now(),
        }
    }

    /// Convert an amount of `from` into `to`
    pub fn convert(&self, amount: Amount) -> f64 {
        amount.value() * self.rate
    }

    /// Human readable form, e.g. `1 USD = 0.8500 EUR`
    pub fn describe(&self) -> String {
        format!("1 {} = {:.4} {}", self.from, self.rate, self.to)
    }
}
