//! A completed conversion, as stored in the history table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::{format_grouped, format_with_symbol, Amount};
use super::currency::CurrencyCode;
use super::rate::{ExchangeRate, RateSource};

/// Result of converting an amount at a given rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Row id, `None` until persisted
    pub id: Option<i64>,
    pub username: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
    pub source: RateSource,
    pub created_at: DateTime<Utc>,
}

impl Conversion {
    /// Apply a rate to an amount
    pub fn new(username: impl Into<String>, amount: Amount, rate: &ExchangeRate) -> Self {
        Self {
            id: None,
            username: username.into(),
            from: rate.from,
            to: rate.to,
            amount: amount.value(),
            rate: rate.rate,
            result: rate.convert(amount),
            source: rate.source,
            created_at: Utc::now(),
        }
    }

    /// Converted value with the target symbol, e.g. `€ 85.00`
    pub fn formatted_result(&self) -> String {
        format_with_symbol(self.result, self.to.symbol())
    }

    /// Source amount with its symbol
    pub fn formatted_amount(&self) -> String {
        format_with_symbol(self.amount, self.from.symbol())
    }

    /// `1 USD = 0.8500 EUR`
    pub fn rate_line(&self) -> String {
        format!("1 {} = {:.4} {}", self.from, self.rate, self.to)
    }

    /// One-line summary, e.g. `100.00 USD = 85.00 EUR`
    pub fn summary(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_grouped(self.amount),
            self.from,
            format_grouped(self.result),
            self.to
        )
    }
}
