//! Exchange rate sources
//!
//! Two remote APIs and one built-in table:
//!
//! - [`ExchangeRateApi`]: latest rates from exchangerate-api.com
//! - [`Frankfurter`]: daily timeseries from frankfurter.app
//! - [`MockRates`]: hardcoded USD-based rates used whenever the network fails
//!
//! The services layer only sees the [`RateProvider`] and [`TrendProvider`]
//! traits, which keeps the fallback logic testable without a network.

pub mod exchangerate_api;
pub mod frankfurter;
pub mod http;
pub mod mock;

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{FxError, FxResult};
use crate::models::{CurrencyCode, TrendPoint};

pub use exchangerate_api::ExchangeRateApi;
pub use frankfurter::Frankfurter;
pub use mock::MockRates;

/// A source of current exchange rates
pub trait RateProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// All rates quoted against `base`, keyed by currency code
    fn latest_rates(&self, base: CurrencyCode) -> FxResult<HashMap<String, f64>>;

    /// The rate from `from` to `to`
    fn latest_rate(&self, from: CurrencyCode, to: CurrencyCode) -> FxResult<f64> {
        let rates = self.latest_rates(from)?;
        rates
            .get(to.as_str())
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| FxError::Network(format!("Currency not supported: {}", to)))
    }
}

/// A source of historical daily rates
pub trait TrendProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Daily rates for the `days` days ending at `end` (inclusive), oldest first
    fn trend(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
        end: NaiveDate,
    ) -> FxResult<Vec<TrendPoint>>;
}

/// First day of a window of `days` days ending at `end`
pub fn window_start(end: NaiveDate, days: u32) -> FxResult<NaiveDate> {
    if days == 0 {
        return Err(FxError::Validation("Trend window must cover at least one day".into()));
    }
    end.checked_sub_days(chrono::Days::new(u64::from(days - 1)))
        .ok_or_else(|| FxError::Validation(format!("Trend window of {} days is out of range", days)))
}
