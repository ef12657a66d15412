//! Core data models for fxpro
//!
//! Currencies, user-entered amounts, exchange rates, trend series and
//! conversion records.

pub mod amount;
pub mod conversion;
pub mod currency;
pub mod rate;
pub mod trend;

pub use amount::{Amount, AmountParseError};
pub use conversion::Conversion;
pub use currency::{CurrencyCode, CurrencyInfo, CURRENCIES};
pub use rate::{ExchangeRate, RateSource};
pub use trend::{TrendPoint, TrendSeries, TrendStats};
