//! Built-in mock rate table
//!
//! Static USD-based rates used when the live APIs are unreachable or the
//! application runs offline. Cross rates go through USD; codes missing from
//! the table are treated as worth one dollar.

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::Rng;

use super::{window_start, RateProvider, TrendProvider};
use crate::error::FxResult;
use crate::models::{CurrencyCode, TrendPoint, CURRENCIES};

/// Units of each currency per US dollar
pub const USD_RATES: &[(&str, f64)] = &[
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("JPY", 110.0),
    ("INR", 83.25),
    ("CAD", 1.25),
    ("AUD", 1.35),
    ("CHF", 0.92),
    ("CNY", 6.45),
    ("SEK", 8.75),
    ("NZD", 1.42),
    ("BRL", 5.2),
    ("RUB", 74.5),
    ("KRW", 1180.0),
    ("SGD", 1.35),
];

/// Maximum distance of a mock trend point from the table rate, as a fraction
const TREND_BAND: f64 = 0.01;

/// Largest day-to-day move of a mock trend, as a fraction
const TREND_STEP: f64 = 0.002;

/// The hardcoded fallback rates
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRates;

impl MockRates {
    /// Units of `code` per US dollar
    pub fn usd_rate(code: CurrencyCode) -> f64 {
        if code == CurrencyCode::USD {
            return 1.0;
        }
        USD_RATES
            .iter()
            .find(|(c, _)| *c == code.as_str())
            .map(|(_, rate)| *rate)
            .unwrap_or(1.0)
    }

    /// Rate from `from` to `to`, crossing through USD
    pub fn rate(from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return 1.0;
        }
        Self::usd_rate(to) / Self::usd_rate(from)
    }

    /// Synthetic daily series wandering around the table rate
    pub fn trend_with_rng<R: Rng>(
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
        end: NaiveDate,
        rng: &mut R,
    ) -> FxResult<Vec<TrendPoint>> {
        let start = window_start(end, days)?;
        let center = Self::rate(base, target);

        if base == target {
            return Ok(start
                .iter_days()
                .take(days as usize)
                .map(|date| TrendPoint { date, rate: 1.0 })
                .collect());
        }

        let (low, high) = (center * (1.0 - TREND_BAND), center * (1.0 + TREND_BAND));
        let mut value = center;

        Ok(start
            .iter_days()
            .take(days as usize)
            .map(|date| {
                let step = rng.gen_range(-TREND_STEP..=TREND_STEP) * center;
                value = (value + step).clamp(low, high);
                TrendPoint { date, rate: value }
            })
            .collect())
    }
}

impl RateProvider for MockRates {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn latest_rates(&self, base: CurrencyCode) -> FxResult<HashMap<String, f64>> {
        Ok(CURRENCIES
            .iter()
            .map(|c| (c.code.to_string(), Self::rate(base, c.code)))
            .collect())
    }

    fn latest_rate(&self, from: CurrencyCode, to: CurrencyCode) -> FxResult<f64> {
        Ok(Self::rate(from, to))
    }
}

impl TrendProvider for MockRates {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn trend(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
        end: NaiveDate,
    ) -> FxResult<Vec<TrendPoint>> {
        Self::trend_with_rng(base, target, days, end, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_from_usd() {
        assert_eq!(MockRates::rate(code("USD"), code("EUR")), 0.85);
        assert_eq!(MockRates::rate(code("USD"), code("KRW")), 1180.0);
    }

    #[test]
    fn test_to_usd() {
        assert!(close(MockRates::rate(code("INR"), code("USD")), 1.0 / 83.25));
    }

    #[test]
    fn test_cross_rate() {
        let expected = (1.0 / 0.85) * 0.73;
        assert!(close(MockRates::rate(code("EUR"), code("GBP")), expected));
    }

    #[test]
    fn test_same_and_unknown() {
        assert_eq!(MockRates::rate(code("JPY"), code("JPY")), 1.0);
        assert_eq!(MockRates::rate(code("USD"), code("XAU")), 1.0);
        assert!(close(MockRates::rate(code("XAU"), code("EUR")), 0.85));
    }

    #[test]
    fn test_latest_rates_covers_catalog() {
        let rates = MockRates.latest_rates(code("EUR")).unwrap();
        assert_eq!(rates.len(), CURRENCIES.len());
        assert_eq!(rates["EUR"], 1.0);
        assert!(close(rates["USD"], 1.0 / 0.85));
    }

    #[test]
    fn test_trend_shape() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let points =
            MockRates::trend_with_rng(code("USD"), code("INR"), 30, end, &mut rng).unwrap();

        assert_eq!(points.len(), 30);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(points[29].date, end);
        for p in &points {
            assert!(p.rate >= 83.25 * 0.99 - 1e-9 && p.rate <= 83.25 * 1.01 + 1e-9);
        }
    }

    #[test]
    fn test_trend_same_currency_is_flat() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
        let points = MockRates.trend(code("EUR"), code("EUR"), 5, end).unwrap();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.rate == 1.0));
    }
}
