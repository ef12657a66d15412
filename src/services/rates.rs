//! Rate service
//!
//! Fetches live rates and trends, falling back to the mock table on any
//! failure. Callers always get a usable rate; the `source` field tells them
//! whether it is live.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use super::worker::Job;
use crate::config::settings::Settings;
use crate::error::FxResult;
use crate::models::{CurrencyCode, ExchangeRate, RateSource, TrendPoint, TrendSeries};
use crate::sources::{
    window_start, ExchangeRateApi, Frankfurter, MockRates, RateProvider, TrendProvider,
};

/// Rate lookups with mock fallback
///
/// Cheap to clone, so a copy can be moved into a conversion worker thread.
#[derive(Clone)]
pub struct RateService {
    latest: Arc<dyn RateProvider>,
    trends: Arc<dyn TrendProvider>,
    offline: bool,
}

impl RateService {
    /// Service over explicit providers
    pub fn new(latest: Arc<dyn RateProvider>, trends: Arc<dyn TrendProvider>) -> Self {
        Self {
            latest,
            trends,
            offline: false,
        }
    }

    /// Service that never touches the network
    pub fn offline() -> Self {
        Self {
            latest: Arc::new(MockRates),
            trends: Arc::new(MockRates),
            offline: true,
        }
    }

    /// Service configured from user settings
    pub fn from_settings(settings: &Settings) -> FxResult<Self> {
        if settings.is_offline() {
            return Ok(Self::offline());
        }

        let timeout = Duration::from_secs(settings.request_timeout_secs);
        Ok(Self::new(
            Arc::new(ExchangeRateApi::new(&settings.exchange_rate_api_url, timeout)?),
            Arc::new(Frankfurter::new(&settings.frankfurter_api_url, timeout)?),
        ))
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Current rate from `from` to `to`
    ///
    /// Identical currencies short-circuit to an exact 1.0 without a request,
    /// even offline.
    pub fn exchange_rate(&self, from: CurrencyCode, to: CurrencyCode) -> ExchangeRate {
        if from == to {
            return ExchangeRate::new(from, to, 1.0, RateSource::Live);
        }

        if self.offline {
            return ExchangeRate::new(from, to, MockRates::rate(from, to), RateSource::Mock);
        }

        match self.latest.latest_rate(from, to) {
            Ok(rate) => {
                tracing::debug!(%from, %to, rate, provider = self.latest.name(), "Fetched live rate");
                ExchangeRate::new(from, to, rate, RateSource::Live)
            }
            Err(e) => {
                tracing::warn!(%from, %to, error = %e, "Live rate unavailable, using mock rate");
                ExchangeRate::new(from, to, MockRates::rate(from, to), RateSource::Mock)
            }
        }
    }

    /// Rates for every currency quoted against `base`
    pub fn rate_table(&self, base: CurrencyCode) -> (HashMap<String, f64>, RateSource) {
        if !self.offline {
            match self.latest.latest_rates(base) {
                Ok(rates) => return (rates, RateSource::Live),
                Err(e) => {
                    tracing::warn!(%base, error = %e, "Live rate table unavailable, using mock rates")
                }
            }
        }

        // MockRates never fails
        let rates = MockRates.latest_rates(base).unwrap_or_default();
        (rates, RateSource::Mock)
    }

    /// Daily trend for the `days` days ending today
    pub fn trend(&self, base: CurrencyCode, target: CurrencyCode, days: u32) -> FxResult<TrendSeries> {
        self.trend_ending(base, target, days, chrono::Local::now().date_naive())
    }

    /// Fetch a trend on a background thread
    pub fn spawn_trend(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
    ) -> Job<FxResult<TrendSeries>> {
        let service = self.clone();
        Job::spawn(move || service.trend(base, target, days))
    }

    /// Daily trend for the `days` days ending at `end`
    ///
    /// An empty or failed live fetch yields a mock series. Only an invalid
    /// window is an error.
    pub fn trend_ending(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
        end: NaiveDate,
    ) -> FxResult<TrendSeries> {
        let start = window_start(end, days)?;

        if base == target {
            let points = start
                .iter_days()
                .take(days as usize)
                .map(|date| TrendPoint { date, rate: 1.0 })
                .collect();
            return Ok(TrendSeries::new(base, target, points, RateSource::Live));
        }

        if !self.offline {
            match self.trends.trend(base, target, days, end) {
                Ok(points) if !points.is_empty() => {
                    tracing::debug!(
                        %base, %target, points = points.len(),
                        provider = self.trends.name(), "Fetched live trend"
                    );
                    return Ok(TrendSeries::new(base, target, points, RateSource::Live));
                }
                Ok(_) => {
                    tracing::warn!(%base, %target, "Live trend was empty, using mock trend")
                }
                Err(e) => {
                    tracing::warn!(%base, %target, error = %e, "Live trend unavailable, using mock trend")
                }
            }
        }

        let points = MockRates.trend(base, target, days, end)?;
        Ok(TrendSeries::new(base, target, points, RateSource::Mock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    /// Provider that counts calls and answers from a fixed result
    struct Scripted {
        calls: AtomicUsize,
        fail: bool,
        points: Vec<TrendPoint>,
    }

    impl Scripted {
        fn ok(points: Vec<TrendPoint>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
                points,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
                points: Vec::new(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RateProvider for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn latest_rates(&self, _base: CurrencyCode) -> FxResult<HashMap<String, f64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FxError::Network("connection refused".into()));
            }
            Ok(HashMap::from([("EUR".to_string(), 0.5)]))
        }
    }

    impl TrendProvider for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn trend(
            &self,
            _base: CurrencyCode,
            _target: CurrencyCode,
            _days: u32,
            _end: NaiveDate,
        ) -> FxResult<Vec<TrendPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FxError::Network("timeout".into()));
            }
            Ok(self.points.clone())
        }
    }

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 30).unwrap()
    }

    #[test]
    fn test_live_rate() {
        let provider = Scripted::ok(Vec::new());
        let service = RateService::new(provider.clone(), provider.clone());

        let rate = service.exchange_rate(code("USD"), code("EUR"));
        assert_eq!(rate.rate, 0.5);
        assert_eq!(rate.source, RateSource::Live);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_missing_currency_falls_back_to_mock() {
        let provider = Scripted::ok(Vec::new());
        let service = RateService::new(provider.clone(), provider);

        let rate = service.exchange_rate(code("USD"), code("JPY"));
        assert_eq!(rate.rate, 110.0);
        assert_eq!(rate.source, RateSource::Mock);
    }

    #[test]
    fn test_network_error_falls_back_to_mock() {
        let provider = Scripted::failing();
        let service = RateService::new(provider.clone(), provider);

        let rate = service.exchange_rate(code("USD"), code("INR"));
        assert_eq!(rate.rate, 83.25);
        assert_eq!(rate.source, RateSource::Mock);
    }

    #[test]
    fn test_same_currency_skips_request() {
        let provider = Scripted::failing();
        let service = RateService::new(provider.clone(), provider.clone());

        let rate = service.exchange_rate(code("GBP"), code("GBP"));
        assert_eq!(rate.rate, 1.0);
        assert_eq!(rate.source, RateSource::Live);
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_offline_never_calls_network() {
        let service = RateService::offline();
        let rate = service.exchange_rate(code("USD"), code("EUR"));
        assert_eq!(rate.rate, 0.85);
        assert_eq!(rate.source, RateSource::Mock);
        assert!(service.is_offline());
    }

    #[test]
    fn test_live_trend() {
        let points = vec![
            TrendPoint { date: end(), rate: 2.0 },
            TrendPoint { date: end().pred_opt().unwrap(), rate: 1.0 },
        ];
        let provider = Scripted::ok(points);
        let service = RateService::new(provider.clone(), provider);

        let series = service.trend_ending(code("USD"), code("EUR"), 30, end()).unwrap();
        assert_eq!(series.source, RateSource::Live);
        // Sorted chronologically
        assert_eq!(series.rates(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_empty_trend_falls_back_to_mock() {
        let provider = Scripted::ok(Vec::new());
        let service = RateService::new(provider.clone(), provider);

        let series = service.trend_ending(code("USD"), code("INR"), 30, end()).unwrap();
        assert_eq!(series.source, RateSource::Mock);
        assert_eq!(series.len(), 30);
    }

    #[test]
    fn test_failed_trend_falls_back_to_mock() {
        let provider = Scripted::failing();
        let service = RateService::new(provider.clone(), provider);

        let series = service.trend_ending(code("USD"), code("INR"), 10, end()).unwrap();
        assert_eq!(series.source, RateSource::Mock);
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn test_invalid_trend_window() {
        let service = RateService::offline();
        assert!(service.trend_ending(code("USD"), code("INR"), 0, end()).is_err());
    }

    #[test]
    fn test_spawn_trend() {
        let series = RateService::offline()
            .spawn_trend(code("USD"), code("EUR"), 7)
            .wait()
            .unwrap()
            .unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series.source, RateSource::Mock);
    }

    #[test]
    fn test_rate_table_fallback() {
        let provider = Scripted::failing();
        let service = RateService::new(provider.clone(), provider);

        let (rates, source) = service.rate_table(code("USD"));
        assert_eq!(source, RateSource::Mock);
        assert_eq!(rates["EUR"], 0.85);
    }
}
