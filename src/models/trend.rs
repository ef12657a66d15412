//! Daily rate series for the trend chart

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::rate::RateSource;

/// One daily observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Chronologically ordered daily rates for a currency pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub points: Vec<TrendPoint>,
    pub source: RateSource,
}

impl TrendSeries {
    /// Build a series, sorting the points by date
    pub fn new(
        base: CurrencyCode,
        target: CurrencyCode,
        mut points: Vec<TrendPoint>,
        source: RateSource,
    ) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            base,
            target,
            points,
            source,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The rate values only, oldest first
    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    /// The most recent rate
    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|p| p.rate)
    }

    /// Summary statistics, `None` for an empty series
    pub fn stats(&self) -> Option<TrendStats> {
        TrendStats::from_points(&self.points)
    }
}

/// Summary figures shown next to the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendStats {
    /// Last rate in the window
    pub current: f64,
    /// First rate in the window
    pub open: f64,
    pub high: f64,
    pub low: f64,
    /// `current - open`
    pub change: f64,
    /// Change relative to `open`, in percent
    pub change_percent: f64,
}

impl TrendStats {
    /// Compute stats over the points in order
    pub fn from_points(points: &[TrendPoint]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;

        let (high, low) = points.iter().fold((f64::MIN, f64::MAX), |(hi, lo), p| {
            (hi.max(p.rate), lo.min(p.rate))
        });

        let change = last.rate - first.rate;
        let change_percent = if first.rate == 0.0 {
            0.0
        } else {
            change / first.rate * 100.0
        };

        Some(Self {
            current: last.rate,
            open: first.rate,
            high,
            low,
            change,
            change_percent,
        })
    }

    /// Whether the rate rose over the window
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, rate: f64) -> TrendPoint {
        TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            rate,
        }
    }

    #[test]
    fn test_new_sorts_points() {
        let series = TrendSeries::new(
            CurrencyCode::USD,
            CurrencyCode::parse("INR").unwrap(),
            vec![point(3, 83.3), point(1, 83.1), point(2, 83.2)],
            RateSource::Live,
        );
        assert_eq!(series.rates(), vec![83.1, 83.2, 83.3]);
        assert_eq!(series.latest(), Some(83.3));
    }

    #[test]
    fn test_stats() {
        let points = vec![point(1, 80.0), point(2, 84.0), point(3, 79.0), point(4, 82.0)];
        let stats = TrendStats::from_points(&points).unwrap();

        assert_eq!(stats.current, 82.0);
        assert_eq!(stats.open, 80.0);
        assert_eq!(stats.high, 84.0);
        assert_eq!(stats.low, 79.0);
        assert!((stats.change - 2.0).abs() < 1e-9);
        assert!((stats.change_percent - 2.5).abs() < 1e-9);
        assert!(stats.is_up());
    }

    #[test]
    fn test_stats_empty() {
        assert!(TrendStats::from_points(&[]).is_none());
    }
}
