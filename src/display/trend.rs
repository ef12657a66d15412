//! Trend formatting
//!
//! The terminal version of the dashboard chart: a one-line Unicode sparkline
//! followed by the same stats row the TUI shows.

use super::conversion::source_label;
use crate::models::TrendSeries;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Widest sparkline printed; longer series are averaged into buckets
pub const SPARKLINE_WIDTH: usize = 60;

/// Render values as a sparkline at most `width` characters wide
///
/// A flat series renders as a row of mid-height bars.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let values = downsample(values, width);
    let (low, high) = values
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let range = high - low;

    values
        .iter()
        .map(|v| {
            if range <= f64::EPSILON {
                return BARS[3];
            }
            let level = ((v - low) / range * (BARS.len() - 1) as f64).round() as usize;
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

// Average consecutive runs so the output fits in `width` columns
fn downsample(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }

    let chunk = values.len().div_ceil(width);
    values
        .chunks(chunk)
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect()
}

/// Format a trend series with its stats
pub fn format_trend(series: &TrendSeries, offline: bool) -> String {
    let mut output = format!(
        "{} → {}, last {} days ({})\n",
        series.base,
        series.target,
        series.len(),
        source_label(series.source, offline)
    );

    let Some(stats) = series.stats() else {
        output.push_str("No trend data available.\n");
        return output;
    };

    output.push_str(&sparkline(&series.rates(), SPARKLINE_WIDTH));
    output.push('\n');

    let arrow = if stats.is_up() { '▲' } else { '▼' };
    output.push_str(&format!(
        "Current {:.4}  High {:.4}  Low {:.4}  Change {} {:+.4} ({:+.2}%)\n",
        stats.current, stats.high, stats.low, arrow, stats.change, stats.change_percent
    ));

    if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
        output.push_str(&format!("{} .. {}\n", first.date, last.date));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, RateSource, TrendPoint};
    use chrono::NaiveDate;

    #[test]
    fn test_sparkline_levels() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0], 10), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0], 10), "▄▄");
        assert_eq!(sparkline(&[], 10), "");
    }

    #[test]
    fn test_sparkline_downsamples() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let line = sparkline(&values, 20);
        assert_eq!(line.chars().count(), 20);
        assert!(line.starts_with('▁'));
        assert!(line.ends_with('█'));
    }

    #[test]
    fn test_format_trend() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let series = TrendSeries::new(
            CurrencyCode::USD,
            CurrencyCode::parse("INR").unwrap(),
            vec![
                TrendPoint { date: day(1), rate: 83.0 },
                TrendPoint { date: day(2), rate: 82.5 },
                TrendPoint { date: day(3), rate: 83.5 },
            ],
            RateSource::Live,
        );

        let output = format_trend(&series, false);
        assert!(output.starts_with("USD → INR, last 3 days (live rates)"));
        assert!(output.contains("Current 83.5000"));
        assert!(output.contains("High 83.5000"));
        assert!(output.contains("Low 82.5000"));
        assert!(output.contains("▲ +0.5000 (+0.60%)"));
        assert!(output.contains("2024-03-01 .. 2024-03-03"));
    }

    #[test]
    fn test_format_empty_trend() {
        let series = TrendSeries::new(CurrencyCode::USD, CurrencyCode::USD, Vec::new(), RateSource::Mock);
        assert!(format_trend(&series, true).contains("No trend data available."));
    }
}
