//! Trend chart and stats row

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::dashboard::DashboardState;
use crate::display::source_label;
use crate::models::TrendSeries;

/// Y bounds with a little headroom so a flat line is not drawn on the frame
pub fn y_bounds(low: f64, high: f64) -> [f64; 2] {
    let span = high - low;
    let pad = if span <= f64::EPSILON {
        (high.abs() * 0.01).max(0.01)
    } else {
        span * 0.1
    };
    [low - pad, high + pad]
}

/// Render the revealed part of the trend
pub fn render(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let Some(series) = state.trend.as_ref().filter(|s| !s.is_empty()) else {
        let message = if state.is_loading_trend() {
            "Loading trend…"
        } else {
            "No trend data"
        };
        let block = Block::default().title(" Trend ").borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let stats = series.stats();
    let color = match stats {
        Some(s) if !s.is_up() => Color::Red,
        _ => Color::Green,
    };

    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .take(state.reveal.visible().max(1))
        .enumerate()
        .map(|(i, p)| (i as f64, p.rate))
        .collect();

    let (low, high) = stats.map(|s| (s.low, s.high)).unwrap_or((0.0, 1.0));
    let bounds = y_bounds(low, high);
    let last_x = (series.len().saturating_sub(1)).max(1) as f64;

    let first_date = series.points.first().map(|p| p.date.format("%b %d").to_string());
    let last_date = series.points.last().map(|p| p.date.format("%b %d").to_string());

    let datasets = vec![Dataset::default()
        .name(format!("{}/{}", series.base, series.target))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data)];

    let title = format!(
        " {} → {} · {} days · {} ",
        series.base,
        series.target,
        series.len(),
        source_label(series.source, state.offline)
    );

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last_x])
                .labels(vec![
                    Span::raw(first_date.unwrap_or_default()),
                    Span::raw(last_date.unwrap_or_default()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(bounds)
                .labels(vec![
                    Span::raw(format!("{:.4}", bounds[0])),
                    Span::raw(format!("{:.4}", bounds[1])),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Render current, high, low and change for a series
pub fn render_stats(frame: &mut Frame, series: Option<&TrendSeries>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    let line = match series.and_then(TrendSeries::stats) {
        Some(stats) => {
            let (arrow, color) = if stats.is_up() {
                ("▲", Color::Green)
            } else {
                ("▼", Color::Red)
            };
            Line::from(vec![
                Span::styled("Current ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.4}", stats.current),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("   High ", Style::default().fg(Color::Gray)),
                Span::raw(format!("{:.4}", stats.high)),
                Span::styled("   Low ", Style::default().fg(Color::Gray)),
                Span::raw(format!("{:.4}", stats.low)),
                Span::styled("   Change ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} {:+.2}%", arrow, stats.change_percent),
                    Style::default().fg(color),
                ),
            ])
        }
        None => Line::from(Span::styled("—", Style::default().fg(Color::DarkGray))),
    };

    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_bounds_pads_range() {
        let [lo, hi] = y_bounds(80.0, 90.0);
        assert!((lo - 79.0).abs() < 1e-9);
        assert!((hi - 91.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_bounds_flat_series() {
        let [lo, hi] = y_bounds(1.0, 1.0);
        assert!(lo < 1.0 && hi > 1.0);
    }
}
