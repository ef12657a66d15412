//! Dashboard: converter panel, animated result and trend
//!
//! Conversions and trend fetches both run on background jobs; this module
//! only holds their handles and draws whatever has arrived.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::chart;
use crate::display::source_label;
use crate::error::FxResult;
use crate::models::amount::format_with_symbol;
use crate::models::currency::catalog_index;
use crate::models::{Conversion, CurrencyCode, CurrencyInfo, TrendSeries, CURRENCIES};
use crate::services::{ConversionHandle, Job};
use crate::tui::animation::{ChartReveal, ValueAnimation};
use crate::tui::layout::DashboardLayout;
use crate::tui::widgets::TextInput;

/// Which converter control has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFocus {
    #[default]
    Amount,
    From,
    To,
}

/// State of the dashboard screen
pub struct DashboardState {
    pub amount: TextInput,
    pub focus: DashboardFocus,
    /// Catalog index of the source currency
    from: usize,
    /// Catalog index of the target currency
    to: usize,
    pub pending: Option<ConversionHandle>,
    pub last: Option<Conversion>,
    pub animation: Option<ValueAnimation>,
    pub trend: Option<TrendSeries>,
    pub trend_job: Option<Job<FxResult<TrendSeries>>>,
    pub reveal: ChartReveal,
    /// Rates come from the mock table by choice, not after a failed fetch
    pub offline: bool,
}

impl DashboardState {
    /// Dashboard preset to a currency pair
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            amount: TextInput::new("Amount").placeholder("e.g. 1,000"),
            focus: DashboardFocus::Amount,
            from: catalog_index(from).unwrap_or(0),
            to: catalog_index(to).unwrap_or(1 % CURRENCIES.len()),
            pending: None,
            last: None,
            animation: None,
            trend: None,
            trend_job: None,
            reveal: ChartReveal::default(),
            offline: false,
        }
    }

    pub fn from_currency(&self) -> &'static CurrencyInfo {
        &CURRENCIES[self.from]
    }

    pub fn to_currency(&self) -> &'static CurrencyInfo {
        &CURRENCIES[self.to]
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            DashboardFocus::Amount => DashboardFocus::From,
            DashboardFocus::From => DashboardFocus::To,
            DashboardFocus::To => DashboardFocus::Amount,
        };
    }

    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            DashboardFocus::Amount => DashboardFocus::To,
            DashboardFocus::From => DashboardFocus::Amount,
            DashboardFocus::To => DashboardFocus::From,
        };
    }

    /// Step the focused selector through the catalog; returns whether the
    /// pair changed
    pub fn cycle_selected(&mut self, step: isize) -> bool {
        let len = CURRENCIES.len() as isize;
        let slot = match self.focus {
            DashboardFocus::From => &mut self.from,
            DashboardFocus::To => &mut self.to,
            DashboardFocus::Amount => return false,
        };
        *slot = (*slot as isize + step).rem_euclid(len) as usize;
        true
    }

    /// Exchange source and target
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn is_converting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_loading_trend(&self) -> bool {
        self.trend_job.is_some()
    }

    /// Start the result animation towards a new conversion
    pub fn show_result(&mut self, conversion: Conversion, now: Instant) {
        let start = self.animation.map(|a| a.value_at(now)).unwrap_or(0.0);
        self.animation = Some(ValueAnimation::starting_at(
            start,
            conversion.result,
            crate::tui::animation::RESULT_ANIMATION,
            now,
        ));
        self.last = Some(conversion);
    }

    /// Replace the trend and reveal it from the left
    pub fn show_trend(&mut self, series: TrendSeries) {
        self.reveal = ChartReveal::new(series.len());
        self.trend = Some(series);
    }
}

/// Render the dashboard
pub fn render(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let layout = DashboardLayout::new(area);

    render_converter(frame, state, layout.converter);
    render_result(frame, state, layout.result);
    chart::render(frame, state, layout.chart);
    chart::render_stats(frame, state.trend.as_ref(), layout.stats);
}

fn selector_line(label: &str, info: &CurrencyInfo, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(
            format!("◀ {} {} {} ▶", info.flag, info.code, info.symbol),
            style,
        ),
    ])
}

fn render_converter(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let block = Block::default()
        .title(" Convert ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1),
            Constraint::Length(1), // From
            Constraint::Length(1), // To
            Constraint::Length(1),
            Constraint::Min(1), // Currency names
        ])
        .split(inner);

    frame.render_widget(
        state.amount.widget(state.focus == DashboardFocus::Amount),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(selector_line(
            "From",
            state.from_currency(),
            state.focus == DashboardFocus::From,
        )),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(selector_line(
            "To  ",
            state.to_currency(),
            state.focus == DashboardFocus::To,
        )),
        rows[3],
    );
    frame.render_widget(
        Paragraph::new(format!(
            "{} → {}",
            state.from_currency().name,
            state.to_currency().name
        ))
        .style(Style::default().fg(Color::DarkGray)),
        rows[5],
    );
}

fn render_result(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let lines = match (&state.last, &state.animation) {
        _ if state.is_converting() => vec![Line::from(Span::styled(
            "Converting…",
            Style::default().fg(Color::Yellow),
        ))],
        (Some(conversion), Some(animation)) => {
            let shown = animation.value_at(Instant::now());
            vec![
                Line::from(Span::styled(
                    format_with_symbol(shown, conversion.to.symbol()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "{} {}",
                    conversion.formatted_amount(),
                    conversion.from
                )),
                Line::from(Span::styled(
                    conversion.rate_line(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    source_label(conversion.source, state.offline),
                    Style::default().fg(if conversion.source.is_live() {
                        Color::DarkGray
                    } else {
                        Color::Yellow
                    }),
                )),
            ]
        }
        _ => vec![Line::from(Span::styled(
            "Enter an amount and press Enter",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
