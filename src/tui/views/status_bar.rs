//! Status bar view
//!
//! Shows the rate mode, background activity and key hints for the screen

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, Screen};

fn hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => " Enter:Login  Tab:Next  Ctrl+R:Register  Esc:Quit ",
        Screen::Register => " Enter:Register  Tab:Next  Esc:Back ",
        Screen::Dashboard => {
            " Enter:Convert  Tab:Focus  ←→:Currency  Ctrl+S:Swap  Ctrl+T:Trend  Ctrl+L:Logout  Esc:Quit "
        }
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    let (mode, mode_color) = if app.rates.is_offline() {
        (" OFFLINE ", Color::Yellow)
    } else {
        (" ONLINE ", Color::Green)
    };
    spans.push(Span::styled(mode, Style::default().fg(Color::Black).bg(mode_color)));

    if app.dashboard.is_converting() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("converting…", Style::default().fg(Color::Yellow)));
    }
    if app.dashboard.is_loading_trend() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("loading trend…", Style::default().fg(Color::Yellow)));
    }

    let hints = hints(app.screen);
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
