//! TUI Views module
//!
//! One view per screen plus the header, status bar and toast overlay.

pub mod chart;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, Screen};
use super::layout::{top_right_rect, AppLayout};

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 4;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.screen {
        Screen::Login => login::render(frame, &app.login, layout.main),
        Screen::Register => register::render(
            frame,
            &app.register,
            app.settings.min_password_length,
            layout.main,
        ),
        Screen::Dashboard => dashboard::render(frame, &app.dashboard, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);
    render_notifications(frame, app, layout.main);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " fxpro ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw("currency converter"));

    if let Some(user) = &app.user {
        spans.push(Span::raw("   │ "));
        spans.push(Span::styled(
            format!("signed in as {}", user),
            Style::default().fg(Color::Green),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

// Newest toast on top
fn render_notifications(frame: &mut Frame, app: &App, area: Rect) {
    let mut y = area.y;
    for notification in app.notifications.iter().rev() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let slot = Rect::new(area.x, y, area.width, area.height - (y - area.y));
        frame.render_widget(notification, top_right_rect(TOAST_WIDTH, TOAST_HEIGHT, slot));
        y += TOAST_HEIGHT;
    }
}
