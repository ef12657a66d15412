//! Layout definitions for the TUI
//!
//! Defines the screen regions: the main area, the status bar, the
//! dashboard panels and centered forms.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions shared by every screen
pub struct AppLayout {
    /// Header with title and user
    pub header: Rect,
    /// Screen content
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            main: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// Layout for the dashboard
pub struct DashboardLayout {
    /// Amount input and currency selectors
    pub converter: Rect,
    /// Animated result and rate line
    pub result: Rect,
    /// Trend chart
    pub chart: Rect,
    /// Trend stats row
    pub stats: Rect,
}

impl DashboardLayout {
    /// Calculate dashboard layout
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(38), // Converter column
                Constraint::Min(30),    // Chart column
            ])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(11), // Inputs
                Constraint::Min(6),     // Result
            ])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Chart
                Constraint::Length(3), // Stats
            ])
            .split(columns[1]);

        Self {
            converter: left[0],
            result: left[1],
            chart: right[0],
            stats: right[1],
        }
    }
}

/// Create a fixed-size centered rect for forms and dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Rect of `width` x `height` anchored to the top-right corner of `r`
pub fn top_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}
