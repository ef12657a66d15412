//! Terminal User Interface module
//!
//! A ratatui front end with login, registration and a dashboard that
//! converts amounts and charts the recent trend of the selected pair.

pub mod animation;
pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
