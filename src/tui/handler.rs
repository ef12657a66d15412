//! Event handler for the TUI
//!
//! Routes keyboard events to the active screen and ticks to the app.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Screen};
use super::event::Event;
use super::views::dashboard::DashboardFocus;
use super::widgets::TextInput;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.on_tick(Instant::now()),
        // Terminal will redraw automatically
        Event::Resize(_, _) => {}
    }
    Ok(())
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global keys (work everywhere)
    if is_ctrl(&key, 'c') || is_ctrl(&key, 'q') {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Register => handle_register_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key),
    }
}

/// Editing keys shared by every text field; returns whether the key was used
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert(c)
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 'r') {
        app.show_register();
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => app.login.next_field(),
        KeyCode::Enter => app.submit_login(),
        _ => {
            edit_input(app.login.focused_input(), key);
        }
    }
}

fn handle_register_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_login(),
        KeyCode::Tab | KeyCode::Down => app.register.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.register.prev_field(),
        KeyCode::Enter => app.submit_register(),
        _ => {
            edit_input(app.register.focused_input(), key);
        }
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        app.swap_currencies();
        return;
    }
    if is_ctrl(&key, 't') {
        app.refresh_trend();
        return;
    }
    if is_ctrl(&key, 'l') {
        app.logout();
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.dashboard.next_focus(),
        KeyCode::BackTab => app.dashboard.prev_focus(),
        KeyCode::Enter => app.start_conversion(),
        _ => match app.dashboard.focus {
            DashboardFocus::Amount => {
                edit_input(&mut app.dashboard.amount, key);
            }
            DashboardFocus::From | DashboardFocus::To => match key.code {
                KeyCode::Left | KeyCode::Up => app.cycle_currency(-1),
                KeyCode::Right | KeyCode::Down => app.cycle_currency(1),
                KeyCode::Char('s') => app.swap_currencies(),
                _ => {}
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FxPaths;
    use crate::config::settings::Settings;
    use crate::services::{AuthService, RateService};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FxPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::in_memory(paths).unwrap();
        (temp_dir, storage)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_login_with_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        AuthService::new(&storage, &settings)
            .register("alice", "secret1", "secret1")
            .unwrap();

        let mut app = App::new(&storage, &settings, RateService::offline());
        type_text(&mut app, "alice");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret1");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.user.as_deref(), Some("alice"));
    }

    #[test]
    fn test_ctrl_r_opens_register_and_esc_returns() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, RateService::offline());

        type_text(&mut app, "newbie");
        ctrl(&mut app, 'r');
        assert_eq!(app.screen, Screen::Register);
        assert_eq!(app.register.username.value(), "newbie");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_register_with_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, RateService::offline());

        ctrl(&mut app, 'r');
        type_text(&mut app, "carol");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pass123");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pass123");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Login);
        assert!(storage.users().exists("carol").unwrap());
    }

    #[test]
    fn test_dashboard_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, RateService::offline());
        app.user = Some("alice".into());
        app.screen = Screen::Dashboard;

        // 's' is text while the amount field has focus
        type_text(&mut app, "12s");
        assert_eq!(app.dashboard.amount.value(), "12s");
        press(&mut app, KeyCode::Backspace);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.dashboard.focus, DashboardFocus::From);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.dashboard.from_currency().code.as_str(), "EUR");
        assert!(app.dashboard.is_loading_trend());

        ctrl(&mut app, 's');
        assert_eq!(app.dashboard.from_currency().code.as_str(), "INR");
        assert_eq!(app.dashboard.to_currency().code.as_str(), "EUR");

        press(&mut app, KeyCode::Enter);
        assert!(app.dashboard.is_converting());
    }

    #[test]
    fn test_quit_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, RateService::offline());

        ctrl(&mut app, 'c');
        assert!(app.should_quit);

        let mut app = App::new(&storage, &settings, RateService::offline());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
