//! Login screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Fields of the login form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// State of the login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextInput::new("Username"),
            password: TextInput::password("Password"),
            focus: LoginField::Username,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Empty both fields and focus the username
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = LoginField::Username;
    }
}

/// Render the login form
pub fn render(frame: &mut Frame, form: &LoginForm, area: Rect) {
    let form_area = centered_rect_fixed(48, 11, area);
    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .title(" Login ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Username
            Constraint::Length(1),
            Constraint::Length(1), // Password
            Constraint::Length(1),
            Constraint::Min(1), // Hints
        ])
        .split(inner);

    frame.render_widget(
        form.username.widget(form.focus == LoginField::Username),
        chunks[0],
    );
    frame.render_widget(
        form.password.widget(form.focus == LoginField::Password),
        chunks[2],
    );

    let hints = Paragraph::new(vec![
        Line::from("Enter: login   Tab: next field"),
        Line::from("Ctrl+R: create account   Esc: quit"),
    ])
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, chunks[4]);
}
