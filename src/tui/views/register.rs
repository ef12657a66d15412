//! Registration screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Fields of the registration form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Username,
    Password,
    Confirm,
}

/// State of the registration form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: TextInput,
    pub password: TextInput,
    pub confirm: TextInput,
    pub focus: RegisterField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            username: TextInput::new("Username"),
            password: TextInput::password("Password"),
            confirm: TextInput::password("Confirm"),
            focus: RegisterField::Username,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Password,
            RegisterField::Password => RegisterField::Confirm,
            RegisterField::Confirm => RegisterField::Username,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Confirm,
            RegisterField::Password => RegisterField::Username,
            RegisterField::Confirm => RegisterField::Password,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            RegisterField::Username => &mut self.username,
            RegisterField::Password => &mut self.password,
            RegisterField::Confirm => &mut self.confirm,
        }
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.confirm.clear();
        self.focus = RegisterField::Username;
    }
}

/// Render the registration form
pub fn render(frame: &mut Frame, form: &RegisterForm, min_password_length: usize, area: Rect) {
    let form_area = centered_rect_fixed(48, 13, area);
    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .title(" Create Account ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

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
            Constraint::Length(1), // Confirm
            Constraint::Length(1),
            Constraint::Min(1), // Hints
        ])
        .split(inner);

    frame.render_widget(
        form.username.widget(form.focus == RegisterField::Username),
        chunks[0],
    );
    frame.render_widget(
        form.password.widget(form.focus == RegisterField::Password),
        chunks[2],
    );
    frame.render_widget(
        form.confirm.widget(form.focus == RegisterField::Confirm),
        chunks[4],
    );

    let hints = Paragraph::new(vec![
        Line::from(format!("Password: at least {} characters", min_password_length)),
        Line::from("Enter: register   Esc: back to login"),
    ])
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, chunks[6]);
}
