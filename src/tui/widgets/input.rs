//! Text input widget
//!
//! A single-line field with a character cursor. Password fields render
//! their content masked and hand it out as a zeroizing buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use zeroize::Zeroize;

use crate::crypto::Password;

const MASK: char = '•';

/// A single-line text input
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    masked: bool,
    label: String,
    placeholder: String,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// A field whose content is never drawn
    pub fn password(label: impl Into<String>) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replace the content and put the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        self.clear();
        self.content.push_str(value);
        self.cursor = self.char_count();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Wipe the content
    pub fn clear(&mut self) {
        self.content.zeroize();
        self.cursor = 0;
    }

    /// Move the content out as a secret, leaving the field empty
    pub fn take_secret(&mut self) -> Password {
        let secret = Password::new(std::mem::take(&mut self.content));
        self.cursor = 0;
        secret
    }

    /// Text as it should appear on screen
    pub fn display_text(&self) -> String {
        if self.masked {
            std::iter::repeat(MASK).take(self.char_count()).collect()
        } else {
            self.content.clone()
        }
    }

    /// Widget drawing this input
    pub fn widget(&self, focused: bool) -> TextInputWidget<'_> {
        TextInputWidget {
            input: self,
            focused,
        }
    }
}

/// Borrowing renderer for a [`TextInput`]
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    focused: bool,
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let input = self.input;
        let label_width = if input.label.is_empty() {
            0
        } else {
            input.label.chars().count() as u16 + 2
        };

        if label_width > 0 {
            let label_style = if self.focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            let label_line = Line::from(vec![
                Span::styled(input.label.as_str(), label_style),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width);
        }

        let input_start = area.x + label_width;
        let input_width = area.width.saturating_sub(label_width);

        let (text, style) = if input.content.is_empty() && !self.focused {
            (input.placeholder.clone(), Style::default().fg(Color::DarkGray))
        } else {
            (input.display_text(), Style::default().fg(Color::White))
        };
        buf.set_stringn(input_start, area.y, &text, input_width as usize, style);

        if self.focused {
            let cursor_x = input_start + input.cursor as u16;
            if cursor_x < area.x + area.width {
                let under = input.display_text().chars().nth(input.cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    under.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_edit() {
        let mut input = TextInput::new("Amount");
        for c in "1250".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "1250");

        input.move_left();
        input.move_left();
        input.insert(',');
        assert_eq!(input.value(), "12,50");

        input.backspace();
        assert_eq!(input.value(), "1250");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "250");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new("Amount");
        input.insert('€');
        input.insert('5');
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "5");

        input.move_end();
        input.insert('₹');
        assert_eq!(input.value(), "5₹");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::new("");
        input.move_left();
        input.backspace();
        assert_eq!(input.cursor(), 0);

        input.set_value("ab");
        input.move_right();
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_password_is_masked() {
        let mut input = TextInput::password("Password");
        input.set_value("hunter2");
        assert!(input.is_masked());
        assert_eq!(input.display_text(), "•••••••");

        let secret = input.take_secret();
        assert_eq!(secret.as_str(), "hunter2");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_render_masks_content() {
        let mut input = TextInput::password("Password");
        input.set_value("abc");

        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        input.widget(false).render(area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.starts_with("Password: •••"));
        assert!(!line.contains("abc"));
    }
}
