//! Input gate widget.
//!
//! A multi-line text field with a send control. The gate is enabled or
//! disabled by the caller (from the processing mode); while disabled it
//! ignores every edit and shows the "working" placeholder.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::style_registry::Styles;

/// Label of the send control.
pub const SEND_LABEL: &str = " ➤ ";

/// What a key did to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// The key is not for the gate (or the gate is disabled).
    Ignored,
    /// Text or cursor changed.
    Edited,
    /// The user submitted; carries the trimmed text.
    Submit(String),
}

/// Input gate state.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    /// Current input text
    input: String,
    /// Cursor position in chars
    cursor: usize,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The text a submit would carry.
    pub fn trimmed(&self) -> &str {
        self.input.trim()
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the send control shows as ready.
    pub fn is_send_ready(&self, enabled: bool) -> bool {
        enabled && !self.trimmed().is_empty()
    }

    /// Number of text lines, for sizing the input row.
    pub fn line_count(&self) -> usize {
        self.input.split('\n').count()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, enabled: bool) -> InputAction {
        if !enabled {
            return InputAction::Ignored;
        }
        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.insert_char('\n');
                InputAction::Edited
            }
            KeyCode::Enter => self.activate_send(enabled),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c);
                InputAction::Edited
            }
            KeyCode::Backspace => {
                self.delete_char();
                InputAction::Edited
            }
            KeyCode::Delete => {
                self.delete_char_forward();
                InputAction::Edited
            }
            KeyCode::Left => {
                self.move_cursor_left();
                InputAction::Edited
            }
            KeyCode::Right => {
                self.move_cursor_right();
                InputAction::Edited
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputAction::Edited
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                InputAction::Edited
            }
            _ => InputAction::Ignored,
        }
    }

    /// Enter, or a click on the send control.
    ///
    /// Submits at most once: the field is cleared on success, so a repeated
    /// activation finds it empty.
    pub fn activate_send(&mut self, enabled: bool) -> InputAction {
        if !self.is_send_ready(enabled) {
            return InputAction::Ignored;
        }
        let text = self.trimmed().to_string();
        self.clear();
        InputAction::Submit(text)
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor position.
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.input.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Clear all input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// (column, row) of the cursor inside the text area.
    fn cursor_offset(&self) -> (u16, u16) {
        let before: String = self.input.chars().take(self.cursor).collect();
        let row = before.matches('\n').count();
        let col = before.rsplit('\n').next().map_or(0, |line| line.chars().count());
        (col as u16, row as u16)
    }

    /// Render the text field into `area` and the send control into `send`.
    ///
    /// Returns where the terminal cursor belongs, if the gate is enabled.
    pub fn render(
        &self,
        area: Rect,
        send: Rect,
        buf: &mut Buffer,
        styles: &Styles,
        enabled: bool,
        placeholder: &str,
    ) -> Option<Position> {
        let block = Block::default().borders(Borders::ALL).border_style(if enabled {
            styles.frame
        } else {
            styles.input_disabled
        });
        let inner = block.inner(area);
        block.render(area, buf);

        let paragraph = if self.input.is_empty() {
            Paragraph::new(Line::from(Span::styled(placeholder, styles.placeholder)))
        } else {
            let style = if enabled {
                styles.input
            } else {
                styles.input_disabled
            };
            Paragraph::new(self.input.as_str()).style(style)
        };
        paragraph.render(inner, buf);

        let send_style = if self.is_send_ready(enabled) {
            styles.send_ready
        } else {
            styles.send_idle
        };
        let send_row = Rect {
            y: send.y + send.height / 2,
            height: 1.min(send.height),
            ..send
        };
        Paragraph::new(Span::styled(SEND_LABEL, send_style)).render(send_row, buf);

        if !enabled || inner.width == 0 || inner.height == 0 {
            return None;
        }
        let (col, row) = self.cursor_offset();
        Some(Position {
            x: inner.x + col.min(inner.width - 1),
            y: inner.y + row.min(inner.height - 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_registry;

    fn type_text(gate: &mut InputGate, text: &str) {
        for c in text.chars() {
            gate.handle_key_event(KeyEvent::from(KeyCode::Char(c)), true);
        }
    }

    #[test]
    fn test_new_gate_is_empty() {
        let gate = InputGate::new();

        assert_eq!(gate.input(), "");
        assert!(!gate.is_send_ready(true));
    }

    #[test]
    fn test_enter_submits_trimmed_text_once() {
        let mut gate = InputGate::new();
        type_text(&mut gate, "  find the weather in Paris ");

        let action = gate.handle_key_event(KeyEvent::from(KeyCode::Enter), true);

        assert_eq!(
            action,
            InputAction::Submit("find the weather in Paris".to_string())
        );
        assert_eq!(gate.input(), "");
        assert_eq!(
            gate.handle_key_event(KeyEvent::from(KeyCode::Enter), true),
            InputAction::Ignored
        );
    }

    #[test]
    fn test_whitespace_only_does_not_submit() {
        let mut gate = InputGate::new();
        type_text(&mut gate, "   ");

        assert_eq!(gate.activate_send(true), InputAction::Ignored);
        assert_eq!(gate.input(), "   ");
    }

    #[test]
    fn test_disabled_gate_ignores_everything() {
        let mut gate = InputGate::new();
        type_text(&mut gate, "task");

        assert_eq!(
            gate.handle_key_event(KeyEvent::from(KeyCode::Char('x')), false),
            InputAction::Ignored
        );
        assert_eq!(gate.activate_send(false), InputAction::Ignored);
        assert_eq!(gate.input(), "task");
        assert!(!gate.is_send_ready(false));
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut gate = InputGate::new();
        type_text(&mut gate, "line one");

        let action = gate.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT), true);
        type_text(&mut gate, "line two");

        assert_eq!(action, InputAction::Edited);
        assert_eq!(gate.input(), "line one\nline two");
        assert_eq!(gate.line_count(), 2);
    }

    #[test]
    fn test_send_state_tracks_keystrokes() {
        let mut gate = InputGate::new();
        assert!(!gate.is_send_ready(true));

        type_text(&mut gate, "a");
        assert!(gate.is_send_ready(true));

        gate.handle_key_event(KeyEvent::from(KeyCode::Backspace), true);
        assert!(!gate.is_send_ready(true));
    }

    #[test]
    fn test_utf8_editing() {
        let mut gate = InputGate::new();
        type_text(&mut gate, "18°C");

        gate.handle_key_event(KeyEvent::from(KeyCode::Left), true);
        gate.handle_key_event(KeyEvent::from(KeyCode::Backspace), true);
        assert_eq!(gate.input(), "18C");

        gate.handle_key_event(KeyEvent::from(KeyCode::Home), true);
        gate.handle_key_event(KeyEvent::from(KeyCode::Delete), true);
        assert_eq!(gate.input(), "8C");

        gate.handle_key_event(KeyEvent::from(KeyCode::End), true);
        type_text(&mut gate, "é");
        assert_eq!(gate.input(), "8Cé");
        assert_eq!(gate.cursor(), 3);
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut gate = InputGate::new();

        let action =
            gate.handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), true);

        assert_eq!(action, InputAction::Ignored);
        assert_eq!(gate.input(), "");
    }

    #[test]
    fn test_render_shows_placeholder() {
        let gate = InputGate::new();
        let styles = style_registry::install();
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 3));

        let cursor = gate.render(
            Rect::new(0, 0, 45, 3),
            Rect::new(45, 0, 5, 3),
            &mut buf,
            styles,
            false,
            "Processing...",
        );

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Processing..."));
        assert!(cursor.is_none());
    }
}
