//! Single-line editable field used by the compose panel.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

use crate::utils::input::sanitize_line_input;

/// An editable line of text with a character-indexed cursor. Width math is
/// done in display columns so wide glyphs position the terminal cursor
/// correctly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineField {
    text: String,
    cursor: usize,
}

impl LineField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with prefilled text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = sanitize_line_input(&text.into());
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Display width of the text before the cursor, for terminal cursor
    /// placement.
    pub fn cursor_column(&self) -> u16 {
        let prefix: String = self.text.chars().take(self.cursor).collect();
        prefix.width() as u16
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in sanitize_line_input(s).chars() {
            let at = self.byte_index(self.cursor);
            self.text.insert(at, c);
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let len = self.text.chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Delete from the cursor to the end of the line (Ctrl+K).
    pub fn kill_to_end(&mut self) {
        let at = self.byte_index(self.cursor);
        self.text.truncate(at);
    }

    /// Apply one key event with the usual line-editing bindings. Returns
    /// true when the event was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.move_start(),
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => self.move_end(),
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => self.kill_to_end(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
            }
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.insert_char(c)
            }
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Left, _) => self.move_left(),
            (KeyCode::Right, _) => self.move_right(),
            (KeyCode::Home, _) => self.move_start(),
            (KeyCode::End, _) => self.move_end(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn insert_and_backspace_track_cursor() {
        let mut field = LineField::new();
        field.insert_str("abc");
        field.move_left();
        field.backspace();
        assert_eq!(field.text(), "ac");
        field.insert_char('B');
        assert_eq!(field.text(), "aBc");
    }

    #[test]
    fn with_text_places_cursor_at_end() {
        let mut field = LineField::with_text("denmark");
        field.insert_char('!');
        assert_eq!(field.text(), "denmark!");
    }

    #[test]
    fn handles_multibyte_text() {
        let mut field = LineField::with_text("héllo");
        field.move_left();
        field.backspace();
        assert_eq!(field.text(), "hélo");
        assert_eq!(field.cursor_column(), 3);
    }

    #[test]
    fn key_events_drive_editing() {
        let mut field = LineField::new();
        assert!(field.handle_key(&key(KeyCode::Char('h'))));
        assert!(field.handle_key(&key(KeyCode::Char('i'))));
        assert!(field.handle_key(&key(KeyCode::Home)));
        assert!(field.handle_key(&key(KeyCode::Delete)));
        assert_eq!(field.text(), "i");
        assert!(!field.handle_key(&key(KeyCode::Enter)));
    }

    #[test]
    fn control_shortcuts_edit_the_line() {
        let mut field = LineField::with_text("stream name");
        field.handle_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        field.move_right();
        field.handle_key(&KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(field.text(), "s");
        field.handle_key(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn sanitizes_pasted_text() {
        let mut field = LineField::new();
        field.insert_str("one\ttwo\nthree");
        assert_eq!(field.text(), "one    two three");
    }
}
