//! Single-line text field.

use crossterm::event::KeyEvent;
use optin_tui_core::{is_backspace, printable_char, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::focus::ActiveToken;

/// A single-line text field.
///
/// Edits are only applied while a focus token is supplied. Every applied
/// edit returns the new value.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    placeholder: String,
}

impl TextInput {
    /// Create a field holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: String::new(),
        }
    }

    /// Set the text shown while the field is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply a key event. Returns the new value if the key edited it.
    ///
    /// Backspace removes the last character; printable characters append.
    /// Delete and Enter are ignored.
    pub fn handle_key(&mut self, key: &KeyEvent, token: Option<&ActiveToken>) -> Option<String> {
        token?;
        if is_backspace(key) {
            self.value.pop()?;
            return Some(self.value.clone());
        }
        let c = printable_char(key)?;
        self.value.push(c);
        Some(self.value.clone())
    }

    /// Append pasted text as a single edit, with line breaks removed.
    pub fn handle_paste(&mut self, text: &str, token: Option<&ActiveToken>) -> Option<String> {
        token?;
        let cleaned: String = text
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        self.value.push_str(&cleaned);
        Some(self.value.clone())
    }

    /// Render the field on one line.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let mut spans = vec![Span::styled("> ", theme.primary_style())];
        if self.value.is_empty() {
            if focused {
                spans.push(Span::styled("█", theme.text_style()));
            }
            spans.push(Span::styled(self.placeholder.as_str(), theme.dim_style()));
        } else {
            spans.push(Span::styled(self.value.as_str(), theme.text_style()));
            if focused {
                spans.push(Span::styled("█", theme.text_style()));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{FocusCoordinator, FocusZone};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn token() -> Option<ActiveToken> {
        FocusCoordinator::new().token(FocusZone::OptIn)
    }

    #[test]
    fn test_typing_concatenates_in_order() {
        let mut input = TextInput::default();
        let token = token();
        let mut changes = Vec::new();
        for c in "a@b.com".chars() {
            changes.extend(input.handle_key(&key(KeyCode::Char(c)), token.as_ref()));
        }
        assert_eq!(input.value(), "a@b.com");
        assert_eq!(changes.len(), 7);
        assert_eq!(changes.last().map(String::as_str), Some("a@b.com"));
    }

    #[test]
    fn test_backspace() {
        let mut input = TextInput::new("ab");
        let token = token();
        assert_eq!(input.handle_key(&key(KeyCode::Backspace), token.as_ref()), Some("a".to_string()));
        assert_eq!(input.handle_key(&key(KeyCode::Backspace), token.as_ref()), Some(String::new()));
        assert_eq!(input.handle_key(&key(KeyCode::Backspace), token.as_ref()), None);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_delete_and_enter_are_ignored() {
        let mut input = TextInput::new("abc");
        let token = token();
        assert_eq!(input.handle_key(&key(KeyCode::Delete), token.as_ref()), None);
        assert_eq!(input.handle_key(&key(KeyCode::Enter), token.as_ref()), None);
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_control_and_meta_chords_are_ignored() {
        let mut input = TextInput::default();
        let token = token();
        let ctrl = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        let shift = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);
        assert_eq!(input.handle_key(&ctrl, token.as_ref()), None);
        assert_eq!(input.handle_key(&alt, token.as_ref()), None);
        assert_eq!(input.handle_key(&shift, token.as_ref()), Some("C".to_string()));
    }

    #[test]
    fn test_unfocused_never_mutates() {
        let mut input = TextInput::new("keep");
        for code in [KeyCode::Char('x'), KeyCode::Backspace, KeyCode::Delete, KeyCode::Enter] {
            assert_eq!(input.handle_key(&key(code), None), None);
        }
        assert_eq!(input.handle_paste("pasted", None), None);
        assert_eq!(input.value(), "keep");
    }

    #[test]
    fn test_paste_strips_line_breaks() {
        let mut input = TextInput::new("a");
        let token = token();
        assert_eq!(
            input.handle_paste("@b.\r\ncom\n", token.as_ref()),
            Some("a@b.com".to_string())
        );
        assert_eq!(input.handle_paste("\n", token.as_ref()), None);
    }
}
