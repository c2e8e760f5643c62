//! Single-choice selector.

use crossterm::event::{KeyCode, KeyEvent};
use optin_tui_core::{is_enter, Theme};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::focus::ActiveToken;

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioItem<T> {
    pub label: String,
    pub value: T,
}

impl<T> RadioItem<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Layout and navigation keys of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// One item per line, Up/Down (k/j) move the highlight.
    #[default]
    Vertical,
    /// Items on one line, Left/Right (h/l) move the highlight.
    Horizontal,
}

/// A list of options with one highlighted entry.
///
/// Enter confirms the highlighted option. Without a focus token the
/// selector ignores every key.
#[derive(Debug, Clone)]
pub struct RadioSelect<T> {
    items: Vec<RadioItem<T>>,
    highlighted: usize,
    orientation: Orientation,
}

impl<T: Copy + PartialEq> RadioSelect<T> {
    /// Create a selector highlighting the first item.
    pub fn new(items: Vec<RadioItem<T>>, orientation: Orientation) -> Self {
        Self {
            items,
            highlighted: 0,
            orientation,
        }
    }

    /// Highlight the item holding `value`, or the first item if none does.
    pub fn with_value(mut self, value: T) -> Self {
        self.highlighted = self.index_of(value).unwrap_or(0);
        self
    }

    fn index_of(&self, value: T) -> Option<usize> {
        self.items.iter().position(|item| item.value == value)
    }

    pub fn items(&self) -> &[RadioItem<T>] {
        &self.items
    }

    /// Index of the highlighted item.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Value of the highlighted item.
    pub fn highlighted_value(&self) -> Option<T> {
        self.items.get(self.highlighted).map(|item| item.value)
    }

    fn move_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.highlighted = if self.highlighted == 0 {
            self.items.len() - 1
        } else {
            self.highlighted - 1
        };
    }

    fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.highlighted = (self.highlighted + 1) % self.items.len();
    }

    /// Handle a key event. Returns Some(value) when an option is confirmed.
    pub fn handle_key(&mut self, key: &KeyEvent, token: Option<&ActiveToken>) -> Option<T> {
        token?;
        if is_enter(key) {
            return self.highlighted_value();
        }
        match (self.orientation, key.code) {
            (Orientation::Vertical, KeyCode::Up | KeyCode::Char('k'))
            | (Orientation::Horizontal, KeyCode::Left | KeyCode::Char('h')) => self.move_up(),
            (Orientation::Vertical, KeyCode::Down | KeyCode::Char('j'))
            | (Orientation::Horizontal, KeyCode::Right | KeyCode::Char('l')) => self.move_down(),
            // Number keys jump to an item
            (_, KeyCode::Char(c @ '1'..='9')) => {
                let index = c as usize - '1' as usize;
                if index < self.items.len() {
                    self.highlighted = index;
                }
            }
            _ => {}
        }
        None
    }

    /// Number of rows the selector needs.
    pub fn height(&self) -> u16 {
        match self.orientation {
            Orientation::Vertical => self.items.len() as u16,
            Orientation::Horizontal => 1,
        }
    }

    fn item_spans(&self, index: usize, theme: &Theme, focused: bool) -> Vec<Span<'_>> {
        let item = &self.items[index];
        let (marker, style) = if index == self.highlighted {
            let style = if focused {
                theme.selected_style()
            } else {
                theme.text_style()
            };
            ("● ", style)
        } else {
            ("○ ", theme.dim_style())
        };
        let marker_style = if focused && index == self.highlighted {
            theme.highlight_style()
        } else {
            Style::default().fg(theme.text_muted)
        };
        vec![
            Span::styled(marker, marker_style),
            Span::styled(item.label.as_str(), style),
        ]
    }

    /// Render the selector.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let lines: Vec<Line> = match self.orientation {
            Orientation::Vertical => (0..self.items.len())
                .map(|i| Line::from(self.item_spans(i, theme, focused)))
                .collect(),
            Orientation::Horizontal => {
                let mut spans = Vec::new();
                for i in 0..self.items.len() {
                    if i > 0 {
                        spans.push(Span::raw("   "));
                    }
                    spans.extend(self.item_spans(i, theme, focused));
                }
                vec![Line::from(spans)]
            }
        };
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{FocusCoordinator, FocusZone};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn yes_no() -> RadioSelect<bool> {
        RadioSelect::new(
            vec![RadioItem::new("Yes", true), RadioItem::new("No", false)],
            Orientation::Vertical,
        )
    }

    fn token() -> Option<ActiveToken> {
        FocusCoordinator::new().token(FocusZone::OptIn)
    }

    #[test]
    fn test_with_value_sets_initial_highlight() {
        assert_eq!(yes_no().with_value(false).highlighted(), 1);
        assert_eq!(yes_no().with_value(true).highlighted(), 0);
    }

    #[test]
    fn test_highlight_wraps() {
        let mut select = yes_no();
        let token = token();
        assert_eq!(select.handle_key(&key(KeyCode::Up), token.as_ref()), None);
        assert_eq!(select.highlighted(), 1);
        select.handle_key(&key(KeyCode::Char('j')), token.as_ref());
        assert_eq!(select.highlighted(), 0);
    }

    #[test]
    fn test_enter_emits_highlighted_value() {
        let mut select = yes_no();
        let token = token();
        select.handle_key(&key(KeyCode::Down), token.as_ref());
        assert_eq!(select.handle_key(&key(KeyCode::Enter), token.as_ref()), Some(false));
    }

    #[test]
    fn test_horizontal_uses_left_right() {
        let mut select = RadioSelect::new(
            vec![RadioItem::new("Yes", true), RadioItem::new("No", false)],
            Orientation::Horizontal,
        );
        let token = token();
        select.handle_key(&key(KeyCode::Down), token.as_ref());
        assert_eq!(select.highlighted(), 0);
        select.handle_key(&key(KeyCode::Right), token.as_ref());
        assert_eq!(select.highlighted(), 1);
        select.handle_key(&key(KeyCode::Char('l')), token.as_ref());
        assert_eq!(select.highlighted(), 0);
    }

    #[test]
    fn test_number_keys_jump() {
        let mut select = yes_no();
        let token = token();
        assert_eq!(select.handle_key(&key(KeyCode::Char('2')), token.as_ref()), None);
        assert_eq!(select.highlighted(), 1);
        select.handle_key(&key(KeyCode::Char('9')), token.as_ref());
        assert_eq!(select.highlighted(), 1);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut select = yes_no();
        for code in [KeyCode::Down, KeyCode::Char('2'), KeyCode::Enter] {
            assert_eq!(select.handle_key(&key(code), None), None);
        }
        assert_eq!(select.highlighted(), 0);
    }
}
