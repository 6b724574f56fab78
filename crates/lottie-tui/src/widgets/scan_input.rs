//! ScanInput — wraps tui-input as the keyboard-wedge line in the scanner view.
//!
//! USB/Bluetooth HID scanners type the decoded payload followed by Enter, so
//! the same line serves both hardware scanners and manual entry.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_input, C_MUTED};

#[derive(Debug, PartialEq)]
pub enum ScanInputAction {
    /// Enter pressed with a non-empty line.
    Submitted(String),
    /// Esc on an empty line.
    Cancelled,
    None,
}

pub struct ScanInput {
    input: Input,
    placeholder: String,
}

impl ScanInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Esc behaviour:
    ///   - If the line has text: clear it
    ///   - If the line is already empty: emit `Cancelled`
    pub fn handle_key(&mut self, key: KeyEvent) -> ScanInputAction {
        match key.code {
            KeyCode::Esc => {
                if self.input.value().is_empty() {
                    ScanInputAction::Cancelled
                } else {
                    self.input = Input::default();
                    ScanInputAction::None
                }
            }
            KeyCode::Enter => {
                // Submitted verbatim; the payload is stored as recognized.
                let value = self.input.value().to_string();
                self.input = Input::default();
                if value.is_empty() {
                    ScanInputAction::None
                } else {
                    ScanInputAction::Submitted(value)
                }
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                ScanInputAction::None
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("▸ {}", self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::raw(format!("▸ {}", visible))
        };

        frame.render_widget(Paragraph::new(Line::from(display)).style(style_input()), area);

        if !value.is_empty() && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for ScanInput {
    fn default() -> Self {
        Self::new("type or scan a code, Enter to submit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut ScanInput, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut input = ScanInput::default();
        type_str(&mut input, "https://x.test/a.json");
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            ScanInputAction::Submitted("https://x.test/a.json".into())
        );
        assert!(input.text().is_empty());
    }

    #[test]
    fn enter_on_empty_line_does_nothing() {
        let mut input = ScanInput::default();
        assert_eq!(input.handle_key(key(KeyCode::Enter)), ScanInputAction::None);
    }

    #[test]
    fn submitted_text_is_not_trimmed() {
        let mut input = ScanInput::default();
        type_str(&mut input, "https://x.test/a.json  ");
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            ScanInputAction::Submitted("https://x.test/a.json  ".into())
        );
    }

    #[test]
    fn esc_clears_then_cancels() {
        let mut input = ScanInput::default();
        type_str(&mut input, "abc");
        assert_eq!(input.handle_key(key(KeyCode::Esc)), ScanInputAction::None);
        assert!(input.text().is_empty());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), ScanInputAction::Cancelled);
    }
}
