//! Bottom line with the mode label and keybindings.
//!
//! Styled dark-on-light in player mode and light-on-dark in scanner mode,
//! following the screen behind it.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use lottie_proto::state::Mode;

use crate::theme::{style_status_dark, style_status_light};

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: Mode, fetching: bool) {
    let (label, keys, style) = match mode {
        Mode::Idle => (
            if fetching { "LOADING" } else { "PLAYER" },
            " s/Enter scan QR  ? help  q quit",
            style_status_dark(),
        ),
        Mode::Scanning => (
            "SCANNER",
            " type/scan + Enter submit  Esc back  F1 help  Ctrl-C quit",
            style_status_light(),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::styled(keys, style),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), area);
}
