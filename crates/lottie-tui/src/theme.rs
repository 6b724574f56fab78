//! Color palette and style constants for the lottiescan TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(255, 255, 255);
pub const C_CANVAS: Color = Color::Rgb(255, 255, 255);
pub const C_INK: Color = Color::Rgb(24, 24, 32);
pub const C_INK_MUTED: Color = Color::Rgb(150, 150, 165);
pub const C_BUTTON: Color = Color::Rgb(0x3a, 0x93, 0xff);
pub const C_BUTTON_FG: Color = Color::Rgb(255, 255, 255);
pub const C_LAYER_ACTIVE: Color = Color::Rgb(0x3a, 0x93, 0xff);
pub const C_PLAYHEAD: Color = Color::Rgb(0x3a, 0x93, 0xff);
pub const C_VIEWFINDER: Color = Color::Rgb(0, 0, 0);
pub const C_VIEWFINDER_FG: Color = Color::Rgb(255, 255, 255);
pub const C_VIEWFINDER_FRAME: Color = Color::Rgb(200, 200, 210);
pub const C_MUTED: Color = Color::Rgb(110, 110, 128);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_OVERLAY_BG: Color = Color::Rgb(18, 18, 18);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_ALERT_BG: Color = Color::Rgb(245, 245, 248);
pub const C_ALERT_FG: Color = Color::Rgb(24, 24, 32);
pub const C_ALERT_BORDER: Color = Color::Rgb(255, 95, 95);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

/// Status strip in player mode: dark content on the light app background.
pub fn style_status_dark() -> Style {
    Style::default().fg(C_INK).bg(C_BG)
}

/// Status strip in scanner mode: light content over the black viewfinder.
pub fn style_status_light() -> Style {
    Style::default().fg(C_VIEWFINDER_FG).bg(C_VIEWFINDER)
}

pub fn style_button() -> Style {
    Style::default()
        .fg(C_BUTTON_FG)
        .bg(C_BUTTON)
        .add_modifier(Modifier::BOLD)
}

pub fn style_canvas() -> Style {
    Style::default().fg(C_INK).bg(C_CANVAS)
}

pub fn style_viewfinder() -> Style {
    Style::default().fg(C_VIEWFINDER_FG).bg(C_VIEWFINDER)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}
