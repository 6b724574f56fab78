//! Centered popup with the keyboard shortcut reference.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_OVERLAY_BG, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        // Any key closes the overlay
        vec![Action::ToggleHelp]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(_) if self.visible => vec![Action::ToggleHelp],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::ToggleHelp => self.toggle(),
            // Any scanner transition returns to a fresh view
            Action::ScanRequested | Action::BackRequested | Action::CodeScanned(_) => self.hide(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if !self.visible {
            return;
        }

        let popup = centered_rect(60, 18, area);

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" player"),
            help_row("s / enter / click", "scan a QR code"),
            help_row("? / F1", "toggle this help"),
            help_row("q", "quit"),
            Line::from(""),
            section(" scanner"),
            help_row("type + enter", "submit a code (keyboard scanner)"),
            help_row("esc / click ‹ Back", "clear line, then back to player"),
            help_row("F1", "toggle this help"),
            help_row("ctrl-c", "quit"),
            Line::from(""),
            section(" files"),
            help_row("cache", &state.cache_dir.display().to_string()),
            help_row("log", &state.log_path.display().to_string()),
        ];

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .title(Span::styled(" help ", Style::default().fg(C_SECONDARY)));
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(block)
                .style(Style::default().fg(C_PRIMARY).bg(C_OVERLAY_BG))
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row(keys: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", keys), Style::default().fg(C_SECONDARY)),
        Span::styled(desc.to_string(), Style::default().fg(C_PRIMARY)),
    ])
}

/// Rect of at most `width`×`height` cells centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
