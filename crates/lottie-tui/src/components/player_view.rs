//! PlayerView — the loaded animation, auto-playing and looping, plus the
//! "Scan QR" button.
//!
//! The canvas spans the full terminal width on a white background. With no
//! document loaded the canvas is simply left empty.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use lottie_proto::animation::AnimationDocument;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::{clicked, Component},
    theme::{style_button, style_canvas, C_INK, C_INK_MUTED, C_LAYER_ACTIVE, C_PLAYHEAD},
    widgets::progress_bar,
};

const SCAN_LABEL: &str = "▦  Scan QR";
const BUTTON_MIN_WIDTH: u16 = 15;
const BUTTON_HEIGHT: u16 = 3;

pub struct PlayerView {
    /// Last drawn button position, for mouse hit-testing.
    button_area: Rect,
}

impl PlayerView {
    pub fn new() -> Self {
        Self {
            button_area: Rect::default(),
        }
    }

    fn draw_animation(frame: &mut Frame, area: Rect, doc: &AnimationDocument, elapsed: f64) {
        frame.render_widget(Block::default().style(style_canvas()), area);
        if area.height == 0 {
            return;
        }

        let current = doc.frame_at(elapsed);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let mut header = vec![Span::styled(
            format!(" {}", doc.name().unwrap_or("untitled")),
            Style::default().fg(C_INK).add_modifier(Modifier::BOLD),
        )];
        let mut details = Vec::new();
        if let Some(v) = doc.version() {
            details.push(format!("v{}", v));
        }
        if let Some((w, h)) = doc.size() {
            details.push(format!("{}×{}", w, h));
        }
        details.push(format!("{} fps", doc.frame_rate()));
        details.push(format!("{:.1}s loop", doc.duration_secs()));
        header.push(Span::styled(
            format!("  ·  {}", details.join("  ·  ")),
            Style::default().fg(C_INK_MUTED),
        ));
        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

        let progress = (current - doc.in_point()) / doc.total_frames();
        progress_bar::draw_progress(
            frame,
            rows[1],
            progress,
            &format!(" f{:>5.0}", current.floor()),
            &format!("{:.0} ", doc.out_point()),
            Style::default().fg(C_PLAYHEAD),
            Style::default().fg(C_INK_MUTED),
        );

        let layers: Vec<Line> = doc
            .layers()
            .iter()
            .take(rows[3].height as usize)
            .map(|layer| {
                let (marker, style) = if layer.is_visible_at(current) {
                    ("●", Style::default().fg(C_LAYER_ACTIVE))
                } else {
                    ("○", Style::default().fg(C_INK_MUTED))
                };
                Line::from(Span::styled(
                    format!("  {} {} ({})", marker, layer.name, layer.kind.label()),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(layers), rows[3]);
    }

    fn draw_button(&mut self, frame: &mut Frame, area: Rect) {
        let width = (SCAN_LABEL.width() as u16 + 6)
            .max(BUTTON_MIN_WIDTH)
            .min(area.width);
        let height = BUTTON_HEIGHT.min(area.height);
        let button = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height,
        };
        self.button_area = button;

        let lines = vec![Line::from(""), Line::from(SCAN_LABEL), Line::from("")];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(style_button()),
            button,
        );
    }
}

impl Component for PlayerView {
    fn id(&self) -> ComponentId {
        ComponentId::Player
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Char('s') | KeyCode::Enter => vec![Action::ScanRequested],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _state: &AppState) -> Vec<Action> {
        if clicked(&event, self.button_area) {
            vec![Action::ScanRequested]
        } else {
            vec![]
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        if let Some(doc) = state.session.document() {
            Self::draw_animation(frame, rows[1], doc, state.playback_secs());
        }
        self.draw_button(frame, rows[3]);
    }
}
