//! Blocking message box for rejected scans.
//!
//! While the session has an alert, this component captures all input; it is
//! dismissed with Enter, Esc, Space or a click.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ALERT_BG, C_ALERT_BORDER, C_ALERT_FG, C_BUTTON},
};

pub struct AlertModal;

impl AlertModal {
    pub fn new() -> Self {
        Self
    }
}

impl Component for AlertModal {
    fn id(&self) -> ComponentId {
        ComponentId::Alert
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => vec![Action::DismissAlert],
            // Consume everything else while open
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => vec![Action::DismissAlert],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(message) = state.session.alert() else {
            return;
        };

        let width = (message.chars().count() as u16 + 10).max(28).min(area.width);
        let height = 5u16.min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_ALERT_BORDER))
            .style(Style::default().bg(C_ALERT_BG).fg(C_ALERT_FG));
        let lines = vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[ OK ]",
                Style::default().fg(C_BUTTON).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            popup,
        );
    }
}
