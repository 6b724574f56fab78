//! PermissionScreen — plain text shown until (or instead of) camera access.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use lottie_proto::state::Permission;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_BG, C_INK},
};

pub const REQUESTING_MESSAGE: &str = "Requesting for camera permission";
pub const DENIED_MESSAGE: &str = "No access to camera";

pub struct PermissionScreen;

impl PermissionScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn message(permission: Permission) -> Option<&'static str> {
        match permission {
            Permission::Unknown => Some(REQUESTING_MESSAGE),
            Permission::Denied => Some(DENIED_MESSAGE),
            Permission::Granted => None,
        }
    }
}

impl Component for PermissionScreen {
    fn id(&self) -> ComponentId {
        ComponentId::PermissionScreen
    }

    // No interactivity beyond the global quit keys.
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(text) = Self::message(state.session.permission()) else {
            return;
        };
        frame.render_widget(
            Paragraph::new(Line::from(text)).style(Style::default().fg(C_INK).bg(C_BG)),
            area,
        );
    }
}
