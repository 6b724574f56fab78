//! Component trait — the interface every screen element implements.
//!
//! Design principles:
//! - Components own their widget state (input buffers, hit areas) and render themselves.
//! - Components receive `AppState` (read-only) for session data they don't own.
//! - Components produce `Vec<Action>`; they never mutate shared state directly.
//! - The App event-loop dispatches those actions to the session model.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event. Returns actions to be dispatched.
    /// Only called when this component is the active screen (or overlay).
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Handle a mouse event. Returns actions to be dispatched.
    fn handle_mouse(&mut self, event: MouseEvent, state: &AppState) -> Vec<Action>;

    /// Receive an action dispatched by the App.
    /// Components can react to actions even when not visible.
    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}

/// True when a left-button press lands inside `r`.
pub fn clicked(event: &MouseEvent, r: Rect) -> bool {
    use ratatui::crossterm::event::{MouseButton, MouseEventKind};
    matches!(event.kind, MouseEventKind::Down(MouseButton::Left))
        && event.column >= r.x
        && event.column < r.x + r.width
        && event.row >= r.y
        && event.row < r.y + r.height
}
