pub mod alert_modal;
pub mod help_overlay;
pub mod permission_screen;
pub mod player_view;
pub mod scanner_view;
