//! Action enum — all user-initiated intents and internal events.

use lottie_proto::scan::ScannedCode;

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    PermissionScreen,
    Player,
    Scanner,
    Alert,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Scanning ─────────────────────────────────────────────────────────────
    ScanRequested,
    BackRequested,
    CodeScanned(ScannedCode),
    DismissAlert,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
