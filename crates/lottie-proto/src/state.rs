//! Session state and its update function.
//!
//! The event loop owns one `SessionState`. Every input (permission result,
//! button press, recognized code, fetch completion) goes through
//! [`SessionState::update`], which mutates the state and returns the side
//! effects the caller must carry out. Nothing else writes to it.

use tracing::{debug, info, warn};

use crate::animation::AnimationDocument;
use crate::error::FetchError;
use crate::scan::{ScannedCode, REJECTED_MESSAGE};

/// Camera authorization, resolved once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Player view.
    #[default]
    Idle,
    /// Scanner view.
    Scanning,
}

/// Inputs to [`SessionState::update`].
#[derive(Debug)]
pub enum SessionEvent {
    PermissionResolved(bool),
    /// "Scan QR" pressed.
    ScanRequested,
    /// "Back" pressed in the scanner view.
    BackRequested,
    CodeScanned(ScannedCode),
    AlertDismissed,
    FetchFinished {
        url: String,
        result: Result<AnimationDocument, FetchError>,
    },
}

/// Work the caller performs after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartScanner,
    StopScanner,
    Fetch(String),
    Alert(String),
}

#[derive(Debug, Default)]
pub struct SessionState {
    permission: Permission,
    mode: Mode,
    source_url: Option<String>,
    document: Option<AnimationDocument>,
    alert: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_scanning(&self) -> bool {
        self.mode == Mode::Scanning
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn document(&self) -> Option<&AnimationDocument> {
        self.document.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn update(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::PermissionResolved(granted) => {
                if self.permission != Permission::Unknown {
                    debug!("ignoring repeated permission result");
                    return Vec::new();
                }
                self.permission = if granted {
                    Permission::Granted
                } else {
                    Permission::Denied
                };
                info!("camera permission: {:?}", self.permission);
                Vec::new()
            }

            // Scanning UI exists only behind a granted permission.
            _ if self.permission != Permission::Granted => Vec::new(),

            SessionEvent::ScanRequested => {
                if self.mode == Mode::Scanning {
                    return Vec::new();
                }
                self.mode = Mode::Scanning;
                self.source_url = None;
                self.document = None;
                vec![Effect::StartScanner]
            }

            SessionEvent::BackRequested => {
                if self.mode != Mode::Scanning {
                    return Vec::new();
                }
                self.mode = Mode::Idle;
                self.alert = None;
                vec![Effect::StopScanner]
            }

            SessionEvent::CodeScanned(code) => self.on_code(code),

            SessionEvent::AlertDismissed => {
                self.alert = None;
                Vec::new()
            }

            SessionEvent::FetchFinished { url, result } => {
                if self.source_url.as_deref() != Some(url.as_str()) {
                    debug!("discarding fetch result for superseded url {}", url);
                    return Vec::new();
                }
                match result {
                    Ok(doc) => self.document = Some(doc),
                    Err(e) => warn!("failed to load {}: {}", url, e),
                }
                Vec::new()
            }
        }
    }

    fn on_code(&mut self, code: ScannedCode) -> Vec<Effect> {
        if self.mode != Mode::Scanning {
            debug!("ignoring {} code outside scanning mode", code.kind);
            return Vec::new();
        }
        if self.alert.is_some() {
            debug!("ignoring {} code while alert is open", code.kind);
            return Vec::new();
        }
        if !code.is_accepted() {
            info!("rejected {} code {:?}", code.kind, code.data);
            self.alert = Some(REJECTED_MESSAGE.to_string());
            return vec![Effect::Alert(REJECTED_MESSAGE.to_string())];
        }

        info!("accepted {} code {}", code.kind, code.data);
        self.mode = Mode::Idle;
        self.source_url = Some(code.data.clone());
        vec![Effect::StopScanner, Effect::Fetch(code.data)]
    }
}
