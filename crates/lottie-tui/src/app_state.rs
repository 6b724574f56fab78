//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for session data, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use std::path::PathBuf;
use std::time::Instant;

use lottie_proto::config::ScannerSource;
use lottie_proto::state::SessionState;

/// What the scanner source is doing, for the viewfinder caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerStatus {
    /// Not scanning.
    Stopped,
    /// zbarcam is running on `device`.
    Camera { device: PathBuf },
    /// Codes arrive as typed lines (keyboard-wedge scanner or manual entry).
    Keyboard,
    /// The camera decoder could not be started or has exited.
    Unavailable(String),
}

pub struct AppState {
    pub session: SessionState,
    pub scanner_source: ScannerSource,
    pub scanner_status: ScannerStatus,
    /// URL whose fetch is still in flight, if any.
    pub fetching: Option<String>,
    /// Playback origin of the current document (autoplay starts on load).
    pub playback_started: Option<Instant>,
    pub cache_dir: PathBuf,
    pub log_path: PathBuf,
}

impl AppState {
    pub fn new(scanner_source: ScannerSource, cache_dir: PathBuf, log_path: PathBuf) -> Self {
        Self {
            session: SessionState::new(),
            scanner_source,
            scanner_status: ScannerStatus::Stopped,
            fetching: None,
            playback_started: None,
            cache_dir,
            log_path,
        }
    }

    /// Seconds the current animation has been playing.
    pub fn playback_secs(&self) -> f64 {
        self.playback_started
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}
