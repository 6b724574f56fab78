//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks
//!   (terminal input, the permission probe, fetch results); a second one carries
//!   `ScannerEvent`s from the zbarcam driver.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Actions become `SessionEvent`s; `SessionState::update` returns the effects
//!   (start/stop scanner, fetch, alert) the App then carries out.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use lottie_proto::animation::AnimationDocument;
use lottie_proto::cache::{self, CacheStore, Downloader, HttpDownloader};
use lottie_proto::config::{Config, ScannerConfig, ScannerSource};
use lottie_proto::error::FetchError;
use lottie_proto::loader;
use lottie_proto::platform;
use lottie_proto::state::{Effect, Permission, SessionEvent};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, ScannerStatus},
    component::Component,
    components::{
        alert_modal::AlertModal, help_overlay::HelpOverlay, permission_screen::PermissionScreen,
        player_view::PlayerView, scanner_view::ScannerView,
    },
    permission,
    scanner::{self, ScannerEvent, ScannerHandle},
    theme::C_BG,
    widgets::{status_bar, toast::ToastManager},
};

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    PermissionResolved(bool),
    FetchFinished {
        /// Matches `App::fetch_generation` for the newest fetch.
        generation: u64,
        url: String,
        result: Result<AnimationDocument, FetchError>,
    },
}

/// Animation redraw cadence while a document is playing.
const PLAYER_FPS: u64 = 25;

/// How long the input reader blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

pub struct App<D = HttpDownloader> {
    state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    permission_screen: PermissionScreen,
    player: PlayerView,
    scanner_view: ScannerView,
    alert: AlertModal,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    // ── Fetch pipeline ────────────────────────────────────────────────────────
    store: CacheStore,
    downloader: D,
    fetch_generation: u64,

    // ── Scanner source ────────────────────────────────────────────────────────
    scanner_config: ScannerConfig,
    /// zbarcam binary, resolved once at startup.
    decoder: Option<PathBuf>,
    scanner: Option<ScannerHandle>,
    scanner_session: u64,
    scanner_tx: mpsc::Sender<ScannerEvent>,
    scanner_rx: Option<mpsc::Receiver<ScannerEvent>>,

    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    should_quit: bool,
}

impl<D> App<D>
where
    D: Downloader + Clone + Send + Sync + 'static,
{
    pub fn new(config: &Config, downloader: D, log_path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel(1024);
        let (scanner_tx, scanner_rx) = mpsc::channel(64);
        let decoder = match config.scanner.source {
            ScannerSource::Zbarcam => platform::find_zbarcam_binary(),
            ScannerSource::Keyboard => None,
        };
        Self {
            state: AppState::new(config.scanner.source, config.cache.dir.clone(), log_path),
            permission_screen: PermissionScreen::new(),
            player: PlayerView::new(),
            scanner_view: ScannerView::new(),
            alert: AlertModal::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            store: CacheStore::new(config.cache.dir.clone()),
            downloader,
            fetch_generation: 0,
            scanner_config: config.scanner.clone(),
            decoder,
            scanner: None,
            scanner_session: 0,
            scanner_tx,
            scanner_rx: Some(scanner_rx),
            tx,
            rx: Some(rx),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let (Some(mut rx), Some(mut scanner_rx)) = (self.rx.take(), self.scanner_rx.take()) else {
            anyhow::bail!("event loop already started");
        };

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || pump_events(event_tx, poll_terminal));

        self.request_permission();

        // Toast expiry + spinner animation
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut player_tick = tokio::time::interval(Duration::from_millis(1000 / PLAYER_FPS));
        player_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        while !self.should_quit {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            needs_redraw = tokio::select! {
                Some(msg) = rx.recv() => self.handle_message(msg),

                Some(ev) = scanner_rx.recv() => self.handle_scanner_event(ev),

                _ = toast_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    had_toasts
                }

                _ = player_tick.tick() => {
                    self.state.session.document().is_some() && !self.state.session.is_scanning()
                }
            };
        }

        // Dropping the receiver stops the input reader on its next poll
        drop(rx);

        // ── Teardown ──────────────────────────────────────────────────────────
        self.stop_scanner();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("lottiescan exiting");

        Ok(())
    }

    /// Spawn the one-shot camera permission probe.
    fn request_permission(&self) {
        let scanner = self.scanner_config.clone();
        let decoder = self.decoder.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let granted = permission::request_camera_access(&scanner, decoder.as_deref()).await;
            let _ = tx.send(AppMessage::PermissionResolved(granted)).await;
        });
    }

    // ── Message handler ───────────────────────────────────────────────────────

    /// Returns `true` if the message requires a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    for a in self.handle_key(key) {
                        self.dispatch(a);
                    }
                }
                Event::Mouse(mouse) => {
                    for a in self.handle_mouse(mouse) {
                        self.dispatch(a);
                    }
                }
                Event::Resize(w, h) => self.dispatch(Action::Resize(w, h)),
                _ => return false,
            },

            AppMessage::PermissionResolved(granted) => {
                self.apply_session(SessionEvent::PermissionResolved(granted));
            }

            AppMessage::FetchFinished {
                generation,
                url,
                result,
            } => {
                // Failures stay silent; the player just shows no animation.
                if generation == self.fetch_generation {
                    self.state.fetching = None;
                    self.toast.dismiss_spinner();
                }
                self.apply_session(SessionEvent::FetchFinished { url, result });
            }
        }
        true
    }

    fn handle_scanner_event(&mut self, ev: ScannerEvent) -> bool {
        match ev {
            ScannerEvent::Code { session, code } => {
                if self.scanner.is_none() || session != self.scanner_session {
                    debug!("dropping {} code from stale scanner session {}", code.kind, session);
                    return false;
                }
                self.dispatch(Action::CodeScanned(code));
                true
            }
            ScannerEvent::Exited { session, detail } => {
                if self.scanner.as_ref().map(ScannerHandle::session) != Some(session) {
                    return false;
                }
                self.scanner = None;
                self.state.scanner_status = ScannerStatus::Unavailable(detail.clone());
                self.toast.warning(detail);
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let scanning = self.state.session.is_scanning();

        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            // In the scanner view 'q' is text for the input line
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE && !scanning => {
                return vec![Action::Quit];
            }
            _ => {}
        }

        let (target, state) = self.focused();
        let id = target.id();
        match key.code {
            KeyCode::F(1) if matches!(id, ComponentId::Player | ComponentId::Scanner) => {
                return vec![Action::ToggleHelp];
            }
            KeyCode::Char('?') if id == ComponentId::Player => return vec![Action::ToggleHelp],
            _ => {}
        }
        target.handle_key(key, state)
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(_)) {
            return vec![];
        }
        let (target, state) = self.focused();
        debug!("mouse down at {},{} → {:?}", event.column, event.row, target.id());
        target.handle_mouse(event, state)
    }

    /// The topmost layer on screen; it receives all input.
    fn focused(&mut self) -> (&mut dyn Component, &AppState) {
        let state = &self.state;
        let target: &mut dyn Component = if state.session.permission() != Permission::Granted {
            &mut self.permission_screen
        } else if state.session.alert().is_some() {
            // The alert blocks everything underneath it
            &mut self.alert
        } else if self.help_overlay.visible {
            &mut self.help_overlay
        } else if state.session.is_scanning() {
            &mut self.scanner_view
        } else {
            &mut self.player
        };
        (target, state)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.scanner_view.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            Action::ScanRequested => self.apply_session(SessionEvent::ScanRequested),
            Action::BackRequested => self.apply_session(SessionEvent::BackRequested),
            Action::CodeScanned(code) => self.apply_session(SessionEvent::CodeScanned(code)),
            Action::DismissAlert => self.apply_session(SessionEvent::AlertDismissed),
            // Visibility lives in the overlay itself (see on_action)
            Action::ToggleHelp => {}
            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => debug!("terminal resized to {}x{}", w, h),
        }
    }

    /// Feed `event` to the session model and carry out the resulting effects.
    fn apply_session(&mut self, event: SessionEvent) {
        let had_document = self.state.session.document().is_some();
        let effects = self.state.session.update(event);
        match (had_document, self.state.session.document().is_some()) {
            (false, true) => self.state.playback_started = Some(Instant::now()),
            (_, false) => self.state.playback_started = None,
            _ => {}
        }
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartScanner => self.start_scanner(),
            Effect::StopScanner => self.stop_scanner(),
            Effect::Fetch(url) => self.spawn_fetch(url),
            Effect::Alert(message) => info!("alert: {}", message),
        }
    }

    fn start_scanner(&mut self) {
        self.stop_scanner();
        self.scanner_session += 1;

        self.state.scanner_status = match self.scanner_config.source {
            ScannerSource::Keyboard => ScannerStatus::Keyboard,
            ScannerSource::Zbarcam => match self.decoder.clone() {
                None => {
                    warn!("zbarcam not found; falling back to keyboard entry");
                    self.toast.warning("zbarcam not found");
                    ScannerStatus::Unavailable("zbarcam not found".to_string())
                }
                Some(binary) => {
                    let device = self.scanner_config.device.clone();
                    match scanner::spawn(
                        binary,
                        device.clone(),
                        self.scanner_session,
                        self.scanner_tx.clone(),
                    ) {
                        Ok(handle) => {
                            self.scanner = Some(handle);
                            self.toast.info(format!("camera on {}", device.display()));
                            ScannerStatus::Camera { device }
                        }
                        Err(e) => {
                            warn!("failed to start zbarcam: {}", e);
                            self.toast.warning("could not start zbarcam");
                            ScannerStatus::Unavailable(e.to_string())
                        }
                    }
                }
            },
        };
    }

    fn stop_scanner(&mut self) {
        if let Some(handle) = self.scanner.take() {
            handle.stop();
        }
        self.state.scanner_status = ScannerStatus::Stopped;
    }

    /// Run fetch → cache → parse in the background. Never cancelled; the
    /// session discards the result if `url` is no longer current.
    fn spawn_fetch(&mut self, url: String) {
        let label = match cache::file_name(&url) {
            "" => url.clone(),
            name => name.to_string(),
        };
        self.toast.spinner(format!("fetching {}", label));
        self.state.fetching = Some(url.clone());
        self.fetch_generation += 1;
        let generation = self.fetch_generation;

        let store = self.store.clone();
        let downloader = self.downloader.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = loader::load(&store, &downloader, &url).await;
            let _ = tx
                .send(AppMessage::FetchFinished {
                    generation,
                    url,
                    result,
                })
                .await;
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        if self.state.session.permission() != Permission::Granted {
            self.permission_screen.draw(frame, area, &self.state);
            return;
        }

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        if self.state.session.is_scanning() {
            self.scanner_view.draw(frame, outer[0], &self.state);
        } else {
            self.player.draw(frame, outer[0], &self.state);
        }
        status_bar::draw_keys_bar(
            frame,
            outer[1],
            self.state.session.mode(),
            self.state.fetching.is_some(),
        );

        self.alert.draw(frame, area, &self.state);
        self.help_overlay.draw(frame, area, &self.state);
        self.toast.draw(frame, area);
    }
}

// ── Terminal input ────────────────────────────────────────────────────────────

/// Forward terminal events to `tx` until the receiving side goes away.
fn pump_events(
    tx: mpsc::Sender<AppMessage>,
    mut next: impl FnMut(Duration) -> io::Result<Option<Event>>,
) {
    while !tx.is_closed() {
        match next(INPUT_POLL) {
            Ok(Some(ev)) => {
                if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("terminal input failed: {}", e);
                break;
            }
        }
    }
    debug!("input reader stopped");
}

fn poll_terminal(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::path::Path;

    use lottie_proto::scan::{ScannedCode, REJECTED_MESSAGE};
    use lottie_proto::state::Mode;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::MouseButton;

    use crate::components::permission_screen::{DENIED_MESSAGE, REQUESTING_MESSAGE};

    const ANIM: &str = r#"{"v":1,"nm":"x-anim","fr":30,"ip":0,"op":30,"layers":[{"nm":"dot","ty":4}]}"#;

    #[derive(Clone)]
    enum MockDownloader {
        Body(&'static str),
        Fail,
    }

    impl Downloader for MockDownloader {
        fn download(
            &self,
            url: &str,
            dest: &Path,
        ) -> impl Future<Output = lottie_proto::error::Result<u64>> + Send {
            let mock = self.clone();
            let url = url.to_string();
            let dest = dest.to_path_buf();
            async move {
                match mock {
                    MockDownloader::Body(body) => {
                        tokio::fs::write(&dest, body)
                            .await
                            .map_err(|source| FetchError::Write { path: dest, source })?;
                        Ok(body.len() as u64)
                    }
                    MockDownloader::Fail => Err(FetchError::Status { url, status: 503 }),
                }
            }
        }
    }

    fn app(downloader: MockDownloader) -> (App<MockDownloader>, tempfile::TempDir) {
        app_with_source(ScannerSource::Keyboard, downloader)
    }

    fn app_with_source(
        source: ScannerSource,
        downloader: MockDownloader,
    ) -> (App<MockDownloader>, tempfile::TempDir) {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.scanner.source = source;
        config.cache.dir = tmp.path().join("lotties");
        let app = App::new(&config, downloader, tmp.path().join("test.log"));
        (app, tmp)
    }

    /// Draw once and return the cell where `text` starts, if on screen.
    fn locate(app: &mut App<MockDownloader>, text: &str) -> Option<(u16, u16)> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        for y in 0..buffer.area.height {
            let cells: Vec<&str> = (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            for x in 0..cells.len() {
                if cells[x..].concat().starts_with(text) {
                    return Some((x as u16, y));
                }
            }
        }
        None
    }

    fn click(app: &mut App<MockDownloader>, (column, row): (u16, u16)) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_message(AppMessage::Event(Event::Mouse(mouse)));
    }

    fn render(app: &mut App<MockDownloader>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn press(app: &mut App<MockDownloader>, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        app.handle_message(AppMessage::Event(Event::Key(key)));
    }

    fn type_line(app: &mut App<MockDownloader>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    async fn next_message(app: &mut App<MockDownloader>) -> AppMessage {
        let rx = app.rx.as_mut().unwrap();
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_permission_shows_request_message() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        let screen = render(&mut app);
        assert!(screen.contains(REQUESTING_MESSAGE));
        assert!(!screen.contains("Scan QR"));
    }

    #[tokio::test]
    async fn denied_permission_never_reaches_player_or_scanner() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(false));

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        let screen = render(&mut app);
        assert!(screen.contains(DENIED_MESSAGE));
        assert!(!screen.contains("Scan QR"));
        assert!(!screen.contains("Back"));
        assert_eq!(app.state.session.mode(), Mode::Idle);
    }

    #[tokio::test]
    async fn keyboard_source_is_granted_at_startup() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.request_permission();
        let msg = next_message(&mut app).await;
        assert!(matches!(msg, AppMessage::PermissionResolved(true)));
    }

    #[tokio::test]
    async fn scan_fetch_and_play() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        assert!(render(&mut app).contains("Scan QR"));

        press(&mut app, KeyCode::Char('s'));
        assert!(app.state.session.is_scanning());
        assert!(render(&mut app).contains("Back"));

        type_line(&mut app, "https://x.test/anim.json");
        assert_eq!(app.state.session.mode(), Mode::Idle);
        assert_eq!(app.state.session.source_url(), Some("https://x.test/anim.json"));
        assert_eq!(app.state.fetching.as_deref(), Some("https://x.test/anim.json"));

        let msg = next_message(&mut app).await;
        app.handle_message(msg);

        let doc = app.state.session.document().expect("document loaded");
        assert_eq!(doc.name(), Some("x-anim"));
        assert!(app.state.playback_started.is_some());
        assert!(app.state.fetching.is_none());

        let screen = render(&mut app);
        assert!(screen.contains("x-anim"));
        assert!(screen.contains("dot"));
        assert!(screen.contains("Scan QR"));
    }

    #[tokio::test]
    async fn failed_download_renders_empty_player() {
        let (mut app, _tmp) = app(MockDownloader::Fail);
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));
        type_line(&mut app, "https://x.test/anim.json");

        let msg = next_message(&mut app).await;
        assert!(matches!(
            msg,
            AppMessage::FetchFinished { result: Err(_), .. }
        ));
        app.handle_message(msg);

        assert!(app.state.session.document().is_none());
        assert!(app.state.playback_started.is_none());
        let screen = render(&mut app);
        assert!(screen.contains("Scan QR"));
        assert!(!screen.contains("x-anim"));
    }

    #[tokio::test]
    async fn rejected_scan_blocks_with_alert() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));

        type_line(&mut app, "hello");
        assert!(app.state.session.is_scanning());
        assert!(render(&mut app).contains(REJECTED_MESSAGE));

        // Typing is swallowed by the alert
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(app.state.session.alert().is_none());
        assert!(app.state.session.is_scanning());
        assert!(!render(&mut app).contains(REJECTED_MESSAGE));
    }

    #[tokio::test]
    async fn rescanning_clears_loaded_document() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));
        type_line(&mut app, "https://x.test/anim.json");
        let msg = next_message(&mut app).await;
        app.handle_message(msg);
        assert!(app.state.session.document().is_some());

        press(&mut app, KeyCode::Char('s'));
        assert!(app.state.session.document().is_none());
        assert_eq!(app.state.session.source_url(), None);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.session.mode(), Mode::Idle);
        assert!(!render(&mut app).contains("x-anim"));
    }

    #[tokio::test]
    async fn stale_scanner_codes_are_dropped() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));

        let redraw = app.handle_scanner_event(ScannerEvent::Code {
            session: 99,
            code: lottie_proto::scan::ScannedCode::new("QR-Code", "https://x.test/a.json"),
        });
        assert!(!redraw);
        assert!(app.state.session.is_scanning());
    }

    #[tokio::test]
    async fn q_quits_from_player_but_types_in_scanner() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc); // clear the typed 'q'
        press(&mut app, KeyCode::Esc); // back to player
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn clicking_scan_button_and_back() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));

        let button = locate(&mut app, "Scan QR").expect("button drawn");
        click(&mut app, button);
        assert!(app.state.session.is_scanning());

        // Clicks off the Back control do nothing
        click(&mut app, (79, 12));
        assert!(app.state.session.is_scanning());

        let back = locate(&mut app, "Back").expect("back control drawn");
        click(&mut app, back);
        assert_eq!(app.state.session.mode(), Mode::Idle);
        assert!(locate(&mut app, "Scan QR").is_some());
    }

    #[tokio::test]
    async fn missing_decoder_falls_back_to_keyboard_entry() {
        let (mut app, _tmp) = app_with_source(ScannerSource::Zbarcam, MockDownloader::Body(ANIM));
        app.decoder = None;
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));

        assert!(app.state.session.is_scanning());
        assert!(matches!(
            app.state.scanner_status,
            ScannerStatus::Unavailable(_)
        ));
        assert!(!app.toast.is_empty());
        let screen = render(&mut app);
        assert!(screen.contains("Camera decoder unavailable"));
        assert!(screen.contains("zbarcam not found"));

        type_line(&mut app, "https://x.test/anim.json");
        assert_eq!(app.state.session.mode(), Mode::Idle);
        assert_eq!(app.state.session.source_url(), Some("https://x.test/anim.json"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn decoder_exit_shows_unavailable_and_keeps_keyboard() {
        let (mut app, _tmp) = app_with_source(ScannerSource::Zbarcam, MockDownloader::Body(ANIM));
        // Exits at once without output, like a zbarcam that lost its camera
        app.decoder = Some(PathBuf::from("false"));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));
        assert!(matches!(
            app.state.scanner_status,
            ScannerStatus::Camera { .. }
        ));
        assert!(render(&mut app).contains("camera on"));
        let session = app.scanner_session;

        let rx = app.scanner_rx.as_mut().unwrap();
        let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(ev, ScannerEvent::Exited { session: s, .. } if s == session));
        assert!(app.handle_scanner_event(ev));

        assert!(app.scanner.is_none());
        assert!(matches!(
            app.state.scanner_status,
            ScannerStatus::Unavailable(_)
        ));
        assert!(app.state.session.is_scanning());
        assert!(render(&mut app).contains("Camera decoder unavailable"));

        type_line(&mut app, "https://x.test/anim.json");
        assert_eq!(app.state.session.source_url(), Some("https://x.test/anim.json"));
    }

    #[tokio::test]
    async fn typed_payload_is_stored_verbatim() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));
        type_line(&mut app, "https://x.test/a.json  ");
        assert_eq!(app.state.session.source_url(), Some("https://x.test/a.json  "));
    }

    #[tokio::test]
    async fn accepted_code_closes_help() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::F(1));
        assert!(app.help_overlay.visible);

        app.dispatch(Action::CodeScanned(ScannedCode::new(
            "QR-Code",
            "https://x.test/anim.json",
        )));
        assert_eq!(app.state.session.mode(), Mode::Idle);
        assert!(!app.help_overlay.visible);
    }

    #[tokio::test]
    async fn spinner_stays_until_newest_fetch_finishes() {
        let (mut app, _tmp) = app(MockDownloader::Body(ANIM));
        app.handle_message(AppMessage::PermissionResolved(true));
        let url = "https://x.test/anim.json";
        for _ in 0..2 {
            press(&mut app, KeyCode::Char('s'));
            type_line(&mut app, url);
        }
        assert_eq!(app.fetch_generation, 2);

        app.handle_message(AppMessage::FetchFinished {
            generation: 1,
            url: url.to_string(),
            result: Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            }),
        });
        assert!(app.toast.has_spinner());
        assert_eq!(app.state.fetching.as_deref(), Some(url));

        app.handle_message(AppMessage::FetchFinished {
            generation: 2,
            url: url.to_string(),
            result: loader::parse(ANIM),
        });
        assert!(!app.toast.has_spinner());
        assert!(app.state.fetching.is_none());
        assert!(app.state.session.document().is_some());
    }

    #[test]
    fn input_reader_stops_once_receiver_is_gone() {
        let (tx, mut rx) = mpsc::channel(4);
        let reader = std::thread::spawn(move || {
            let mut sent = false;
            pump_events(tx, |timeout| {
                if !sent {
                    sent = true;
                    return Ok(Some(Event::FocusGained));
                }
                std::thread::sleep(timeout / 10);
                Ok(None)
            })
        });

        assert!(matches!(
            rx.blocking_recv(),
            Some(AppMessage::Event(Event::FocusGained))
        ));
        drop(rx);
        reader.join().unwrap();
    }

    #[test]
    fn input_reader_stops_on_terminal_error() {
        let (tx, _rx) = mpsc::channel(4);
        pump_events(tx, |_| Err(io::Error::other("tty gone")));
    }
}
