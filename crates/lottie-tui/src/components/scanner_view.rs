//! ScannerView — full-screen viewfinder with a Back control and the
//! keyboard-wedge input line.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use lottie_proto::config::ScannerSource;
use lottie_proto::scan::ScannedCode;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, ScannerStatus},
    component::{clicked, Component},
    theme::{style_viewfinder, C_MUTED, C_TOAST_WARNING, C_VIEWFINDER_FG, C_VIEWFINDER_FRAME},
    widgets::scan_input::{ScanInput, ScanInputAction},
};

/// Offset of the Back control from the top-left corner.
const BACK_OFFSET_X: u16 = 3;
const BACK_OFFSET_Y: u16 = 1;
const BACK_LABEL: &str = "‹ Back";

pub struct ScannerView {
    input: ScanInput,
    back_area: Rect,
}

impl ScannerView {
    pub fn new() -> Self {
        Self {
            input: ScanInput::default(),
            back_area: Rect::default(),
        }
    }

    fn caption(state: &AppState) -> Vec<Line<'static>> {
        let hint = Style::default().fg(C_MUTED);
        match &state.scanner_status {
            ScannerStatus::Camera { device } => vec![
                Line::from(Span::styled(
                    "Point the camera at a QR code",
                    Style::default().fg(C_VIEWFINDER_FG),
                )),
                Line::from(Span::styled(format!("zbarcam · {}", device.display()), hint)),
            ],
            ScannerStatus::Keyboard => vec![
                Line::from(Span::styled(
                    "Scan with a keyboard scanner",
                    Style::default().fg(C_VIEWFINDER_FG),
                )),
                Line::from(Span::styled("or type the code below", hint)),
            ],
            ScannerStatus::Unavailable(reason) => vec![
                Line::from(Span::styled(
                    "Camera decoder unavailable",
                    Style::default().fg(C_TOAST_WARNING),
                )),
                Line::from(Span::styled(reason.clone(), hint)),
                Line::from(Span::styled("type the code below", hint)),
            ],
            ScannerStatus::Stopped => Vec::new(),
        }
    }

    fn viewfinder_rect(area: Rect) -> Rect {
        let width = (area.width * 3 / 5).max(20).min(area.width);
        let height = (area.height * 3 / 5).max(5).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Component for ScannerView {
    fn id(&self) -> ComponentId {
        ComponentId::Scanner
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match self.input.handle_key(key) {
            ScanInputAction::Submitted(data) => {
                vec![Action::CodeScanned(ScannedCode::keyboard(data))]
            }
            ScanInputAction::Cancelled => vec![Action::BackRequested],
            ScanInputAction::None => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _state: &AppState) -> Vec<Action> {
        if clicked(&event, self.back_area) {
            vec![Action::BackRequested]
        } else {
            vec![]
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ScanRequested = action {
            self.input.clear();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        // Viewfinder layer
        frame.render_widget(Block::default().style(style_viewfinder()), area);

        let finder = Self::viewfinder_rect(area);
        let title = match state.scanner_source {
            ScannerSource::Zbarcam => " camera ",
            ScannerSource::Keyboard => " keyboard ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(C_VIEWFINDER_FRAME))
            .title(title);
        let inner = block.inner(finder);
        frame.render_widget(block, finder);

        let caption = Self::caption(state);
        let top_pad = inner.height.saturating_sub(caption.len() as u16) / 2;
        let caption_area = Rect {
            y: inner.y + top_pad,
            height: inner.height - top_pad,
            ..inner
        };
        frame.render_widget(
            Paragraph::new(caption)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            caption_area,
        );

        if area.height >= 3 {
            let input_area = Rect {
                x: area.x + 2,
                y: area.y + area.height - 2,
                width: area.width.saturating_sub(4),
                height: 1,
            };
            self.input.draw(frame, input_area);
        }

        // Controls above the viewfinder layer
        let back = Rect {
            x: area.x + BACK_OFFSET_X.min(area.width),
            y: area.y + BACK_OFFSET_Y.min(area.height),
            width: (BACK_LABEL.chars().count() as u16)
                .min(area.width.saturating_sub(BACK_OFFSET_X)),
            height: 1.min(area.height.saturating_sub(BACK_OFFSET_Y)),
        };
        self.back_area = back;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                BACK_LABEL,
                Style::default()
                    .fg(C_VIEWFINDER_FG)
                    .add_modifier(Modifier::BOLD),
            ))),
            back,
        );
    }
}
