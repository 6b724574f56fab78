//! Smooth Unicode progress bar, used for the animation playhead.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a bar filled to `progress` (0.0..=1.0) with optional side labels.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    progress: f64,
    left_label: &str,
    right_label: &str,
    style: Style,
    label_style: Style,
) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let label_w = (left_label.chars().count() + right_label.chars().count() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    let mut spans = Vec::new();
    if !left_label.is_empty() {
        spans.push(Span::styled(format!("{} ", left_label), label_style));
    }
    spans.push(Span::styled(bar_cells(progress, bar_w), style));
    if !right_label.is_empty() {
        spans.push(Span::styled(format!(" {}", right_label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Eighth-block fill of `width` cells.
fn bar_cells(progress: f64, width: usize) -> String {
    let eighths = (progress.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..full_blocks.min(width) {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}
