//! Loading indicator — a small spinner + label centered in a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A "Loading data…" indicator with a spinning icon, shown until the
/// dataset arrives.
pub struct LoadingIndicator {
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl LoadingIndicator {
    fn label(&self) -> String {
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        format!("{frame} Loading data…")
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let label = self.label();
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width) / 2;
        let y = area.y + area.height / 2;

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, y, &line, area.width.min(label_width));
    }
}
