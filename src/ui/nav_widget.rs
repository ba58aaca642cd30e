//! Year navigation bar: `← Previous Year`, the current year, `Next Year →`.
//!
//! Button geometry is computed by [`NavButtons::layout`] so the renderer and
//! the mouse handler agree on where each button sits.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::core::navigator::Navigation;

use super::theme::Theme;

const PREVIOUS_LABEL: &str = " ← Previous Year ";
const NEXT_LABEL: &str = " Next Year → ";
const YEAR_WIDTH: u16 = 8;
const GAP: u16 = 2;

/// Screen rectangles of the three navigation elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    pub previous: Rect,
    pub year: Rect,
    pub next: Rect,
}

impl NavButtons {
    /// Center the buttons on the middle row of `area`.
    pub fn layout(area: Rect) -> Self {
        let prev_w = label_width(PREVIOUS_LABEL);
        let next_w = label_width(NEXT_LABEL);
        let total = prev_w + GAP + YEAR_WIDTH + GAP + next_w;

        let x = area.x + area.width.saturating_sub(total) / 2;
        let y = area.y + area.height / 2;
        let h = u16::from(area.height > 0);

        let clip = |r: Rect| r.intersection(area);
        let previous = clip(Rect::new(x, y, prev_w, h));
        let year = clip(Rect::new(x + prev_w + GAP, y, YEAR_WIDTH, h));
        let next = clip(Rect::new(x + prev_w + GAP + YEAR_WIDTH + GAP, y, next_w, h));

        Self { previous, year, next }
    }
}

fn label_width(label: &str) -> u16 {
    label.chars().count() as u16
}

/// The navigation bar widget.
pub struct NavBar<'a> {
    pub nav: Navigation<'a>,
}

impl<'a> Widget for NavBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let buttons = NavButtons::layout(area);

        let style = |enabled: bool| -> Style {
            if enabled {
                Theme::button_style()
            } else {
                Theme::button_disabled_style()
            }
        };

        draw(buf, buttons.previous, PREVIOUS_LABEL, style(self.nav.has_previous()));
        draw(buf, buttons.next, NEXT_LABEL, style(self.nav.has_next()));

        let year = self.nav.current().map_or_else(|| "—".to_string(), |y| y.to_string());
        let width = buttons.year.width as usize;
        draw(buf, buttons.year, &format!("{year:^width$}"), Theme::nav_year_style());
    }
}

fn draw(buf: &mut Buffer, rect: Rect, text: &str, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    buf.set_style(rect, style);
    buf.set_stringn(rect.x, rect.y, text, rect.width as usize, style);
}
