//! Custom Ratatui widget that renders the ranked countries as horizontal
//! bars under a "World Population By Year" heading.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use super::theme::Theme;

pub const HEADING: &str = "World Population By Year";

/// Partial-cell bar ends, indexed by eighths (1..=7).
const EIGHTHS: [&str; 8] = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];
const FULL: &str = "█";

/// Widest name column before names are truncated.
const MAX_NAME_WIDTH: usize = 20;

// ───────────────────────────────────────── row model ─────────

/// One rendered bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub name: String,
    pub population: u64,
    /// Bar length as a fraction of the bar column (0.0 ..= 1.0).
    pub fraction: f64,
    pub color: Color,
}

// ───────────────────────────────────────── widget ────────────

/// The chart widget itself — created fresh each frame.
pub struct ChartWidget<'a> {
    year: Option<i32>,
    rows: &'a [ChartRow],
    /// Horizontal slide displacement applied to everything below the heading.
    offset: i32,
    block: Option<Block<'a>>,
}

impl<'a> ChartWidget<'a> {
    pub fn new(year: Option<i32>, rows: &'a [ChartRow]) -> Self {
        Self {
            year,
            rows,
            offset: 0,
            block: None,
        }
    }

    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Draw the year label and bars into `buf`, which is sized to the body.
    fn render_body(&self, buf: &mut Buffer) {
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        let year_label = self.year.map_or_else(|| "—".to_string(), |y| y.to_string());
        let year_line = Line::from(Span::styled(year_label, Theme::year_style())).centered();
        year_line.render(Rect::new(area.x, area.y, area.width, 1), buf);

        let top = area.y + 2;
        let available = area.height.saturating_sub(2) as usize;

        if self.rows.is_empty() {
            if available > 0 && self.year.is_none() {
                Line::from(Span::styled("No data", Theme::muted_style()))
                    .centered()
                    .render(Rect::new(area.x, top, area.width, 1), buf);
            }
            return;
        }

        // Leave a spacer line between bars when there is room for it.
        let stride = if available >= self.rows.len() * 2 { 2 } else { 1 };

        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_NAME_WIDTH);
        let labels: Vec<String> = self.rows.iter().map(|r| format_population(r.population)).collect();
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let bar_columns = (area.width as usize).saturating_sub(name_width + 1 + label_width + 1);

        for (i, (row, label)) in self.rows.iter().zip(&labels).enumerate() {
            let offset = i * stride;
            if offset >= available {
                break;
            }
            let y = top + offset as u16;

            let name = fit_name(&row.name, name_width);
            let mut spans = vec![
                Span::styled(format!("{name:>name_width$} "), Theme::country_style()),
            ];
            let bar = bar_glyphs(row.fraction, bar_columns);
            spans.push(Span::styled(bar, Style::default().fg(row.color)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label.clone(), Theme::population_style()));

            buf.set_line(area.x, y, &Line::from(spans), area.width);
        }
    }
}

impl<'a> Widget for ChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Line::from(Span::styled(HEADING, Theme::heading_style()))
            .centered()
            .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);

        if inner.height <= 2 {
            return;
        }
        let body = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);

        // Draw into a scratch buffer, then blit it shifted by the slide
        // offset so content clips cleanly at the pane edges.
        let mut scratch = Buffer::empty(body);
        self.render_body(&mut scratch);

        for y in body.top()..body.bottom() {
            for x in body.left()..body.right() {
                let src_x = i32::from(x) - self.offset;
                if src_x < i32::from(body.left()) || src_x >= i32::from(body.right()) {
                    continue;
                }
                if let (Some(src), Some(dst)) = (scratch.cell((src_x as u16, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Bar glyphs for `fraction` of `columns` cells, at eighth-cell precision.
fn bar_glyphs(fraction: f64, columns: usize) -> String {
    let eighths = (fraction.clamp(0.0, 1.0) * columns as f64 * 8.0).round() as usize;
    let full = eighths / 8;
    let partial = eighths % 8;

    let mut bar = FULL.repeat(full);
    bar.push_str(EIGHTHS[partial]);
    bar
}

/// Truncate `name` to `width` characters, marking the cut with `…`.
fn fit_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut out: String = name.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Population with `,` thousands separators (`1411100000` → `1,411,100,000`).
pub fn format_population(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, population: u64, fraction: f64) -> ChartRow {
        ChartRow {
            name: name.to_string(),
            population,
            fraction,
            color: Color::Blue,
        }
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(1_411_100_000), "1,411,100,000");
        assert_eq!(format_population(123_456), "123,456");
    }

    #[test]
    fn bar_glyph_widths() {
        assert_eq!(bar_glyphs(0.0, 10), "");
        assert_eq!(bar_glyphs(1.0, 4), "████");
        assert_eq!(bar_glyphs(0.5, 3), "█▌");
        assert_eq!(bar_glyphs(2.0, 2).chars().count(), 2);
        assert_eq!(bar_glyphs(0.5, 0), "");
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(fit_name("Chad", 10), "Chad");
        assert_eq!(fit_name("Democratic Republic", 8), "Democra…");
    }

    #[test]
    fn renders_heading_year_and_bars() {
        let rows = vec![row("China", 1_400, 0.9), row("Japan", 125, 0.08)];
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        ChartWidget::new(Some(2020), &rows).render(area, &mut buf);

        assert!(line(&buf, 0).contains(HEADING));
        assert!(line(&buf, 2).contains("2020"));

        let china = line(&buf, 4);
        assert!(china.starts_with("China █"), "{china:?}");
        assert!(china.contains("1,400"));
        // Enough room for a spacer line between bars.
        assert!(line(&buf, 5).trim().is_empty());
        let japan = line(&buf, 6);
        assert!(japan.starts_with("Japan "), "{japan:?}");
        assert!(japan.contains("125"));
    }

    #[test]
    fn top_bar_is_longest() {
        let rows = vec![row("A", 100, 0.9), row("B", 50, 0.45)];
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        ChartWidget::new(Some(1990), &rows).render(area, &mut buf);

        let count = |s: String| s.matches(FULL).count();
        assert!(count(line(&buf, 4)) > count(line(&buf, 6)));
    }

    #[test]
    fn slide_offset_shifts_the_body_but_not_the_heading() {
        let rows = vec![row("China", 1_400, 0.9)];
        let area = Rect::new(0, 0, 40, 6);

        let mut still = Buffer::empty(area);
        ChartWidget::new(Some(2000), &rows).render(area, &mut still);
        let mut shifted = Buffer::empty(area);
        ChartWidget::new(Some(2000), &rows).offset(5).render(area, &mut shifted);

        assert_eq!(line(&still, 0), line(&shifted, 0));
        assert!(line(&shifted, 4).starts_with("     China"));
        assert_eq!(&line(&shifted, 4)[5..], &line(&still, 4)[..line(&still, 4).len() - 5]);
    }

    #[test]
    fn empty_chart_shows_placeholder() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        ChartWidget::new(None, &[]).render(area, &mut buf);
        assert!(line(&buf, 4).contains("No data"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let rows = vec![row("China", 1_400, 0.9)];
        for (w, h) in [(0, 0), (1, 1), (5, 2), (3, 3)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            ChartWidget::new(Some(2000), &rows).render(area, &mut buf);
        }
    }
}
