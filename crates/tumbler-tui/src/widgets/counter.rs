//! Odometer rendering
//!
//! Every digit column is a window one cell tall onto its scroller. Attached
//! slots are drawn bottom to top at their offset rounded to whole rows and
//! clipped to the cell, so a scrolling digit slides through the window. With
//! the overlay on, the first and last row of each column are dimmed.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tumbler_core::counter::DigitCounter;
use tumbler_core::NumberCounter;

use crate::theme::Theme;

/// Blank column between adjacent parts
const GAP: u16 = 1;

pub struct CounterWidget;

impl CounterWidget {
    pub fn render(frame: &mut Frame, area: Rect, counter: &NumberCounter, theme: &Theme) {
        let block = Block::default()
            .title(" tumbler ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey1))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        Self::draw(frame.buffer_mut(), inner, counter, theme);
    }

    /// Draw the counter centered in `area`
    pub fn draw(buf: &mut Buffer, area: Rect, counter: &NumberCounter, theme: &Theme) {
        let parts = layout_parts(counter);
        let width = parts
            .iter()
            .fold(0u16, |total, part| total.saturating_add(part.width()).saturating_add(GAP))
            .saturating_sub(GAP);
        let height = counter.cell_height();
        if area.width == 0 || area.height == 0 || parts.is_empty() {
            return;
        }

        let left = area.x + area.width.saturating_sub(width) / 2;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let middle = top.saturating_add(height / 2);
        let cell = Rect::new(left, top, width.min(area.width), height.min(area.height));

        let mut x = left;
        for part in &parts {
            if x >= area.right() {
                break;
            }
            match part {
                Part::Text(text, style) => {
                    if middle < area.bottom() {
                        let max = (area.right() - x) as usize;
                        buf.set_stringn(x, middle, text, max, style.bg(theme.bg0));
                    }
                }
                Part::Digit(index, _) => {
                    let width = part.width().min(area.right() - x);
                    let column = Rect::new(x, cell.y, width, cell.height);
                    draw_digit(buf, column, &counter.digits()[*index], height, theme);
                }
            }
            x = x.saturating_add(part.width()).saturating_add(GAP);
        }
    }
}

enum Part {
    Text(String, Style),
    Digit(usize, u16),
}

impl Part {
    fn width(&self) -> u16 {
        match self {
            Part::Text(text, _) => columns(text.width()),
            Part::Digit(_, width) => *width,
        }
    }
}

fn columns(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn layout_parts(counter: &NumberCounter) -> Vec<Part> {
    let mut parts = Vec::new();
    if counter.digits().is_empty() {
        return parts;
    }

    if counter.is_negative() {
        parts.push(Part::Text("-".into(), Style::default().add_modifier(Modifier::BOLD)));
    }
    if let Some(prefix) = counter.prefix() {
        parts.push(Part::Text(prefix.into(), Style::default()));
    }
    for (index, digit) in counter.digits().iter().enumerate() {
        if counter.separator_position() == Some(index) {
            parts.push(Part::Text(counter.separator().into(), Style::default()));
        }
        parts.push(Part::Digit(index, columns(digit.width())));
    }
    if let Some(suffix) = counter.suffix() {
        parts.push(Part::Text(suffix.into(), Style::default()));
    }
    parts
}

fn draw_digit(
    buf: &mut Buffer,
    column: Rect,
    digit: &DigitCounter,
    cell_height: u16,
    theme: &Theme,
) {
    let scroller = digit.scroller();
    let label_style = Style::default()
        .fg(theme.digit)
        .bg(theme.bg0)
        .add_modifier(Modifier::BOLD);
    let middle = i64::from(cell_height / 2);

    for slot in scroller.visible() {
        let row = middle + slot.offset().round() as i64;
        if row < 0 || row >= i64::from(column.height) {
            continue;
        }
        let y = column.y + row as u16;
        buf.set_stringn(column.x, y, slot.item().text(), column.width as usize, label_style);
    }

    if scroller.has_overlay() && column.height >= 3 {
        let dim = Style::default().fg(theme.overlay).add_modifier(Modifier::DIM);
        for y in [column.y, column.bottom() - 1] {
            for x in column.left()..column.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(dim);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use tumbler_core::{CounterConfig, ScrollConfig};

    fn counter(config: CounterConfig) -> NumberCounter {
        let scroll = ScrollConfig {
            duration_ms: 1000,
            ..Default::default()
        };
        NumberCounter::new(&config, &scroll).unwrap()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_draws_settled_value_on_middle_row() {
        let mut counter = counter(CounterConfig {
            decimal_places: 1,
            prefix: Some("$".into()),
            ..Default::default()
        });
        counter.set_value(-4.2, false, Instant::now()).unwrap();

        let area = Rect::new(0, 0, 11, 3);
        let mut buf = Buffer::empty(area);
        CounterWidget::draw(&mut buf, area, &counter, &Theme::default());

        assert_eq!(row(&buf, 1), " - $ 4 . 2 ");
        assert_eq!(row(&buf, 0).trim(), "");
        assert_eq!(row(&buf, 2).trim(), "");
    }

    #[test]
    fn test_scrolling_digit_slides_through_cell() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig {
            cell_height: 3,
            overlay: false,
            ..Default::default()
        });
        counter.set_value(0.0, false, now).unwrap();
        counter.set_value(1.0, true, now).unwrap();

        // A third of the way through: slot 0 is one row below rest, slot 1 two rows above
        counter.tick(now + Duration::from_millis(333));
        let area = Rect::new(0, 0, 1, 3);
        let mut buf = Buffer::empty(area);
        CounterWidget::draw(&mut buf, area, &counter, &Theme::default());

        assert_eq!(row(&buf, 2), "0");
        assert_eq!(row(&buf, 1), " ");

        counter.tick(now + Duration::from_millis(1000));
        let area = Rect::new(0, 0, 1, 3);
        let mut buf = Buffer::empty(area);
        CounterWidget::draw(&mut buf, area, &counter, &Theme::default());
        assert_eq!(row(&buf, 1), "1");
        assert_eq!(row(&buf, 2), " ");
    }

    #[test]
    fn test_overlay_dims_edge_rows() {
        let mut counter = counter(CounterConfig::default());
        counter.set_value(5.0, false, Instant::now()).unwrap();

        let area = Rect::new(0, 0, 1, 3);
        let mut buf = Buffer::empty(area);
        CounterWidget::draw(&mut buf, area, &counter, &Theme::default());

        assert!(buf[(0, 0)].modifier.contains(Modifier::DIM));
        assert!(buf[(0, 2)].modifier.contains(Modifier::DIM));
        assert!(!buf[(0, 1)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_oversized_affixes_are_clipped() {
        let mut counter = counter(CounterConfig {
            prefix: Some("<".repeat(70_000)),
            suffix: Some(">".repeat(70_000)),
            ..Default::default()
        });
        counter.set_value(7.0, false, Instant::now()).unwrap();

        let area = Rect::new(0, 0, 9, 3);
        let mut buf = Buffer::empty(area);
        CounterWidget::draw(&mut buf, area, &counter, &Theme::default());

        assert_eq!(row(&buf, 1), "<<<<<<<<<");
    }

    #[test]
    fn test_empty_counter_draws_nothing() {
        let counter = counter(CounterConfig::default());
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        CounterWidget::draw(&mut buf, area, &counter, &Theme::default());
        assert_eq!(row(&buf, 1), "     ");
    }
}
