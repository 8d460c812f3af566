//! Layout helpers — split the terminal area into regions and convert
//! between terminal cells and the engine's virtual pixels.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;

use crate::core::frame::Viewport;

/// Virtual pixels per terminal column.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Virtual pixels per terminal row.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Widest line of the pill heading, used for its slide measurement.
pub const PILL_TEXT_COLS: u16 = 12;

/// Primary screen layout: chrome rows around the horizontal track, plus a
/// bottom status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppLayout {
    /// Everything above the status bar; the transition covers all of it.
    pub stage_area: Rect,
    pub header_area: Rect,
    pub nav_area: Rect,
    pub track_area: Rect,
    pub footer_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),    // stage
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let stage = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header + welcome bar
                Constraint::Length(1), // timeline nav
                Constraint::Min(1),    // track
                Constraint::Length(1), // footer
            ])
            .split(outer[0]);

        Self {
            stage_area: outer[0],
            header_area: stage[0],
            nav_area: stage[1],
            track_area: stage[2],
            footer_area: stage[3],
            status_area: outer[1],
        }
    }

    /// Viewport handed to the engine.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: cols_to_px(self.track_area.width),
            text_width: Some(cols_to_px(PILL_TEXT_COLS)),
        }
    }
}

pub fn cols_to_px(cols: u16) -> f64 {
    f64::from(cols) * CELL_WIDTH_PX
}

/// Pixels to whole columns, rounded toward the nearest cell.
pub fn px_to_cols(px: f64) -> i32 {
    (px / CELL_WIDTH_PX).round() as i32
}

/// Does `(col, row)` fall inside `area`?
pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

/// Write `text` starting at column `x` (which may lie off-screen), clipped
/// to `area`.  Only the foreground style is merged into existing cells.
pub fn put_clipped(buf: &mut Buffer, area: Rect, x: i32, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.bottom() {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx < i32::from(area.x) {
            continue;
        }
        if cx >= i32::from(area.right()) {
            break;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_assigned() {
        let l = AppLayout::from_area(Rect::new(0, 0, 100, 30));
        assert_eq!(l.header_area, Rect::new(0, 0, 100, 1));
        assert_eq!(l.nav_area, Rect::new(0, 1, 100, 1));
        assert_eq!(l.track_area, Rect::new(0, 2, 100, 26));
        assert_eq!(l.footer_area, Rect::new(0, 28, 100, 1));
        assert_eq!(l.status_area, Rect::new(0, 29, 100, 1));
        assert_eq!(l.viewport().width, 800.0);
    }

    #[test]
    fn test_put_clipped_cuts_both_edges() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        put_clipped(&mut buf, area, -2, 0, "abcdefgh", Style::default());
        assert_eq!(buf, Buffer::with_lines(["cdefg"]));
        put_clipped(&mut buf, area, 0, 3, "zz", Style::default());
        assert_eq!(buf, Buffer::with_lines(["cdefg"]));
    }
}
