//! The horizontal track: every content section laid side by side and
//! translated by the displayed scroll offset.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::core::motion::ElementMotion;
use crate::core::range::Rgb;
use crate::core::section::SectionSpec;

use super::layout::{cols_to_px, px_to_cols, put_clipped};
use super::theme::Theme;

/// Left padding inside each section, in columns.
const SECTION_PADDING: i32 = 4;
/// Rows between two copy elements.
const ELEMENT_SPACING: u16 = 2;

pub struct TrackWidget<'a> {
    pub sections: &'a [SectionSpec],
    /// Per-section element motion, indexed like `sections`.
    pub motions: &'a [Vec<ElementMotion>],
    /// Displayed scroll offset in virtual pixels.
    pub offset_px: f64,
}

impl Widget for TrackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        if area.width == 0 || area.height == 0 {
            return;
        }

        let viewport_px = cols_to_px(area.width);
        let mut left_px = -self.offset_px;
        for (i, section) in self.sections.iter().enumerate() {
            let width_px = section.width_factor.max(0.0) * viewport_px;
            let x = i32::from(area.x) + px_to_cols(left_px);
            let width = px_to_cols(width_px);
            left_px += width_px;

            let visible = x < i32::from(area.right()) && x + width > i32::from(area.x);
            if !visible {
                continue;
            }
            let motions = self.motions.get(i).map(Vec::as_slice).unwrap_or(&[]);
            render_section(section, motions, x, area, buf);
        }
    }
}

fn render_section(section: &SectionSpec, motions: &[ElementMotion], x: i32, area: Rect, buf: &mut Buffer) {
    // Divider on the section's left edge.
    if x >= i32::from(area.x) && x < i32::from(area.right()) {
        let divider = Style::default().fg(Theme::color(Theme::SAGE));
        for y in area.top()..area.bottom() {
            put_clipped(buf, area, x, y, "│", divider);
        }
    }

    let caption = format!("{}  {}", section.short_label, section.label);
    put_clipped(
        buf,
        area,
        x + SECTION_PADDING,
        area.y,
        &caption,
        Style::default().fg(Theme::color(Theme::MUTED)),
    );

    let lines = section.copy.len() as u16;
    let block_height = lines.saturating_sub(1) * ELEMENT_SPACING + 1;
    let top = area.y + area.height.saturating_sub(block_height) / 2;

    for (i, text) in section.copy.iter().enumerate() {
        let motion = motions.get(i).copied().unwrap_or(ElementMotion::REST);
        if motion.opacity <= 0.01 {
            continue;
        }
        let (fg, base) = element_look(i);
        let style = Theme::blurred(base.fg(Theme::faded(fg, Theme::SNOW, motion.opacity)), motion.blur);
        let y = top + i as u16 * ELEMENT_SPACING;
        put_clipped(buf, area, x + SECTION_PADDING + px_to_cols(motion.offset_x), y, text, style);
    }
}

/// Label, headline, then body text.
fn element_look(index: usize) -> (Rgb, Style) {
    match index {
        0 => (Theme::MUTED, Style::default()),
        1 => (Theme::SEED_GREEN, Theme::headline_style()),
        _ => (Theme::INK, Style::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::default_sections;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn rest(sections: &[SectionSpec]) -> Vec<Vec<ElementMotion>> {
        sections.iter().map(|s| vec![ElementMotion::REST; s.elements()]).collect()
    }

    #[test]
    fn test_first_section_at_rest() {
        let sections = default_sections();
        let motions = rest(&sections);
        let area = Rect::new(0, 0, 60, 9);
        let mut buf = Buffer::empty(area);
        TrackWidget {
            sections: &sections,
            motions: &motions,
            offset_px: 0.0,
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("01  First 7 Days"));
        // Three elements centred around the middle row, two rows apart.
        assert!(row_text(&buf, 2).contains("During Your"));
        assert!(row_text(&buf, 4).contains("First 7 Days"));
        assert_eq!(buf[(0, 4)].symbol(), "│");
    }

    #[test]
    fn test_offset_scrolls_next_section_into_view() {
        let sections = default_sections();
        let motions = rest(&sections);
        let area = Rect::new(0, 0, 60, 9);
        let mut buf = Buffer::empty(area);
        TrackWidget {
            sections: &sections,
            motions: &motions,
            offset_px: cols_to_px(60),
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("02  Weeks 2~4"));
        assert!(!row_text(&buf, 0).contains("First 7 Days"));
    }

    #[test]
    fn test_invisible_elements_are_skipped() {
        let sections = default_sections();
        let mut motions = rest(&sections);
        motions[0][0].opacity = 0.0;
        let area = Rect::new(0, 0, 60, 9);
        let mut buf = Buffer::empty(area);
        TrackWidget {
            sections: &sections,
            motions: &motions,
            offset_px: 0.0,
        }
        .render(area, &mut buf);

        assert!(!row_text(&buf, 2).contains("During Your"));
    }
}
