//! Fullscreen clouds → pill → globe overlay.
//!
//! Layers are painted back to front: globe, globe content, the clouds
//! mask, then the initial text and the pill text on top.  Everything is a
//! straight read of [`TransitionState`]; no layer keeps its own state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::range::Rgb;
use crate::core::transition::TransitionState;

use super::layout::{px_to_cols, put_clipped, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use super::theme::Theme;

pub const INITIAL_TEXT: &[&str] = &["Your Health.", "Our Shared World."];
pub const PILL_TEXT: &[&str] = &["The", "human-planet", "axis."];
pub const GLOBE_BODY: &[&str] = &[
    "CO2 emissions from international shipping have roughly",
    "doubled since 1990.",
    "",
    "As we expand worldwide, we lessen our impact through our",
    "Sustainable Refill Program and continuous innovation.",
    "",
    "→ Engage to Learn More",
];

/// Layers below this opacity are not painted at all.
const MIN_VISIBLE: f64 = 0.02;

pub struct TransitionOverlay<'a> {
    pub state: &'a TransitionState,
    /// Animation clock for the globe's surface, in frames.
    pub spin: u64,
}

impl Widget for TransitionOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.state;
        if !s.active || area.width == 0 || area.height == 0 {
            return;
        }

        if s.globe.opacity > MIN_VISIBLE {
            paint_globe(s, self.spin, area, buf);
        }
        if s.globe_content.opacity > MIN_VISIBLE {
            paint_globe_content(s, area, buf);
        }
        if s.mask.visible && s.mask.opacity > MIN_VISIBLE {
            paint_clouds(s, area, buf);
        }

        let backdrop = if s.mask.opacity > MIN_VISIBLE {
            Theme::SKY.over(Theme::SNOW, s.mask.opacity)
        } else {
            Theme::SNOW
        };
        if s.initial_text.opacity > MIN_VISIBLE {
            let style = Style::default()
                .fg(Theme::faded(Rgb::WHITE, backdrop, s.initial_text.opacity))
                .add_modifier(Modifier::BOLD);
            paint_centered_lines(INITIAL_TEXT, 0, Theme::blurred(style, s.initial_text.blur), area, buf);
        }
        if s.pill_text.opacity > MIN_VISIBLE {
            let style = Style::default()
                .fg(Theme::faded(s.pill_text.color, backdrop, s.pill_text.opacity))
                .add_modifier(Modifier::BOLD);
            paint_centered_lines(
                PILL_TEXT,
                px_to_cols(s.pill_text.offset_x),
                Theme::blurred(style, s.pill_text.blur),
                area,
                buf,
            );
        }
    }
}

/// Cell centre relative to the centre of `area`, in virtual pixels.
fn offset_px(area: Rect, x: u16, y: u16) -> (f64, f64) {
    let dx = (f64::from(x - area.x) + 0.5 - f64::from(area.width) / 2.0) * CELL_WIDTH_PX;
    let dy = (f64::from(y - area.y) + 0.5 - f64::from(area.height) / 2.0) * CELL_HEIGHT_PX;
    (dx, dy)
}

/// Is `(dx, dy)` inside a `half_w × half_h` rectangle with corner radius `r`?
fn inside_rounded(dx: f64, dy: f64, half_w: f64, half_h: f64, r: f64) -> bool {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax > half_w || ay > half_h {
        return false;
    }
    let r = r.min(half_w).min(half_h).max(0.0);
    let qx = ax - (half_w - r);
    let qy = ay - (half_h - r);
    qx <= 0.0 || qy <= 0.0 || qx * qx + qy * qy <= r * r
}

fn paint_clouds(s: &TransitionState, area: Rect, buf: &mut Buffer) {
    let mask = &s.mask;
    let half_w = mask.width * mask.scale / 2.0;
    let half_h = mask.height * mask.scale / 2.0;
    let radius = mask.border_radius * mask.scale;
    let sky = Theme::faded(Theme::SKY, Theme::SNOW, mask.opacity);
    let cloud = Theme::faded(Theme::CLOUD, Theme::SKY.over(Theme::SNOW, mask.opacity), mask.opacity);
    // The clip zooms in as the pill becomes a circle.
    let grain = (3.0 * s.clouds_video_scale).round().max(1.0) as u16;

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let (dx, dy) = offset_px(area, x, y);
            if !inside_rounded(dx, dy, half_w, half_h, radius) {
                continue;
            }
            let puff = ((x / grain) * 7 + (y / grain.max(1)) * 13) % 5;
            let symbol = match puff {
                0 => "▒",
                1 | 2 => "░",
                _ => " ",
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(Theme::blurred(Style::default().bg(sky).fg(cloud), mask.blur));
            }
        }
    }
}

fn paint_globe(s: &TransitionState, spin: u64, area: Rect, buf: &mut Buffer) {
    let radius = s.mask.height * s.globe.scale / 2.0;
    let ocean = Theme::faded(Theme::OCEAN, Theme::SNOW, s.globe.opacity);
    let land = Theme::faded(Theme::LAND, Theme::SNOW, s.globe.opacity);
    let turn = (spin / 4) as u16;

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let (dx, dy) = offset_px(area, x, y);
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let is_land = (x.wrapping_add(turn) / 3 + y) % 4 == 0;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(if is_land { "▓" } else { "█" });
                let fg = if is_land { land } else { ocean };
                cell.set_style(Theme::blurred(Style::default().fg(fg), s.globe.blur));
            }
        }
    }
}

fn paint_globe_content(s: &TransitionState, area: Rect, buf: &mut Buffer) {
    let layer = &s.globe_content;
    let body = Theme::blurred(
        Style::default().fg(Theme::faded(Theme::INK, Theme::SNOW, layer.opacity)),
        layer.blur,
    );

    let top = area.y + area.height.saturating_sub(GLOBE_BODY.len() as u16) / 2;
    let widest = GLOBE_BODY.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let x = i32::from(area.right()) - widest - 2 + px_to_cols(s.right_text_offset);
    for (i, line) in GLOBE_BODY.iter().enumerate() {
        put_clipped(buf, area, x, top + i as u16, line, body);
    }
}

fn paint_centered_lines(lines: &[&str], offset_cols: i32, style: Style, area: Rect, buf: &mut Buffer) {
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    let centre = i32::from(area.x) + i32::from(area.width) / 2 + offset_cols;
    for (i, line) in lines.iter().enumerate() {
        let x = centre - line.chars().count() as i32 / 2;
        put_clipped(buf, area, x, top + i as u16, line, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::phase::TransitionConfig;
    use crate::core::transition::{evaluate, TransitionInput};

    fn state_at(p: f64) -> TransitionState {
        evaluate(
            &TransitionInput {
                local_progress: p,
                master_progress: 1.0,
                active: true,
                viewport_width: 800.0,
                text_width: Some(96.0),
                clouds_fade_in: None,
            },
            &TransitionConfig::default(),
        )
    }

    fn screen_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_inactive_paints_nothing() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let hidden = TransitionState::hidden(&TransitionConfig::default());
        TransitionOverlay { state: &hidden, spin: 0 }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_initial_text_over_clouds() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let s = state_at(0.2);
        TransitionOverlay { state: &s, spin: 0 }.render(area, &mut buf);
        let text = screen_text(&buf);
        assert!(text.contains("Your Health."));
        assert!(!text.contains("human-planet"));
        // Fullscreen mask: the corners are cloud cells.
        assert!(buf[(0, 0)].bg != ratatui::style::Color::Reset);
    }

    #[test]
    fn test_pill_text_shows_mid_transition() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let s = state_at(0.65);
        TransitionOverlay { state: &s, spin: 0 }.render(area, &mut buf);
        let text = screen_text(&buf);
        assert!(text.contains("human-planet"));
        assert!(!text.contains("Your Health."));
    }

    #[test]
    fn test_globe_and_content_at_end() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        let s = state_at(1.0);
        TransitionOverlay { state: &s, spin: 0 }.render(area, &mut buf);
        let text = screen_text(&buf);
        assert!(text.contains("Engage to Learn More"));
        assert!(text.contains('█'));
        // Mask has faded out entirely.
        assert!(!text.contains('▒'));
    }

    #[test]
    fn test_rounded_corners() {
        assert!(inside_rounded(0.0, 0.0, 10.0, 5.0, 5.0));
        assert!(!inside_rounded(9.9, 4.9, 10.0, 5.0, 5.0));
        assert!(inside_rounded(9.9, 0.0, 10.0, 5.0, 5.0));
        assert!(!inside_rounded(11.0, 0.0, 10.0, 5.0, 5.0));
    }
}
