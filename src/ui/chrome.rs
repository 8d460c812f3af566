//! Page chrome: header with welcome bar, timeline nav and footer.
//!
//! All three read their visibility from [`ChromeState`]; fading is done by
//! blending text toward the row's background.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::chrome::ChromeState;
use crate::core::range::Rgb;
use crate::core::section::SectionSpec;

use super::layout::put_clipped;
use super::theme::Theme;

const NAV_LINKS: &str = "Shop  Science  Learn";
const WELCOME: &str = "Welcome back, Sade  ·  987 Points  ·  024 Strains  ·  020 Nutrients";
const FOOTER_LEFT: &str = "DAY 60  ·  DS-01®";
const FOOTER_TRACK: &str = "♪ Bionic Frequencies · Seed";

/// Chrome below this opacity is not painted.
const MIN_VISIBLE: f64 = 0.02;

// ───────────────────────────────────────── header ────────────

pub struct HeaderBar {
    pub opacity: f64,
}

impl Widget for HeaderBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        if self.opacity <= MIN_VISIBLE || area.width == 0 {
            return;
        }
        let logo = Style::default()
            .fg(Theme::faded(Theme::SEED_GREEN, Theme::SNOW, self.opacity))
            .add_modifier(Modifier::BOLD);
        let links = Style::default().fg(Theme::faded(Theme::INK, Theme::SNOW, self.opacity));
        let welcome = Style::default().fg(Theme::faded(Theme::MUTED, Theme::SNOW, self.opacity));

        let x = i32::from(area.x);
        put_clipped(buf, area, x + 1, area.y, "seed", logo);
        put_clipped(buf, area, x + 8, area.y, NAV_LINKS, links);
        let right = i32::from(area.right()) - WELCOME.chars().count() as i32 - 1;
        // The welcome bar gives way to the links on narrow terminals.
        if right > x + 8 + NAV_LINKS.len() as i32 + 2 {
            put_clipped(buf, area, right, area.y, WELCOME, welcome);
        }
    }
}

// ───────────────────────────────────────── timeline nav ──────

pub struct TimelineNav<'a> {
    pub sections: &'a [SectionSpec],
    pub active: usize,
    /// Progress through the active chapter; fills the connector after it.
    pub local: f64,
    pub opacity: f64,
}

/// Columns of the connector drawn between two chapter buttons.
const CONNECTOR_COLS: u16 = 6;
/// Blank column on each side of a connector.
const CONNECTOR_PAD: u16 = 1;

/// `(x, width)` of each chapter button, centred in `area`.
pub fn nav_slots(area: Rect, sections: &[SectionSpec]) -> Vec<(u16, u16)> {
    let widths: Vec<u16> = sections
        .iter()
        .map(|s| (s.short_label.chars().count() + s.label.chars().count() + 3) as u16)
        .collect();
    let gap = CONNECTOR_COLS + 2 * CONNECTOR_PAD;
    let total: u16 = widths.iter().sum::<u16>() + gap * widths.len().saturating_sub(1) as u16;
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    widths
        .into_iter()
        .map(|w| {
            let slot = (x, w);
            x = x.saturating_add(w + gap);
            slot
        })
        .collect()
}

/// Chapter under column `col`, if any.
pub fn nav_hit(area: Rect, sections: &[SectionSpec], col: u16) -> Option<usize> {
    nav_slots(area, sections)
        .into_iter()
        .position(|(x, w)| col >= x && col < x.saturating_add(w))
}

/// Filled fraction of the connector after chapter `index`: full behind the
/// active chapter, `local` after it, empty ahead.
pub fn connector_fill(index: usize, active: usize, local: f64) -> f64 {
    match index.cmp(&active) {
        std::cmp::Ordering::Less => 1.0,
        std::cmp::Ordering::Equal => local.clamp(0.0, 1.0),
        std::cmp::Ordering::Greater => 0.0,
    }
}

fn connector(fill: f64) -> String {
    let filled = (fill * f64::from(CONNECTOR_COLS)).round() as usize;
    let cols = usize::from(CONNECTOR_COLS);
    format!("{}{}", "━".repeat(filled.min(cols)), "─".repeat(cols - filled.min(cols)))
}

impl Widget for TimelineNav<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        if self.opacity <= MIN_VISIBLE || area.width == 0 {
            return;
        }
        let track = Style::default().fg(Theme::faded(Theme::SEED_GREEN, Theme::SNOW, self.opacity));
        let slots = nav_slots(area, self.sections);
        for (i, (section, &(x, w))) in self.sections.iter().zip(&slots).enumerate() {
            let label = format!(" {} {} ", section.short_label, section.label);
            let style = if i == self.active {
                let bg = Theme::SEED_GREEN.over(Theme::SNOW, self.opacity);
                Theme::nav_active_style()
                    .bg(Theme::color(bg))
                    .fg(Theme::faded(Theme::SNOW, bg, self.opacity))
            } else {
                Style::default().fg(Theme::faded(Theme::MUTED, Theme::SNOW, self.opacity))
            };
            put_clipped(buf, area, i32::from(x), area.y, &label, style);

            if i + 1 < slots.len() {
                let cx = i32::from(x + w + CONNECTOR_PAD);
                let line = connector(connector_fill(i, self.active, self.local));
                put_clipped(buf, area, cx, area.y, &line, track);
            }
        }
    }
}

// ───────────────────────────────────────── footer ────────────

pub struct FooterBar<'a> {
    pub chrome: &'a ChromeState,
    /// Published master progress, for the journey gauge.
    pub progress: f64,
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg: Rgb = self.chrome.footer_background;
        buf.set_style(area, Style::default().bg(Theme::color(bg)));
        let opacity = self.chrome.footer_opacity;
        if opacity <= MIN_VISIBLE || area.width == 0 {
            return;
        }
        let text = Style::default().fg(Theme::faded(Theme::INK, bg, opacity));
        let accent = Style::default().fg(Theme::faded(Theme::SEED_GREEN, bg, opacity));

        let x = i32::from(area.x);
        put_clipped(buf, area, x + 1, area.y, FOOTER_LEFT, text);

        let gauge = progress_gauge(self.progress, 20);
        let gauge_x = x + i32::from(area.width) / 2 - gauge.chars().count() as i32 / 2;
        put_clipped(buf, area, gauge_x, area.y, &gauge, accent);

        let right = i32::from(area.right()) - FOOTER_TRACK.chars().count() as i32 - 1;
        if right > gauge_x + gauge.chars().count() as i32 + 1 {
            put_clipped(buf, area, right, area.y, FOOTER_TRACK, text);
        }
    }
}

/// `▕██████░░░░▏ 60%` style gauge with `cells` inner cells.
pub fn progress_gauge(progress: f64, cells: usize) -> String {
    let p = progress.clamp(0.0, 1.0);
    let filled = (p * cells as f64).round() as usize;
    format!(
        "▕{}{}▏ {:>3}%",
        "█".repeat(filled),
        "░".repeat(cells - filled),
        (p * 100.0).round() as u32
    )
}
