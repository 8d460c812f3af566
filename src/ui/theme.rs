//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::range::Rgb;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const SNOW: Rgb = Rgb::new(252, 252, 247);
    pub const SAGE: Rgb = Rgb::new(208, 215, 211);
    pub const SEED_GREEN: Rgb = Rgb::new(28, 58, 19);
    pub const INK: Rgb = Rgb::new(34, 38, 34);
    pub const MUTED: Rgb = Rgb::new(120, 128, 120);
    pub const SKY: Rgb = Rgb::new(170, 196, 220);
    pub const CLOUD: Rgb = Rgb::new(236, 240, 244);
    pub const OCEAN: Rgb = Rgb::new(36, 82, 128);
    pub const LAND: Rgb = Rgb::new(86, 140, 72);

    pub fn color(rgb: Rgb) -> Color {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// `fg` drawn at `opacity` over `bg`.
    pub fn faded(fg: Rgb, bg: Rgb, opacity: f64) -> Color {
        Self::color(fg.over(bg, opacity))
    }

    /// Terminal stand-in for a blur filter: soft text gets dimmed.
    pub fn blurred(style: Style, blur: f64) -> Style {
        if blur >= 4.0 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    // ── journey ────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default().bg(Self::color(Self::SNOW)).fg(Self::color(Self::INK))
    }

    pub fn headline_style() -> Style {
        Style::default()
            .fg(Self::color(Self::SEED_GREEN))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_active_style() -> Style {
        Style::default()
            .bg(Self::color(Self::SEED_GREEN))
            .fg(Self::color(Self::SNOW))
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
