//! Chrome visibility — how opaque the header, welcome bar, timeline nav
//! and footer are at a given point in the journey.
//!
//! Two regimes, keyed on the active section:
//! - the section before the fullscreen one fades chrome *out* over the
//!   timing contract's fade-out window (master progress);
//! - the fullscreen section keeps chrome hidden, then fades it back *in*
//!   over a window of its own local progress.
//!
//! Everywhere else chrome is fully visible.

use super::boundaries::SectionBoundaries;
use super::phase::PhaseWindow;
use super::range::{clamp, Rgb};
use super::router::SectionPosition;
use super::timing::FadeTiming;

#[derive(Debug, Clone, PartialEq)]
pub struct ChromeConfig {
    /// Index of the section that opens fullscreen.
    pub fullscreen_section: usize,
    /// Chrome fade-in window over the fullscreen section's local progress.
    pub fade_in: PhaseWindow,
    /// The footer fades this much faster than the rest of the chrome.
    pub footer_fade_factor: f64,
    /// Footer background while fully visible.
    pub footer_visible_bg: Rgb,
    /// Footer background as it disappears.
    pub footer_hidden_bg: Rgb,
    /// Below this opacity the nav and footer stop taking clicks.
    pub interactive_min: f64,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            fullscreen_section: 2,
            fade_in: PhaseWindow::new(0.4, 0.6),
            footer_fade_factor: 1.125,
            footer_visible_bg: Rgb::new(252, 252, 247),
            footer_hidden_bg: Rgb::new(208, 215, 211),
            interactive_min: 0.1,
        }
    }
}

/// Chrome visibility for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeState {
    pub opacity: f64,
    pub is_fullscreen: bool,
    pub footer_opacity: f64,
    pub footer_background: Rgb,
    pub footer_interactive: bool,
    /// The timeline nav accepts clicks.
    pub nav_interactive: bool,
}

/// Compute chrome opacity and the fullscreen flag.
pub fn compute_chrome(
    master: f64,
    position: SectionPosition,
    boundaries: &SectionBoundaries,
    config: &ChromeConfig,
    timing: &FadeTiming,
) -> ChromeState {
    let fullscreen = config.fullscreen_section;

    // A fullscreen index past the last section never takes the chrome away.
    if fullscreen >= boundaries.section_count() {
        return footer_state(1.0, false, config);
    }

    let (opacity, is_fullscreen) = if fullscreen > 0 && position.index == fullscreen - 1 {
        let window = timing.fade_out_window(boundaries, fullscreen);
        (1.0 - window.progress(master), master >= window.end)
    } else if position.index == fullscreen {
        (
            config.fade_in.progress(position.local),
            position.local <= config.fade_in.start,
        )
    } else {
        (1.0, false)
    };

    footer_state(opacity, is_fullscreen, config)
}

fn footer_state(opacity: f64, is_fullscreen: bool, config: &ChromeConfig) -> ChromeState {
    let opacity = clamp(opacity, 0.0, 1.0);
    let footer_opacity = clamp(1.0 - (1.0 - opacity) * config.footer_fade_factor, 0.0, 1.0);
    ChromeState {
        opacity,
        is_fullscreen,
        footer_opacity,
        footer_background: config
            .footer_visible_bg
            .lerp(config.footer_hidden_bg, 1.0 - footer_opacity),
        footer_interactive: footer_opacity >= config.interactive_min,
        nav_interactive: opacity >= config.interactive_min,
    }
}
