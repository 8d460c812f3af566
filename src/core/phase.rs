//! Phase windows and the transition's tuning table.
//!
//! The table is plain data: an immutable [`TransitionConfig`] value handed
//! to the evaluator, never a global.  `Default` carries the tuned values
//! for the clouds → pill → globe flow.

use thiserror::Error;

use super::range::{unit, Rgb};

// ───────────────────────────────────────── errors ────────────

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("phase window {start}..{end} must satisfy 0 <= start <= end <= 1")]
    InvalidWindow { start: f64, end: f64 },
    #[error("unknown phase `{0}`")]
    UnknownPhase(String),
    #[error("`{key}` expects {expected}, got `{value}`")]
    BadValue {
        key: String,
        expected: &'static str,
        value: String,
    },
}

// ───────────────────────────────────────── windows ───────────

/// A `(start, end)` sub-range of some progress domain within which one
/// effect ramps from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseWindow {
    pub start: f64,
    pub end: f64,
}

impl PhaseWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Validated constructor for user-supplied windows.
    pub fn try_new(start: f64, end: f64) -> Result<Self, ConfigError> {
        let ok = start.is_finite() && end.is_finite() && 0.0 <= start && start <= end && end <= 1.0;
        if ok {
            Ok(Self { start, end })
        } else {
            Err(ConfigError::InvalidWindow { start, end })
        }
    }

    /// Local progress of `value` through this window, in `[0, 1]`.
    pub fn progress(&self, value: f64) -> f64 {
        unit(value, self.start, self.end)
    }
}

/// A fade-in window followed by a fade-out window over the same domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePair {
    pub fade_in: PhaseWindow,
    pub fade_out: PhaseWindow,
}

impl FadePair {
    /// `fade_in * (1 - fade_out)`.  Zero before the fade-in and again once
    /// the fade-out completes.
    pub fn opacity(&self, value: f64) -> f64 {
        self.fade_in.progress(value) * (1.0 - self.fade_out.progress(value))
    }
}

// ───────────────────────────────────────── shapes ────────────

/// The rounded-rectangle mask the clouds are shown through, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillShape {
    pub width: f64,
    pub height: f64,
    pub border_radius: f64,
    /// Scale while fullscreen (the pill overflows the viewport).
    pub initial_scale: f64,
    pub final_scale: f64,
}

/// Viewport-width tiers deciding where the pill text slides to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTiers {
    /// At or below this width the text stays centred.
    pub narrow_max: f64,
    /// At or below this width the text slides to `medium_left`.
    pub medium_max: f64,
    pub medium_left: f64,
    pub wide_left: f64,
    /// Used when the text has not been measured yet.
    pub fallback_text_width: f64,
}

impl SlideTiers {
    /// Target left edge for text currently centred at `current_left`.
    pub fn target_left(&self, viewport_width: f64, current_left: f64) -> f64 {
        if viewport_width <= self.narrow_max {
            current_left
        } else if viewport_width <= self.medium_max {
            self.medium_left
        } else {
            self.wide_left
        }
    }
}

/// Maximum blur radius (px) per element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurLimits {
    pub clouds: f64,
    pub initial_text: f64,
    pub pill_text: f64,
    pub globe: f64,
    pub globe_content: f64,
}

// ───────────────────────────────────────── table ─────────────

/// Every tuning value of the clouds → pill → globe transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    /// Clouds mask fade-in over section-local progress.  Replaced by the
    /// timing contract's master-progress window when one is supplied.
    pub clouds_fade_in: PhaseWindow,
    pub initial_text: FadePair,
    pub pill_text: FadePair,
    pub mask_shrink: PhaseWindow,
    pub pill_to_circle: PhaseWindow,
    pub globe_reveal: PhaseWindow,
    pub globe_content_reveal: PhaseWindow,
    pub pill_text_slide: PhaseWindow,
    pub circle_mask_fade_out: PhaseWindow,
    pub pill: PillShape,
    pub circle_size: f64,
    pub video_scale: (f64, f64),
    pub globe_scale_from: f64,
    pub right_text_offset: f64,
    pub blur: BlurLimits,
    pub slide: SlideTiers,
    pub pill_text_from: Rgb,
    pub pill_text_to: Rgb,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            clouds_fade_in: PhaseWindow::new(0.0, 0.05),
            initial_text: FadePair {
                fade_in: PhaseWindow::new(0.025, 0.05),
                fade_out: PhaseWindow::new(0.45, 0.5),
            },
            pill_text: FadePair {
                fade_in: PhaseWindow::new(0.45, 0.575),
                fade_out: PhaseWindow::new(0.775, 0.9),
            },
            mask_shrink: PhaseWindow::new(0.3, 0.6),
            // Ends together with the pill text fade-out.
            pill_to_circle: PhaseWindow::new(0.75, 0.9),
            globe_reveal: PhaseWindow::new(0.7, 0.85),
            globe_content_reveal: PhaseWindow::new(0.75, 0.9),
            pill_text_slide: PhaseWindow::new(0.75, 0.9),
            circle_mask_fade_out: PhaseWindow::new(0.8, 0.9),
            pill: PillShape {
                width: 928.0,
                height: 405.0,
                border_radius: 500.0,
                initial_scale: 3.0,
                final_scale: 1.0,
            },
            circle_size: 405.0,
            video_scale: (1.0, 1.2),
            globe_scale_from: 0.9,
            right_text_offset: 200.0,
            blur: BlurLimits {
                clouds: 20.0,
                initial_text: 20.0,
                pill_text: 15.0,
                globe: 15.0,
                globe_content: 15.0,
            },
            slide: SlideTiers {
                narrow_max: 1200.0,
                medium_max: 1400.0,
                medium_left: 60.0,
                wide_left: 100.0,
                fallback_text_width: 200.0,
            },
            pill_text_from: Rgb::WHITE,
            // Seed green, #1C3A13.
            pill_text_to: Rgb::new(28, 58, 19),
        }
    }
}

impl TransitionConfig {
    /// Names accepted by [`TransitionConfig::set_phase`], in table order.
    pub const PHASE_NAMES: &'static [&'static str] = &[
        "clouds_fade_in",
        "initial_text_in",
        "initial_text_out",
        "pill_text_in",
        "pill_text_out",
        "mask_shrink",
        "pill_to_circle",
        "globe_reveal",
        "globe_content_reveal",
        "pill_text_slide",
        "circle_mask_fade_out",
    ];

    fn phase_mut(&mut self, name: &str) -> Option<&mut PhaseWindow> {
        Some(match name {
            "clouds_fade_in" => &mut self.clouds_fade_in,
            "initial_text_in" => &mut self.initial_text.fade_in,
            "initial_text_out" => &mut self.initial_text.fade_out,
            "pill_text_in" => &mut self.pill_text.fade_in,
            "pill_text_out" => &mut self.pill_text.fade_out,
            "mask_shrink" => &mut self.mask_shrink,
            "pill_to_circle" => &mut self.pill_to_circle,
            "globe_reveal" => &mut self.globe_reveal,
            "globe_content_reveal" => &mut self.globe_content_reveal,
            "pill_text_slide" => &mut self.pill_text_slide,
            "circle_mask_fade_out" => &mut self.circle_mask_fade_out,
            _ => return None,
        })
    }

    /// Look up a phase window by name.
    pub fn phase(&self, name: &str) -> Option<PhaseWindow> {
        Some(match name {
            "clouds_fade_in" => self.clouds_fade_in,
            "initial_text_in" => self.initial_text.fade_in,
            "initial_text_out" => self.initial_text.fade_out,
            "pill_text_in" => self.pill_text.fade_in,
            "pill_text_out" => self.pill_text.fade_out,
            "mask_shrink" => self.mask_shrink,
            "pill_to_circle" => self.pill_to_circle,
            "globe_reveal" => self.globe_reveal,
            "globe_content_reveal" => self.globe_content_reveal,
            "pill_text_slide" => self.pill_text_slide,
            "circle_mask_fade_out" => self.circle_mask_fade_out,
            _ => return None,
        })
    }

    /// Replace one named phase window.
    pub fn set_phase(&mut self, name: &str, window: PhaseWindow) -> Result<(), ConfigError> {
        let window = PhaseWindow::try_new(window.start, window.end)?;
        let slot = self
            .phase_mut(name)
            .ok_or_else(|| ConfigError::UnknownPhase(name.to_string()))?;
        *slot = window;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_inverted_and_out_of_range() {
        assert!(PhaseWindow::try_new(0.2, 0.4).is_ok());
        assert!(PhaseWindow::try_new(0.5, 0.5).is_ok());
        assert_eq!(
            PhaseWindow::try_new(0.6, 0.4),
            Err(ConfigError::InvalidWindow { start: 0.6, end: 0.4 })
        );
        assert!(PhaseWindow::try_new(-0.1, 0.4).is_err());
        assert!(PhaseWindow::try_new(0.1, 1.2).is_err());
        assert!(PhaseWindow::try_new(f64::NAN, 0.4).is_err());
    }

    #[test]
    fn test_fade_pair_opacity_stays_in_unit_range() {
        let pair = TransitionConfig::default().pill_text;
        for i in 0..=1000 {
            let p = i as f64 / 1000.0;
            let o = pair.opacity(p);
            assert!((0.0..=1.0).contains(&o), "opacity {o} at {p}");
        }
        assert_eq!(pair.opacity(0.0), 0.0);
        assert_eq!(pair.opacity(0.6), 1.0);
        assert_eq!(pair.opacity(1.0), 0.0);
    }

    #[test]
    fn test_every_named_phase_resolves_and_is_valid() {
        let cfg = TransitionConfig::default();
        for name in TransitionConfig::PHASE_NAMES {
            let w = cfg.phase(name).expect(name);
            assert!(PhaseWindow::try_new(w.start, w.end).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_set_phase_replaces_only_the_named_window() {
        let mut cfg = TransitionConfig::default();
        cfg.set_phase("globe_reveal", PhaseWindow::new(0.6, 0.8)).unwrap();
        assert_eq!(cfg.globe_reveal, PhaseWindow::new(0.6, 0.8));
        assert_eq!(cfg.mask_shrink, TransitionConfig::default().mask_shrink);

        assert_eq!(
            cfg.set_phase("nope", PhaseWindow::new(0.0, 1.0)),
            Err(ConfigError::UnknownPhase("nope".into()))
        );
        assert!(cfg.set_phase("globe_reveal", PhaseWindow::new(0.9, 0.1)).is_err());
    }

    #[test]
    fn test_slide_tiers() {
        let tiers = TransitionConfig::default().slide;
        assert_eq!(tiers.target_left(1024.0, 412.0), 412.0);
        assert_eq!(tiers.target_left(1300.0, 412.0), 60.0);
        assert_eq!(tiers.target_left(1920.0, 412.0), 100.0);
    }
}
