//! Scroll position model.
//!
//! Input handlers move the authoritative *target* offset; the frame
//! callback advances any running jump tween and the smoother, and reads
//! master progress off the displayed offset.

use std::time::{Duration, Instant};

use crate::core::easing::power2_in_out;
use crate::core::range::{clamp, lerp};
use super::smooth_scroll::SmoothScroll;

/// Duration of a "jump to section" animation.
pub const JUMP_DURATION: Duration = Duration::from_millis(800);

/// Eased animation of the scroll target between two offsets.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    ease: fn(f64) -> f64,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration, ease: fn(f64) -> f64) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn sample(&self, now: Instant) -> f64 {
        if self.is_done(now) {
            return self.to;
        }
        let t = now.saturating_duration_since(self.start).as_secs_f64() / self.duration.as_secs_f64();
        lerp(self.from, self.to, (self.ease)(t))
    }

    pub fn to(&self) -> f64 {
        self.to
    }
}

#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Authoritative scroll offset in pixels, `0..=max`.
    target: f64,
    /// Scrollable width in pixels.
    max: f64,
    smooth: SmoothScroll,
    smoothing: bool,
    tween: Option<ScrollTween>,
}

impl ScrollState {
    pub fn new(scrub_speed: f64, smoothing: bool) -> Self {
        Self {
            target: 0.0,
            max: 0.0,
            smooth: SmoothScroll::new(scrub_speed),
            smoothing,
            tween: None,
        }
    }

    /// User scroll.  Cancels any running jump.
    pub fn scroll_by(&mut self, dx: f64) {
        if self.tween.take().is_some() {
            tracing::debug!("jump cancelled by user scroll");
        }
        self.target = clamp(self.target + dx, 0.0, self.max);
    }

    /// Animate the target to `progress` of the scrollable width.
    pub fn jump_to_progress(&mut self, progress: f64, now: Instant) {
        let to = clamp(progress, 0.0, 1.0) * self.max;
        self.tween = Some(ScrollTween::new(
            self.target,
            to,
            now,
            JUMP_DURATION,
            power2_in_out,
        ));
    }

    /// New scrollable width after a resize; keeps master progress stable.
    pub fn set_max(&mut self, max: f64) {
        let max = max.max(0.0);
        let ratio = if self.max > 0.0 { self.target / self.max } else { 0.0 };
        let shown = if self.max > 0.0 { self.smooth.offset() / self.max } else { 0.0 };
        self.max = max;
        self.target = ratio * max;
        self.smooth.jump_to(shown * max);
        if let Some(t) = self.tween.take() {
            tracing::debug!(to = t.to(), "jump dropped on resize");
        }
    }

    /// Drop a running jump, leaving the target where it has got to.
    pub fn cancel_jump(&mut self) {
        if let Some(t) = self.tween.take() {
            tracing::debug!(to = t.to(), "jump cancelled");
        }
    }

    pub fn set_smoothing(&mut self, smoothing: bool) {
        self.smoothing = smoothing;
    }

    /// Advance one frame.
    pub fn tick(&mut self, now: Instant) {
        if let Some(tween) = self.tween {
            self.target = clamp(tween.sample(now), 0.0, self.max);
            if tween.is_done(now) {
                self.tween = None;
            }
        }
        if self.smoothing {
            self.smooth.tick(self.target);
        } else {
            self.smooth.jump_to(self.target);
        }
    }

    /// Master progress of the displayed offset.
    pub fn progress(&self) -> f64 {
        if self.max > 0.0 {
            self.smooth.offset() / self.max
        } else {
            0.0
        }
    }

    /// Master progress of the target offset.
    pub fn target_progress(&self) -> f64 {
        if self.max > 0.0 {
            self.target / self.max
        } else {
            0.0
        }
    }

    pub fn offset(&self) -> f64 {
        self.smooth.offset()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.smooth.is_animating(self.target)
    }
}
