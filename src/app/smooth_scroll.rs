//! Scrubbed track position with exponential ease-out.
//!
//! The track never jumps straight to the scroll target.  Each frame the
//! displayed offset closes a fixed fraction of the remaining distance, so
//! wheel bursts turn into a visible glide that decelerates into place.

/// Pixel-offset smoother for the horizontal track.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset currently drawn, in pixels.
    displayed: f64,
    /// Fraction of the remaining distance closed per frame.
    /// Good range: 0.1–0.3 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            displayed: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Move toward `target`.  Call once per frame.
    pub fn tick(&mut self, target: f64) {
        self.displayed += (target - self.displayed) * self.speed;
        // Below half a pixel the motion is invisible; settle exactly.
        if (target - self.displayed).abs() < 0.5 {
            self.displayed = target;
        }
    }

    /// Place the track at `offset` with no glide (resize, smoothing off).
    pub fn jump_to(&mut self, offset: f64) {
        self.displayed = offset;
    }

    pub fn offset(&self) -> f64 {
        self.displayed
    }

    /// True while the displayed offset has not reached `target`.
    pub fn is_animating(&self, target: f64) -> bool {
        self.displayed != target
    }
}
