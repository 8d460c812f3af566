//! Interpolation primitives — the single clamped range mapping every
//! derived animation value is built from.

// ───────────────────────────────────────── scalar helpers ────

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamping
/// at both ends.
///
/// A degenerate window (`in_min >= in_max`) behaves as a step at `in_min`:
/// `out_min` at or below it, `out_max` above it.  A NaN input yields
/// `out_min`, so nothing downstream ever sees NaN from here.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if value.is_nan() || value <= in_min {
        return out_min;
    }
    if value >= in_max {
        return out_max;
    }
    out_min + ((value - in_min) / (in_max - in_min)) * (out_max - out_min)
}

/// Normalised progress of `value` through `[start, end]`, always in `[0, 1]`.
pub fn unit(value: f64, start: f64, end: f64) -> f64 {
    map_range(value, start, end, 0.0, 1.0)
}

/// Clamp `value` into `[min, max]`.  NaN collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Linear interpolation from `start` to `end` by `t` (unclamped).
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

// ───────────────────────────────────────── colour ────────────

/// An sRGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, rounded to the nearest integer.
    /// `t` is clamped, so `t <= 0` is exactly `self` and `t >= 1` is
    /// exactly `to`.
    pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
        let t = clamp(t, 0.0, 1.0);
        let channel = |a: u8, b: u8| lerp(a as f64, b as f64, t).round() as u8;
        Rgb {
            r: channel(self.r, to.r),
            g: channel(self.g, to.g),
            b: channel(self.b, to.b),
        }
    }

    /// This colour at `opacity` painted over a solid `background`.
    pub fn over(self, background: Rgb, opacity: f64) -> Rgb {
        background.lerp(self, opacity)
    }
}
