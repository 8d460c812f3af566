//! Easing curves.
//!
//! Named after the timeline presets the journey was tuned with: `power2`
//! is quadratic, `power3` is cubic.  Inputs are clamped to `[0, 1]`.

use super::range::clamp;

pub fn power2_out(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn power2_in_out(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn power3_in_out(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_bounds() {
        let curves: [(&str, fn(f64) -> f64); 3] = [
            ("power2_out", power2_out),
            ("power2_in_out", power2_in_out),
            ("power3_in_out", power3_in_out),
        ];
        for (name, ease) in curves {
            assert_eq!(ease(0.0), 0.0, "{name}");
            assert!((ease(1.0) - 1.0).abs() < 1e-12, "{name}");
            assert_eq!(ease(-3.0), 0.0, "{name}");
            assert!((ease(4.0) - 1.0).abs() < 1e-12, "{name}");
        }
    }

    #[test]
    fn test_in_out_curves_are_symmetric_at_midpoint() {
        assert!((power2_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!((power3_in_out(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_power3_starts_slower_than_power2() {
        assert!(power3_in_out(0.2) < power2_in_out(0.2));
    }
}
