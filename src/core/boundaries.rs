//! Section boundaries — where each content section starts and ends on the
//! master progress axis.
//!
//! Progress 0 means the track sits at its rest position; progress 1 means
//! it has been translated by the full scrollable width.  Section *i + 1*
//! begins when its left edge reaches the left edge of the viewport, i.e.
//! once the track has moved by the combined width of sections `0..=i`.

use thiserror::Error;

/// Why a layout could not produce boundaries.  Callers keep whatever
/// boundaries they already had.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Nothing measurable yet (no sections, zero viewport, bad widths).
    #[error("layout not measured yet")]
    NotMeasured,
    /// Content is no wider than the viewport, so there is nothing to scroll.
    #[error("content width {total} does not exceed viewport width {viewport}")]
    NotScrollable { total: f64, viewport: f64 },
}

/// Ordered cut points of master progress: first is 0, last is exactly 1,
/// non-decreasing, `sections + 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBoundaries(Vec<f64>);

impl SectionBoundaries {
    /// Equal split, used until the first successful measurement.
    pub fn equal_split(sections: usize) -> Self {
        let n = sections.max(1);
        let mut cuts: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
        cuts.push(1.0);
        Self(cuts)
    }

    /// Derive boundaries from measured section widths and the viewport
    /// width (same unit, typically pixels).
    pub fn from_measurements(widths: &[f64], viewport: f64) -> Result<Self, LayoutError> {
        if widths.is_empty() || !(viewport > 0.0) || widths.iter().any(|w| !w.is_finite()) {
            return Err(LayoutError::NotMeasured);
        }

        let total: f64 = widths.iter().map(|w| w.max(0.0)).sum();
        let scrollable = total - viewport;
        if scrollable <= 0.0 {
            return Err(LayoutError::NotScrollable { total, viewport });
        }

        let mut cuts = Vec::with_capacity(widths.len() + 1);
        cuts.push(0.0);
        let mut cumulative = 0.0;
        for width in &widths[..widths.len() - 1] {
            cumulative += width.max(0.0);
            cuts.push((cumulative / scrollable).min(1.0));
        }
        // Forced, not computed: no floating-point drift at the end of scroll.
        cuts.push(1.0);
        Ok(Self(cuts))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn section_count(&self) -> usize {
        self.0.len() - 1
    }

    /// `(start, end)` of section `index` on the master progress axis.
    pub fn window(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.0.get(index)?, *self.0.get(index + 1)?))
    }

    /// Progress at which section `index` begins (clamped to the last one).
    pub fn start_of(&self, index: usize) -> f64 {
        let i = index.min(self.section_count() - 1);
        self.0[i]
    }
}

/// Holds the live boundaries and replaces them on each successful
/// measurement.
#[derive(Debug, Clone)]
pub struct BoundaryCalculator {
    current: SectionBoundaries,
}

impl BoundaryCalculator {
    pub fn new(sections: usize) -> Self {
        Self {
            current: SectionBoundaries::equal_split(sections),
        }
    }

    pub fn boundaries(&self) -> &SectionBoundaries {
        &self.current
    }

    /// Recompute from a fresh measurement.  On a degenerate layout the
    /// previous boundaries stay in place and the reason is returned.
    pub fn recompute(&mut self, widths: &[f64], viewport: f64) -> Result<(), LayoutError> {
        match SectionBoundaries::from_measurements(widths, viewport) {
            Ok(next) => {
                tracing::debug!(boundaries = ?next.as_slice(), "section boundaries recomputed");
                self.current = next;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%err, "keeping previous section boundaries");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_equal_split() {
        let b = SectionBoundaries::equal_split(3);
        assert!(approx(b.as_slice(), &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]));
        assert_eq!(b.section_count(), 3);
        assert_eq!(SectionBoundaries::equal_split(0).as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_from_measurements() {
        // total 5500, viewport 1000 → scrollable 4500.
        let b = SectionBoundaries::from_measurements(&[1000.0, 1500.0, 3000.0], 1000.0).unwrap();
        assert!(approx(b.as_slice(), &[0.0, 1000.0 / 4500.0, 2500.0 / 4500.0, 1.0]));
    }

    #[test]
    fn test_boundaries_saturate_at_one() {
        // Last section narrower than the viewport: the cut before it is
        // past the end of scroll and clamps to 1.
        let b = SectionBoundaries::from_measurements(&[1000.0, 1000.0, 500.0], 1000.0).unwrap();
        assert!(approx(b.as_slice(), &[0.0, 2.0 / 3.0, 1.0, 1.0]));
    }

    #[test]
    fn test_not_scrollable_keeps_previous() {
        let mut calc = BoundaryCalculator::new(3);
        let before = calc.boundaries().clone();
        let err = calc.recompute(&[300.0, 300.0, 400.0], 1000.0).unwrap_err();
        assert_eq!(err, LayoutError::NotScrollable { total: 1000.0, viewport: 1000.0 });
        assert_eq!(calc.boundaries(), &before);
    }

    #[test]
    fn test_unmeasured_layout_is_rejected() {
        let mut calc = BoundaryCalculator::new(3);
        assert_eq!(calc.recompute(&[], 1000.0), Err(LayoutError::NotMeasured));
        assert_eq!(calc.recompute(&[1.0, 2.0], 0.0), Err(LayoutError::NotMeasured));
        assert_eq!(calc.recompute(&[f64::NAN, 2.0], 1.0), Err(LayoutError::NotMeasured));
        assert_eq!(calc.boundaries(), &SectionBoundaries::equal_split(3));
    }

    #[test]
    fn test_recompute_replaces_on_success() {
        let mut calc = BoundaryCalculator::new(3);
        calc.recompute(&[1000.0, 1500.0, 3000.0], 1000.0).unwrap();
        assert!((calc.boundaries().start_of(2) - 2500.0 / 4500.0).abs() < 1e-9);
        assert_eq!(calc.boundaries().window(3), None);
    }
}
