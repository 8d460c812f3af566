//! Progress routing — which section is active and how far through it.

use super::boundaries::SectionBoundaries;
use super::range::clamp;

/// Active section and the section-local progress within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPosition {
    pub index: usize,
    /// Progress through the active section, in `[0, 1]`.
    pub local: f64,
}

/// Offsets converted back to progress can miss a cut by a few ulps.
const CUT_TOLERANCE: f64 = 1e-9;

/// Route master progress onto the section boundaries.
///
/// Intervals are half-open `[start, end)`, so a progress value sitting
/// on a cut (within [`CUT_TOLERANCE`]) belongs to the later section.
/// Progress at or past 1 always selects the last section; anything below
/// 0 selects the first.
pub fn route(progress: f64, boundaries: &SectionBoundaries) -> SectionPosition {
    let cuts = boundaries.as_slice();
    let last = boundaries.section_count() - 1;

    let snapped = progress + CUT_TOLERANCE;
    let end = cuts.last().copied().unwrap_or(1.0);
    let index = if progress >= 1.0 || snapped >= end {
        last
    } else {
        cuts.windows(2)
            .position(|w| snapped >= w[0] && snapped < w[1])
            .unwrap_or(0)
    };

    SectionPosition {
        index,
        local: local_progress(progress, boundaries, index),
    }
}

/// Progress through section `index`, clamped to `[0, 1]`; 0 for a
/// zero-width section.
pub fn local_progress(progress: f64, boundaries: &SectionBoundaries, index: usize) -> f64 {
    let Some((start, end)) = boundaries.window(index) else {
        return 0.0;
    };
    if end > start {
        clamp((progress - start) / (end - start), 0.0, 1.0)
    } else {
        0.0
    }
}

/// Local progress handed to the fullscreen section's transition.
///
/// Once master progress passes `activation_point` the transition receives
/// progress even while an earlier section is still nominally active (the
/// pre-roll); it is clamped at 0 until the fullscreen section really
/// starts.  Returns `None` while the transition has not been activated.
pub fn fullscreen_progress(
    progress: f64,
    position: SectionPosition,
    boundaries: &SectionBoundaries,
    fullscreen_index: usize,
    activation_point: f64,
) -> Option<f64> {
    use std::cmp::Ordering;

    match position.index.cmp(&fullscreen_index) {
        Ordering::Equal => Some(position.local),
        Ordering::Greater => Some(1.0),
        Ordering::Less if progress >= activation_point => {
            Some(local_progress(progress, boundaries, fullscreen_index))
        }
        Ordering::Less => None,
    }
}
