//! The timing contract shared by the chrome fade and the transition.
//!
//! Chrome starts fading out part-way through the section before the
//! fullscreen one; the transition activates at that same point and its
//! clouds start fading in a fixed delay later.  Both consumers read the
//! windows from one [`FadeTiming`] value so they cannot drift apart.

use super::boundaries::SectionBoundaries;
use super::phase::PhaseWindow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTiming {
    /// Fraction of the pre-fullscreen section after which chrome fades out.
    pub fade_out_section_ratio: f64,
    /// Master-progress delay between chrome fade-out start and clouds fade-in start.
    pub clouds_fade_in_delay: f64,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            fade_out_section_ratio: 0.8,
            clouds_fade_in_delay: 0.03,
        }
    }
}

impl FadeTiming {
    /// Chrome fade-out window on master progress: from `ratio` through the
    /// section before `fullscreen_index` to that section's end.
    pub fn fade_out_window(&self, boundaries: &SectionBoundaries, fullscreen_index: usize) -> PhaseWindow {
        let before = fullscreen_index.saturating_sub(1);
        let (start, end) = boundaries.window(before).unwrap_or((0.0, 1.0));
        PhaseWindow::new(start + (end - start) * self.fade_out_section_ratio, end)
    }

    /// Clouds fade-in window on master progress.
    pub fn clouds_fade_in_window(&self, boundaries: &SectionBoundaries, fullscreen_index: usize) -> PhaseWindow {
        let fade_out = self.fade_out_window(boundaries, fullscreen_index);
        PhaseWindow::new(fade_out.start + self.clouds_fade_in_delay, fade_out.end)
    }

    /// Master progress at which the transition becomes active.
    pub fn activation_point(&self, boundaries: &SectionBoundaries, fullscreen_index: usize) -> f64 {
        self.fade_out_window(boundaries, fullscreen_index).start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SectionBoundaries {
        // Cuts at 0.25 and 0.5.
        SectionBoundaries::from_measurements(&[250.0, 250.0, 1500.0], 1000.0).unwrap()
    }

    #[test]
    fn test_fade_out_window_is_last_fifth_of_previous_section() {
        let w = FadeTiming::default().fade_out_window(&layout(), 2);
        assert!((w.start - 0.45).abs() < 1e-9);
        assert!((w.end - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_activation_and_clouds_share_one_contract() {
        let timing = FadeTiming::default();
        let b = layout();
        let fade_out = timing.fade_out_window(&b, 2);
        let clouds = timing.clouds_fade_in_window(&b, 2);
        assert_eq!(timing.activation_point(&b, 2), fade_out.start);
        assert!((clouds.start - (fade_out.start + 0.03)).abs() < 1e-12);
        assert_eq!(clouds.end, fade_out.end);
    }

    #[test]
    fn test_changing_the_ratio_moves_both_consumers() {
        let timing = FadeTiming {
            fade_out_section_ratio: 0.5,
            ..FadeTiming::default()
        };
        let b = layout();
        assert!((timing.activation_point(&b, 2) - 0.375).abs() < 1e-9);
        assert!((timing.clouds_fade_in_window(&b, 2).start - 0.405).abs() < 1e-9);
    }
}
