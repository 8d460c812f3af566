//! Entrance and exit motion for the regular content sections.
//!
//! Each section is a short list of elements (label, cards, body copy)
//! that slide, fade and blur together, with later elements moving less
//! to give a sense of depth.

use std::time::Duration;

use super::easing::{power2_out, power3_in_out};
use super::phase::PhaseWindow;
use super::range::lerp;

/// Visual state of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementMotion {
    pub opacity: f64,
    pub offset_x: f64,
    pub blur: f64,
}

impl ElementMotion {
    pub const REST: ElementMotion = ElementMotion {
        opacity: 1.0,
        offset_x: 0.0,
        blur: 0.0,
    };
}

/// How a section's elements arrive on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceStyle {
    /// A one-shot timed stagger when the journey first appears.
    Timeline,
    /// Slides in from the right as master progress approaches the section.
    Scroll,
    /// No element motion; the section animates itself (the transition).
    None,
}

/// Scroll-driven exit: elements drift left, fade and blur as the section
/// is scrolled through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitMotion {
    /// Window over section-local progress.
    pub window: PhaseWindow,
    pub max_x: f64,
    pub max_blur: f64,
    /// Each later element moves this much less.
    pub depth_step: f64,
}

impl Default for ExitMotion {
    fn default() -> Self {
        Self {
            window: PhaseWindow::new(0.1, 0.8),
            max_x: -100.0,
            max_blur: 15.0,
            depth_step: 0.2,
        }
    }
}

/// Scroll-driven entrance over master progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEntrance {
    pub window: PhaseWindow,
    pub from_x: f64,
    pub max_blur: f64,
}

impl Default for ScrollEntrance {
    fn default() -> Self {
        Self {
            window: PhaseWindow::new(0.05, 0.15),
            from_x: 100.0,
            max_blur: 12.0,
        }
    }
}

/// Timed staggered entrance: each element starts `overlap` before the
/// previous one finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntrance {
    pub delay: Duration,
    pub duration: Duration,
    pub overlap: Duration,
    pub from_x: f64,
    pub from_blur: f64,
}

impl Default for TimelineEntrance {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(300),
            duration: Duration::from_millis(800),
            overlap: Duration::from_millis(500),
            from_x: -80.0,
            from_blur: 12.0,
        }
    }
}

impl TimelineEntrance {
    fn element_start(&self, index: usize) -> Duration {
        let stride = self.duration.saturating_sub(self.overlap);
        self.delay + stride * index as u32
    }

    /// Total running time for `elements` elements.
    pub fn total(&self, elements: usize) -> Duration {
        if elements == 0 {
            return Duration::ZERO;
        }
        self.element_start(elements - 1) + self.duration
    }

    pub fn is_complete(&self, elapsed: Duration, elements: usize) -> bool {
        elapsed >= self.total(elements)
    }

    /// State of element `index` after `elapsed` since the journey appeared.
    pub fn sample(&self, elapsed: Duration, index: usize) -> ElementMotion {
        let t = match elapsed.checked_sub(self.element_start(index)) {
            Some(running) if !self.duration.is_zero() => {
                running.as_secs_f64() / self.duration.as_secs_f64()
            }
            Some(_) => 1.0,
            None => 0.0,
        };
        let eased = power2_out(t);
        ElementMotion {
            opacity: eased,
            offset_x: lerp(self.from_x, 0.0, eased),
            blur: lerp(self.from_blur, 0.0, eased),
        }
    }
}

/// All motion tuning for the content sections.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionConfig {
    pub exit: ExitMotion,
    pub scroll_entrance: ScrollEntrance,
    pub timeline: TimelineEntrance,
}

/// What a section needs to know to place its elements for one frame.
#[derive(Debug, Clone, Copy)]
pub struct MotionInput {
    pub style: EntranceStyle,
    pub elements: usize,
    pub local_progress: f64,
    pub master_progress: f64,
    /// Master progress at which this section starts.
    pub section_start: f64,
    /// Time since the journey first appeared.
    pub elapsed: Duration,
}

/// Per-element motion for one section.
pub fn section_motion(input: &MotionInput, config: &MotionConfig) -> Vec<ElementMotion> {
    let exit = config.exit.window.progress(input.local_progress);
    let exit_blur = config.exit.max_blur * power3_in_out(exit);

    let depth = |i: usize| (1.0 - config.exit.depth_step * i as f64).max(0.0);
    let exiting = |i: usize| ElementMotion {
        opacity: 1.0 - exit,
        offset_x: config.exit.max_x * exit * depth(i),
        blur: exit_blur,
    };

    (0..input.elements)
        .map(|i| match input.style {
            EntranceStyle::None => ElementMotion::REST,
            EntranceStyle::Timeline => {
                if config.timeline.is_complete(input.elapsed, input.elements) {
                    exiting(i)
                } else {
                    config.timeline.sample(input.elapsed, i)
                }
            }
            EntranceStyle::Scroll => {
                let entered = if input.master_progress >= input.section_start {
                    1.0
                } else {
                    config.scroll_entrance.window.progress(input.master_progress)
                };
                if entered < 1.0 {
                    let blur = config.scroll_entrance.max_blur * power3_in_out(1.0 - entered);
                    ElementMotion {
                        opacity: entered,
                        offset_x: config.scroll_entrance.from_x * (1.0 - entered) * depth(i),
                        blur,
                    }
                } else {
                    exiting(i)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(style: EntranceStyle) -> MotionInput {
        MotionInput {
            style,
            elements: 3,
            local_progress: 0.0,
            master_progress: 0.0,
            section_start: 0.25,
            elapsed: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_rest_before_exit_window() {
        let m = section_motion(&input(EntranceStyle::Timeline), &MotionConfig::default());
        assert_eq!(m, vec![ElementMotion::REST; 3]);
    }

    #[test]
    fn test_exit_applies_depth_factor() {
        let m = section_motion(
            &MotionInput {
                local_progress: 0.8,
                ..input(EntranceStyle::Timeline)
            },
            &MotionConfig::default(),
        );
        assert_eq!(m[0].opacity, 0.0);
        assert!((m[0].offset_x + 100.0).abs() < 1e-9);
        assert!((m[1].offset_x + 80.0).abs() < 1e-9);
        assert!((m[2].offset_x + 60.0).abs() < 1e-9);
        assert!((m[0].blur - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_exit_blur_is_shared_by_all_elements() {
        let m = section_motion(
            &MotionInput {
                local_progress: 0.8,
                master_progress: 0.5,
                ..input(EntranceStyle::Scroll)
            },
            &MotionConfig::default(),
        );
        assert!(m.iter().all(|e| (e.blur - 15.0).abs() < 1e-9), "{m:?}");
        let mid = section_motion(
            &MotionInput {
                local_progress: 0.45,
                ..input(EntranceStyle::Timeline)
            },
            &MotionConfig::default(),
        );
        assert!(mid[0].blur > 0.0);
        assert_eq!(mid[0].blur, mid[2].blur);
    }

    #[test]
    fn test_timeline_staggers_elements() {
        let cfg = MotionConfig::default();
        let at = |ms| {
            section_motion(
                &MotionInput {
                    elapsed: Duration::from_millis(ms),
                    ..input(EntranceStyle::Timeline)
                },
                &cfg,
            )
        };
        let start = at(0);
        assert!(start.iter().all(|e| e.opacity == 0.0 && e.offset_x == -80.0));

        // Element 0 runs 0.3..1.1 s, element 1 0.6..1.4 s, element 2 0.9..1.7 s.
        let mid = at(700);
        assert!(mid[0].opacity > mid[1].opacity);
        assert_eq!(mid[2].opacity, 0.0);

        assert_eq!(cfg.timeline.total(3), Duration::from_millis(1700));
        assert_eq!(at(1700), vec![ElementMotion::REST; 3]);
    }

    #[test]
    fn test_exit_waits_for_timeline() {
        let m = section_motion(
            &MotionInput {
                local_progress: 0.8,
                elapsed: Duration::from_millis(200),
                ..input(EntranceStyle::Timeline)
            },
            &MotionConfig::default(),
        );
        assert_eq!(m[0].opacity, 0.0);
        assert_eq!(m[0].offset_x, -80.0);
    }

    #[test]
    fn test_scroll_entrance() {
        let cfg = MotionConfig::default();
        let at = |master: f64| {
            section_motion(
                &MotionInput {
                    master_progress: master,
                    ..input(EntranceStyle::Scroll)
                },
                &cfg,
            )
        };
        let hidden = at(0.0);
        assert_eq!(hidden[0].opacity, 0.0);
        assert_eq!(hidden[0].offset_x, 100.0);
        assert_eq!(hidden[0].blur, 12.0);

        let half = at(0.1);
        assert!((half[0].opacity - 0.5).abs() < 1e-9);
        assert!((half[0].offset_x - 50.0).abs() < 1e-9);

        assert_eq!(at(0.2), vec![ElementMotion::REST; 3]);
        assert_eq!(at(0.3), vec![ElementMotion::REST; 3]);
    }

    #[test]
    fn test_static_sections_never_move() {
        let m = section_motion(
            &MotionInput {
                local_progress: 0.7,
                ..input(EntranceStyle::None)
            },
            &MotionConfig::default(),
        );
        assert_eq!(m, vec![ElementMotion::REST; 3]);
    }
}
