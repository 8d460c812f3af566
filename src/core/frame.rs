//! The per-frame pipeline as one pure function.
//!
//! `(master progress, boundaries, journey) → FrameOutput`.  The runtime
//! only samples progress and hands the bundle to the presentation layer;
//! nothing in here keeps state between frames.

use std::time::Duration;

use super::boundaries::SectionBoundaries;
use super::chrome::{compute_chrome, ChromeConfig, ChromeState};
use super::motion::{section_motion, ElementMotion, MotionConfig, MotionInput};
use super::phase::TransitionConfig;
use super::range::clamp;
use super::router::{fullscreen_progress, local_progress, route, SectionPosition};
use super::section::{default_sections, SectionSpec};
use super::timing::FadeTiming;
use super::transition::{evaluate, TransitionInput, TransitionState};

/// Immutable configuration of the whole journey, injected into every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    pub sections: Vec<SectionSpec>,
    pub transition: TransitionConfig,
    pub chrome: ChromeConfig,
    pub timing: FadeTiming,
    pub motion: MotionConfig,
}

impl Default for Journey {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            transition: TransitionConfig::default(),
            chrome: ChromeConfig::default(),
            timing: FadeTiming::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl Journey {
    /// The fullscreen section, if it exists in this layout.
    pub fn fullscreen_section(&self) -> Option<usize> {
        let index = self.chrome.fullscreen_section;
        (index < self.sections.len()).then_some(index)
    }
}

/// Viewport facts the evaluators need, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub text_width: Option<f64>,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Master progress, clamped to `[0, 1]`.
    pub progress: f64,
    pub position: SectionPosition,
    pub transition: TransitionState,
    pub chrome: ChromeState,
    /// Element motion per section, indexed like `Journey::sections`.
    pub motions: Vec<Vec<ElementMotion>>,
}

pub fn compute_frame(
    progress: f64,
    boundaries: &SectionBoundaries,
    journey: &Journey,
    viewport: Viewport,
    elapsed: Duration,
) -> FrameOutput {
    let position = route(progress, boundaries);

    let transition = match journey.fullscreen_section() {
        Some(fs) => {
            let activation = journey.timing.activation_point(boundaries, fs);
            let local = fullscreen_progress(progress, position, boundaries, fs, activation);
            evaluate(
                &TransitionInput {
                    local_progress: local.unwrap_or(0.0),
                    master_progress: progress,
                    active: local.is_some(),
                    viewport_width: viewport.width,
                    text_width: viewport.text_width,
                    clouds_fade_in: Some(journey.timing.clouds_fade_in_window(boundaries, fs)),
                },
                &journey.transition,
            )
        }
        None => TransitionState::hidden(&journey.transition),
    };

    let chrome = compute_chrome(progress, position, boundaries, &journey.chrome, &journey.timing);

    let motions = journey
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            section_motion(
                &MotionInput {
                    style: section.entrance,
                    elements: section.elements(),
                    local_progress: local_progress(progress, boundaries, i),
                    master_progress: progress,
                    section_start: boundaries.start_of(i),
                    elapsed,
                },
                &journey.motion,
            )
        })
        .collect();

    FrameOutput {
        progress: clamp(progress, 0.0, 1.0),
        position,
        transition,
        chrome,
        motions,
    }
}
