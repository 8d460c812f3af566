//! Multi-phase transition evaluator: clouds → pill → globe.
//!
//! One progress value through the fullscreen section drives every visual
//! parameter of the effect.  [`evaluate`] is pure: the same inputs always
//! yield the same [`TransitionState`].  Media playback follows the state
//! (`globe_playing`, `clouds_media_progress`) but is driven elsewhere.

use super::phase::{PhaseWindow, TransitionConfig};
use super::range::{clamp, lerp, Rgb};

// ───────────────────────────────────────── input ─────────────

/// Everything the evaluator reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionInput {
    /// Progress through the fullscreen section (pre-roll included).
    pub local_progress: f64,
    pub master_progress: f64,
    pub active: bool,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Measured width of the pill text, when known.
    pub text_width: Option<f64>,
    /// Clouds fade-in window on master progress, from the timing contract.
    /// Without it the config's local-progress window is used.
    pub clouds_fade_in: Option<PhaseWindow>,
}

// ───────────────────────────────────────── output ────────────

/// The rounded mask the clouds are seen through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskState {
    pub visible: bool,
    pub width: f64,
    pub height: f64,
    pub border_radius: f64,
    pub scale: f64,
    pub opacity: f64,
    pub blur: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextState {
    pub opacity: f64,
    pub blur: f64,
    /// Counter-scale against the containing mask.
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillTextState {
    pub opacity: f64,
    pub blur: f64,
    /// Horizontal offset from the centred position, in pixels.
    pub offset_x: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerState {
    pub opacity: f64,
    pub blur: f64,
    pub scale: f64,
}

/// Every derived parameter of the transition for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    pub active: bool,
    pub mask: MaskState,
    pub initial_text: TextState,
    pub pill_text: PillTextState,
    pub clouds_video_scale: f64,
    pub globe: LayerState,
    pub globe_content: LayerState,
    /// Offset of the right-hand text panel, sliding in from the right.
    pub right_text_offset: f64,
    /// Whether the looping globe clip should be playing.
    pub globe_playing: bool,
    /// Scrub position for the clouds clip, in `[0, 1]` of its duration.
    pub clouds_media_progress: f64,
}

impl TransitionState {
    /// Resting state while the transition is inactive: nothing visible,
    /// media paused.
    pub fn hidden(config: &TransitionConfig) -> Self {
        Self {
            active: false,
            mask: MaskState {
                visible: false,
                width: config.pill.width,
                height: config.pill.height,
                border_radius: config.pill.border_radius,
                scale: config.pill.initial_scale,
                opacity: 0.0,
                blur: config.blur.clouds,
            },
            initial_text: TextState {
                opacity: 0.0,
                blur: config.blur.initial_text,
                scale: 1.0 / config.pill.initial_scale,
            },
            pill_text: PillTextState {
                opacity: 0.0,
                blur: config.blur.pill_text,
                offset_x: 0.0,
                color: config.pill_text_from,
            },
            clouds_video_scale: config.video_scale.0,
            globe: LayerState {
                opacity: 0.0,
                blur: config.blur.globe,
                scale: config.globe_scale_from,
            },
            globe_content: LayerState {
                opacity: 0.0,
                blur: config.blur.globe_content,
                scale: 1.0,
            },
            right_text_offset: config.right_text_offset,
            globe_playing: false,
            clouds_media_progress: 0.0,
        }
    }
}

// ───────────────────────────────────────── evaluation ────────

/// Compute the full transition state for one frame.
pub fn evaluate(input: &TransitionInput, config: &TransitionConfig) -> TransitionState {
    if !input.active {
        return TransitionState::hidden(config);
    }

    let p = input.local_progress;
    let pill = &config.pill;

    // Mask shrink: fullscreen overflow scale → pill.  The initial text sits
    // inside the mask and is counter-scaled to keep its apparent size.
    let shrink = config.mask_shrink.progress(p);
    let mask_scale = lerp(pill.initial_scale, pill.final_scale, shrink);
    let text_inverse_scale = 1.0 / mask_scale;

    // Phase 0: clouds fade in.
    let clouds = match input.clouds_fade_in {
        Some(window) => window.progress(input.master_progress),
        None => config.clouds_fade_in.progress(p),
    };
    let clouds_blur = config.blur.clouds * (1.0 - clouds);

    // Phase 1: initial text in, then out.
    let initial_in = config.initial_text.fade_in.progress(p);
    let initial_opacity = config.initial_text.opacity(p);
    let initial_blur = config.blur.initial_text * (1.0 - initial_in);

    // Phase 2: pill text in, then out; blur on both sides.
    let pill_in = config.pill_text.fade_in.progress(p);
    let pill_out = config.pill_text.fade_out.progress(p);
    let pill_opacity = config.pill_text.opacity(p);
    let pill_blur = config.blur.pill_text * (1.0 - pill_in) + config.blur.pill_text * pill_out;

    // Phase 2b: pill text slides toward the content title and recolours
    // with the same progress.
    let slide = config.pill_text_slide.progress(p);
    let text_width = input.text_width.unwrap_or(config.slide.fallback_text_width);
    let current_left = input.viewport_width / 2.0 - text_width / 2.0;
    let target_left = config.slide.target_left(input.viewport_width, current_left);
    let offset_x = slide * (target_left - current_left);
    let color = config.pill_text_from.lerp(config.pill_text_to, slide);

    // Phase 3.5: pill → circle.  Height is fixed; width and radius meet at
    // the circle.
    let to_circle = config.pill_to_circle.progress(p);
    let width = lerp(pill.width, config.circle_size, to_circle);
    let radius = lerp(pill.border_radius, config.circle_size / 2.0, to_circle);
    let video_scale = lerp(config.video_scale.0, config.video_scale.1, to_circle);

    // Phase 5: circle mask fades out over the globe.
    let mask_fade_out = config.circle_mask_fade_out.progress(p);
    let mask_opacity = clouds * (1.0 - mask_fade_out);

    // Phase 4: globe, then its content.
    let globe = config.globe_reveal.progress(p);
    let content = config.globe_content_reveal.progress(p);

    TransitionState {
        active: true,
        mask: MaskState {
            visible: true,
            width,
            height: pill.height,
            border_radius: radius,
            scale: mask_scale,
            opacity: mask_opacity,
            blur: clouds_blur,
        },
        initial_text: TextState {
            opacity: initial_opacity,
            blur: initial_blur,
            scale: text_inverse_scale,
        },
        pill_text: PillTextState {
            opacity: pill_opacity,
            blur: pill_blur,
            offset_x,
            color,
        },
        clouds_video_scale: video_scale,
        globe: LayerState {
            opacity: globe,
            blur: config.blur.globe * (1.0 - globe),
            scale: lerp(config.globe_scale_from, 1.0, globe),
        },
        globe_content: LayerState {
            opacity: content,
            blur: config.blur.globe_content * (1.0 - content),
            scale: 1.0,
        },
        right_text_offset: config.right_text_offset * (1.0 - slide),
        globe_playing: p >= config.globe_reveal.start,
        clouds_media_progress: clamp(p, 0.0, 1.0),
    }
}
