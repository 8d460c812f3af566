//! Frame driver — one coalesced recompute per frame.
//!
//! Input handlers only touch the scroll target and mark a frame as
//! pending.  `on_frame` is the single place where boundaries, the scroll
//! smoother, the pure engine and the media controllers meet.

use std::time::{Duration, Instant};

use crate::core::boundaries::{BoundaryCalculator, SectionBoundaries};
use crate::core::frame::{compute_frame, FrameOutput, Journey, Viewport};
use crate::core::motion::EntranceStyle;
use crate::core::section::measure;
use crate::core::transition::TransitionState;

use super::media::{ClipPlayer, LoopingMedia, ScrubbedMedia};
use super::scroll::ScrollState;

/// Published values closer than this to the last published one are skipped.
pub const PUBLISH_EPSILON: f64 = 0.001;

/// Globe clip rest position, seconds.
pub const GLOBE_REST_SECS: f64 = 10.0;
/// Clouds clip seeks smaller than this are skipped, seconds.
pub const CLOUDS_SEEK_THRESHOLD_SECS: f64 = 0.05;

const GLOBE_CLIP_SECS: f64 = 24.0;
const CLOUDS_CLIP_SECS: f64 = 8.0;

// ───────────────────────────────────────── published ─────────

/// A scalar that only republishes on a meaningful change.
#[derive(Debug, Clone, Copy)]
pub struct Published {
    last: Option<f64>,
    epsilon: f64,
}

impl Published {
    pub fn new(epsilon: f64) -> Self {
        Self { last: None, epsilon }
    }

    /// Offer a fresh value.  Returns `true` when it was published.
    ///
    /// Landing exactly on 0 or 1 always publishes, however small the step.
    pub fn offer(&mut self, value: f64) -> bool {
        let endpoint = value == 0.0 || value == 1.0;
        match self.last {
            Some(last) if last == value => false,
            Some(last) if !endpoint && (value - last).abs() < self.epsilon => false,
            _ => {
                self.last = Some(value);
                true
            }
        }
    }

    pub fn get(&self) -> Option<f64> {
        self.last
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

// ───────────────────────────────────────── scheduler ─────────

/// Collapses any number of requests between two frames into one.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

// ───────────────────────────────────────── session ───────────

/// Runtime knobs the session reads from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub scrub_speed: f64,
    pub smooth_scrub: bool,
    pub autoplay: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            scrub_speed: 0.2,
            smooth_scrub: true,
            autoplay: true,
        }
    }
}

/// Owns everything that lives between frames.
pub struct JourneySession {
    journey: Journey,
    layout: BoundaryCalculator,
    scroll: ScrollState,
    scheduler: FrameScheduler,
    viewport: Viewport,
    globe: LoopingMedia<ClipPlayer>,
    clouds: ScrubbedMedia<ClipPlayer>,
    published_progress: Published,
    published_chrome: Published,
    output: Option<FrameOutput>,
    set_up: bool,
    /// Set once the frame at which the timed entrance finished was drawn.
    entrance_done: bool,
    started_at: Option<Instant>,
    last_frame: Option<Instant>,
}

impl JourneySession {
    pub fn new(journey: Journey, options: SessionOptions) -> Self {
        let mut globe_clip = ClipPlayer::new(Some(GLOBE_CLIP_SECS));
        globe_clip.set_autoplay_blocked(!options.autoplay);
        Self {
            layout: BoundaryCalculator::new(journey.sections.len()),
            journey,
            scroll: ScrollState::new(options.scrub_speed, options.smooth_scrub),
            scheduler: FrameScheduler::default(),
            viewport: Viewport {
                width: 0.0,
                text_width: None,
            },
            globe: LoopingMedia::new(globe_clip, GLOBE_REST_SECS),
            clouds: ScrubbedMedia::new(
                ClipPlayer::new(Some(CLOUDS_CLIP_SECS)),
                CLOUDS_SEEK_THRESHOLD_SECS,
            ),
            published_progress: Published::new(PUBLISH_EPSILON),
            published_chrome: Published::new(PUBLISH_EPSILON),
            output: None,
            set_up: false,
            entrance_done: false,
            started_at: None,
            last_frame: None,
        }
    }

    /// Attach to a viewport.  Refused while already set up.
    pub fn setup(&mut self, viewport: Viewport, now: Instant) -> bool {
        if self.set_up {
            tracing::debug!("session already set up");
            return false;
        }
        self.set_up = true;
        self.entrance_done = false;
        self.started_at = Some(now);
        self.last_frame = Some(now);
        self.resize(viewport);
        tracing::info!(sections = self.journey.sections.len(), "journey session set up");
        true
    }

    /// Cancel pending work and put both clips back at rest.
    pub fn teardown(&mut self) {
        if !self.set_up {
            return;
        }
        self.scheduler.cancel();
        self.scroll.cancel_jump();
        self.globe.reset();
        self.clouds.reset();
        self.published_progress.clear();
        self.published_chrome.clear();
        self.output = None;
        self.set_up = false;
        self.started_at = None;
        self.last_frame = None;
        tracing::info!("journey session torn down");
    }

    /// Remeasure after a layout change.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let widths = measure(&self.journey.sections, viewport.width);
        if self.layout.recompute(&widths, viewport.width).is_ok() {
            let total: f64 = widths.iter().sum();
            self.scroll.set_max(total - viewport.width);
        }
        self.scheduler.request();
    }

    /// User scroll by `dx` pixels.
    pub fn scroll_by(&mut self, dx: f64) {
        self.scroll.scroll_by(dx);
        self.scheduler.request();
    }

    /// Animate to the start of section `index`.
    pub fn jump_to_section(&mut self, index: usize, now: Instant) {
        let Some((start, _)) = self.layout.boundaries().window(index) else {
            tracing::debug!(index, "jump to unknown section ignored");
            return;
        };
        tracing::debug!(index, start, "jump to section");
        self.scroll.jump_to_progress(start, now);
        self.scheduler.request();
    }

    pub fn jump_to_end(&mut self, now: Instant) {
        self.scroll.jump_to_progress(1.0, now);
        self.scheduler.request();
    }

    pub fn set_smoothing(&mut self, on: bool) {
        self.scroll.set_smoothing(on);
    }

    pub fn set_autoplay(&mut self, allowed: bool) {
        self.globe.media_mut().set_autoplay_blocked(!allowed);
    }

    /// Run one frame.  Returns the fresh output when anything was
    /// recomputed, `None` when the frame had nothing to do.
    pub fn on_frame(&mut self, now: Instant) -> Option<&FrameOutput> {
        if !self.set_up {
            return None;
        }
        let dt = self
            .last_frame
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default();
        self.last_frame = Some(now);
        self.globe.media_mut().advance(dt.as_secs_f64());

        let elapsed = self.elapsed(now);
        self.scroll.tick(now);
        let requested = self.scheduler.take();
        let entrance_running = !self.entrance_done;
        if entrance_running && self.entrance_settled(elapsed) {
            self.entrance_done = true;
        }
        if !requested && !self.scroll.is_animating() && !entrance_running {
            return None;
        }

        let output = compute_frame(
            self.scroll.progress(),
            self.layout.boundaries(),
            &self.journey,
            self.viewport,
            elapsed,
        );
        self.drive_media(&output.transition);
        if self.published_progress.offer(output.progress) {
            tracing::trace!(progress = output.progress, "progress published");
        }
        self.published_chrome.offer(output.chrome.opacity);
        self.output = Some(output);
        self.output.as_ref()
    }

    fn drive_media(&mut self, transition: &TransitionState) {
        if !transition.active {
            self.globe.deactivate();
            self.clouds.pause();
            return;
        }
        if self.globe.sync(transition.globe_playing) {
            tracing::debug!(playing = transition.globe_playing, "globe clip switched");
        }
        self.clouds.scrub(transition.clouds_media_progress);
    }

    fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default()
    }

    /// True once every timed entrance has run to completion.
    fn entrance_settled(&self, elapsed: Duration) -> bool {
        let timeline = &self.journey.motion.timeline;
        self.journey
            .sections
            .iter()
            .filter(|s| s.entrance == EntranceStyle::Timeline)
            .all(|s| timeline.is_complete(elapsed, s.elements()))
    }

    // ── accessors for the presentation layer ────────────────────

    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    pub fn boundaries(&self) -> &SectionBoundaries {
        self.layout.boundaries()
    }

    pub fn output(&self) -> Option<&FrameOutput> {
        self.output.as_ref()
    }

    pub fn published_progress(&self) -> f64 {
        self.published_progress.get().unwrap_or(0.0)
    }

    pub fn published_chrome_opacity(&self) -> f64 {
        self.published_chrome.get().unwrap_or(1.0)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn globe(&self) -> &LoopingMedia<ClipPlayer> {
        &self.globe
    }

    pub fn clouds(&self) -> &ScrubbedMedia<ClipPlayer> {
        &self.clouds
    }

    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::media::MediaElement;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        text_width: None,
    };

    fn session() -> (JourneySession, Instant) {
        let mut s = JourneySession::new(
            Journey::default(),
            SessionOptions {
                smooth_scrub: false,
                ..SessionOptions::default()
            },
        );
        let t0 = Instant::now();
        assert!(s.setup(VIEWPORT, t0));
        (s, t0)
    }

    /// Far enough in that the first section's entrance has finished.
    fn settled(t0: Instant) -> Instant {
        t0 + Duration::from_secs(5)
    }

    #[test]
    fn test_published_skips_small_changes() {
        let mut p = Published::new(PUBLISH_EPSILON);
        assert!(p.offer(0.5));
        assert!(!p.offer(0.5005));
        assert!(p.offer(0.502));
        assert_eq!(p.get(), Some(0.502));

        let mut q = Published::new(PUBLISH_EPSILON);
        assert!(q.offer(0.0005));
        assert!(q.offer(0.0));
        assert!(!q.offer(0.0));
        assert!(q.offer(0.9995));
        assert!(q.offer(1.0));
        assert_eq!(q.get(), Some(1.0));
    }

    #[test]
    fn test_small_last_step_into_fullscreen_hides_chrome() {
        let (mut s, t0) = session();
        let t = settled(t0);
        // Chrome fades out over [2200, 2500] px of the 4500 px scroll range.
        s.scroll_by(2499.8);
        s.on_frame(t);
        let near = s.published_chrome_opacity();
        assert!(near > 0.0 && near < PUBLISH_EPSILON);

        s.scroll_by(0.2);
        let out = s.on_frame(t).cloned().unwrap();
        assert_eq!(out.chrome.opacity, 0.0);
        assert!(out.chrome.is_fullscreen);
        assert_eq!(s.published_chrome_opacity(), 0.0);
    }

    #[test]
    fn test_setup_guard() {
        let (mut s, t0) = session();
        assert!(!s.setup(VIEWPORT, t0));
        s.teardown();
        assert!(!s.is_set_up());
        assert!(s.setup(VIEWPORT, t0));
    }

    #[test]
    fn test_many_scroll_events_one_frame() {
        let (mut s, t0) = session();
        let t = settled(t0);
        s.on_frame(t);
        for _ in 0..50 {
            s.scroll_by(10.0);
        }
        assert!(s.has_pending_frame());
        let out = s.on_frame(t).cloned();
        assert!((out.unwrap().progress - 500.0 / 4500.0).abs() < 1e-9);
        // Nothing left to do on the next frame.
        assert!(s.on_frame(t).is_none());
    }

    #[test]
    fn test_entrance_keeps_frames_coming() {
        let (mut s, t0) = session();
        assert!(s.on_frame(t0).is_some());
        assert!(s.on_frame(t0 + Duration::from_millis(16)).is_some());
        assert!(s.on_frame(settled(t0)).is_some());
        assert!(s.on_frame(settled(t0)).is_none());
    }

    #[test]
    fn test_no_frames_before_setup() {
        let mut s = JourneySession::new(Journey::default(), SessionOptions::default());
        s.scroll_by(100.0);
        assert!(s.on_frame(Instant::now()).is_none());
    }

    #[test]
    fn test_jump_to_section_lands_on_boundary() {
        let (mut s, t0) = session();
        s.jump_to_section(1, t0);
        s.on_frame(t0 + Duration::from_secs(1));
        assert!((s.published_progress() - 1000.0 / 4500.0).abs() < 1e-9);
        s.jump_to_section(9, t0);
        assert!((s.published_progress() - 1000.0 / 4500.0).abs() < 1e-9);
    }

    #[test]
    fn test_globe_plays_at_end_and_rests_on_teardown() {
        let (mut s, t0) = session();
        let t = settled(t0);
        s.scroll_by(1e9);
        let out = s.on_frame(t).cloned().unwrap();
        assert!(out.transition.globe_playing);
        assert!(s.globe().media().is_playing());
        assert_eq!(s.clouds().media().current_time(), CLOUDS_CLIP_SECS);

        s.teardown();
        assert!(!s.globe().media().is_playing());
        assert_eq!(s.globe().media().current_time(), GLOBE_REST_SECS);
        assert_eq!(s.clouds().media().current_time(), 0.0);
    }

    #[test]
    fn test_teardown_drops_running_jump() {
        let (mut s, t0) = session();
        let t = settled(t0);
        s.on_frame(t);
        s.jump_to_section(2, t);
        s.teardown();

        assert!(s.setup(VIEWPORT, t));
        s.on_frame(t + Duration::from_secs(2));
        assert_eq!(s.published_progress(), 0.0);
        assert_eq!(s.output().map(|o| o.position.index), Some(0));
    }

    #[test]
    fn test_leaving_transition_pauses_globe() {
        let (mut s, t0) = session();
        let t = settled(t0);
        s.scroll_by(1e9);
        s.on_frame(t);
        s.scroll_by(-1e9);
        let out = s.on_frame(t).cloned().unwrap();
        assert!(!out.transition.active);
        assert!(!s.globe().media().is_playing());
        assert!(!s.globe().is_started());
    }

    #[test]
    fn test_blocked_autoplay_still_renders() {
        let mut s = JourneySession::new(
            Journey::default(),
            SessionOptions {
                autoplay: false,
                smooth_scrub: false,
                ..SessionOptions::default()
            },
        );
        let t0 = Instant::now();
        s.setup(VIEWPORT, t0);
        s.scroll_by(1e9);
        let out = s.on_frame(settled(t0)).cloned().unwrap();
        assert!(out.transition.globe_playing);
        assert!(!s.globe().media().is_playing());
        assert!(s.globe().is_started());
    }

    #[test]
    fn test_degenerate_resize_keeps_layout() {
        let (mut s, _) = session();
        let before = s.boundaries().clone();
        s.resize(Viewport {
            width: 0.0,
            text_width: None,
        });
        assert_eq!(s.boundaries(), &before);
    }
}
