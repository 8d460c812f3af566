//! Media playback driven by the transition.
//!
//! Two clips follow the frame output:
//! - the globe clip loops once the globe starts revealing, and rests
//!   paused at a fixed timestamp otherwise ([`LoopingMedia`]);
//! - the clouds clip is scrubbed, its position tied to progress
//!   ([`ScrubbedMedia`]).
//!
//! Playback failures are swallowed: what is drawn never depends on a clip
//! actually playing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MediaError {
    #[error("playback was rejected by the runtime")]
    PlaybackBlocked,
}

/// The slice of a media element the controllers need.
pub trait MediaElement {
    /// Clip duration in seconds, once known.
    fn duration(&self) -> Option<f64>;
    fn current_time(&self) -> f64;
    fn seek(&mut self, secs: f64);
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

// ───────────────────────────────────────── clip player ───────

/// An in-memory clip with a clock, standing in for a decoded video.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    duration: Option<f64>,
    position: f64,
    playing: bool,
    autoplay_blocked: bool,
}

impl ClipPlayer {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            duration,
            position: 0.0,
            playing: false,
            autoplay_blocked: false,
        }
    }

    /// Make subsequent `play` calls fail, like a browser refusing autoplay.
    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
        if blocked {
            self.playing = false;
        }
    }

    /// Advance the clock by `dt` seconds while playing, looping at the end.
    pub fn advance(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        self.position += dt.max(0.0);
        if let Some(d) = self.duration.filter(|d| *d > 0.0) {
            self.position %= d;
        }
    }
}

impl MediaElement for ClipPlayer {
    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, secs: f64) {
        let upper = self.duration.unwrap_or(f64::MAX);
        self.position = secs.clamp(0.0, upper);
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.autoplay_blocked {
            return Err(MediaError::PlaybackBlocked);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

// ───────────────────────────────────────── looping ───────────

/// Two states: paused at `rest_secs`, or playing.  Switches only on a
/// threshold crossing, so repeated frames on the same side are no-ops.
#[derive(Debug)]
pub struct LoopingMedia<M> {
    media: M,
    rest_secs: f64,
    started: bool,
}

impl<M: MediaElement> LoopingMedia<M> {
    pub fn new(mut media: M, rest_secs: f64) -> Self {
        media.seek(rest_secs);
        media.pause();
        Self {
            media,
            rest_secs,
            started: false,
        }
    }

    /// Follow the desired state.  Returns `true` when a switch happened.
    pub fn sync(&mut self, should_play: bool) -> bool {
        match (should_play, self.started) {
            (true, false) => {
                self.media.seek(self.rest_secs);
                if let Err(err) = self.media.play() {
                    tracing::debug!(%err, "looping clip did not start");
                }
                // Marked started either way: no retry loop on a refused play.
                self.started = true;
                true
            }
            (false, true) => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Transition went inactive: stop without rewinding.
    pub fn deactivate(&mut self) {
        if self.started {
            self.media.pause();
            self.started = false;
        }
    }

    /// Pause and return to the rest position.
    pub fn reset(&mut self) {
        self.media.pause();
        self.media.seek(self.rest_secs);
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}

// ───────────────────────────────────────── scrubbed ──────────

/// Position follows progress; seeks are skipped below `threshold_secs`.
#[derive(Debug)]
pub struct ScrubbedMedia<M> {
    media: M,
    last_written: f64,
    threshold_secs: f64,
}

impl<M: MediaElement> ScrubbedMedia<M> {
    pub fn new(mut media: M, threshold_secs: f64) -> Self {
        media.pause();
        Self {
            media,
            last_written: 0.0,
            threshold_secs,
        }
    }

    /// Seek to `progress` of the clip.  Returns `true` when a seek was issued.
    pub fn scrub(&mut self, progress: f64) -> bool {
        let Some(duration) = self.media.duration().filter(|d| *d > 0.0) else {
            return false;
        };
        let target = progress.clamp(0.0, 1.0) * duration;
        if (target - self.last_written).abs() > self.threshold_secs {
            self.media.seek(target);
            self.last_written = target;
            true
        } else {
            false
        }
    }

    pub fn pause(&mut self) {
        self.media.pause();
    }

    pub fn reset(&mut self) {
        self.media.pause();
        self.media.seek(0.0);
        self.last_written = 0.0;
    }

    pub fn media(&self) -> &M {
        &self.media
    }
}
