//! Playback transport state: playhead, play/pause, and the media end guard.

use serde::{Deserialize, Serialize};
use studio_common::TimeCode;

/// Current playback mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    #[default]
    Paused,
    Playing,
}

/// Playhead and transport flag, plus the duration last reported by the
/// media element.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    pub mode: PlaybackMode,
    /// Current playhead position.
    pub current_time: TimeCode,
    /// Duration reported by the media collaborator (None until reported).
    pub media_duration: Option<f64>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    pub fn play(&mut self) {
        self.mode = PlaybackMode::Playing;
        tracing::debug!(time = %self.current_time, "Playback started");
    }

    pub fn pause(&mut self) {
        self.mode = PlaybackMode::Paused;
        tracing::debug!(time = %self.current_time, "Playback paused");
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.play();
        } else {
            self.pause();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        match self.mode {
            PlaybackMode::Playing => self.pause(),
            PlaybackMode::Paused => self.play(),
        }
    }

    /// Move the playhead to `time`, clamped into `[0, duration]`.
    pub fn seek(&mut self, time: f64, duration: f64) {
        self.current_time = TimeCode::from_secs(time).clamp(0.0, duration);
    }

    /// The media end the guard should stop at, if one is known and positive.
    pub fn media_end(&self) -> Option<f64> {
        self.media_duration.filter(|d| *d > 0.0)
    }
}
