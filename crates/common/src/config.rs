//! Configuration structs for the timeline editor, flow layout, media, and player.

use serde::{Deserialize, Serialize};

use crate::types::Resolution;

/// Timeline editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Timeline duration of a fresh store, in seconds.
    pub initial_duration: f64,
    /// Floor applied by `set_duration`.
    pub min_duration: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Presentation scale: pixels per second at zoom 1.0.
    pub pixels_per_second: f64,
    pub display_fps: u32,
    /// Maximum history entries kept (None = unbounded).
    pub history_limit: Option<usize>,
    pub video_track_height: u32,
    pub audio_track_height: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_duration: 60.0,
            min_duration: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            pixels_per_second: 100.0,
            display_fps: 30,
            history_limit: None,
            video_track_height: 80,
            audio_track_height: 60,
        }
    }
}

impl EditorConfig {
    /// Pixels per second at the given zoom factor.
    pub fn pixels_per_second_at(&self, zoom: f64) -> f64 {
        zoom * self.pixels_per_second
    }
}

/// Layout policy used when projecting node-graph flows onto tracks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowLayoutConfig {
    /// Duration given to every projected clip.
    pub clip_duration: f64,
    /// Start-time step between consecutive videos of one flow.
    pub clip_step: f64,
    /// Display height of projected tracks.
    pub track_height: u32,
}

impl Default for FlowLayoutConfig {
    fn default() -> Self {
        Self {
            clip_duration: 10.0,
            clip_step: 10.0,
            track_height: 80,
        }
    }
}

/// Media defaults used when real metadata is unavailable.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Substituted when a duration lookup fails.
    pub fallback_duration: f64,
    pub image_duration: f64,
    pub text_duration: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            fallback_duration: 30.0,
            image_duration: 5.0,
            text_duration: 5.0,
        }
    }
}

/// Settings for the document handed to the playback collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub resolution: Resolution,
    pub document_version: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::HD,
            document_version: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_defaults() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.initial_duration, 60.0);
        assert_eq!(cfg.min_duration, 1.0);
        assert_eq!(cfg.history_limit, None);
        assert_eq!(cfg.pixels_per_second_at(2.0), 200.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: EditorConfig = serde_json::from_str(r#"{ "max_zoom": 4.0 }"#).unwrap();
        assert_eq!(cfg.max_zoom, 4.0);
        assert_eq!(cfg.min_zoom, 0.1);

        let layout: FlowLayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(layout, FlowLayoutConfig::default());
    }
}
