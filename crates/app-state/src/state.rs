//! Timeline entity model: tracks, clips, effects, and their partial updates.
//!
//! `Track` and `Clip` are plain serializable values. The store keeps tracks
//! behind `Arc` so history snapshots can share unchanged tracks; everything
//! in this module is unaware of that and works on owned values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form, kind-specific clip properties (font, color, animation, filter...).
pub type Properties = Map<String, Value>;

/// What a clip plays or shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Video,
    Audio,
    Image,
    Text,
    Effect,
}

impl ClipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClipKind::Video => "video",
            ClipKind::Audio => "audio",
            ClipKind::Image => "image",
            ClipKind::Text => "text",
            ClipKind::Effect => "effect",
        }
    }
}

/// Lane type of a track. Fixed at creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
        }
    }

    /// Display label used in auto-numbered track names.
    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Audio => "Audio",
        }
    }
}

/// Effect type identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Blur,
    ColorCorrection,
    Transition,
    Filter,
    Custom,
}

/// An effect applied to a clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub name: String,
    #[serde(default)]
    pub parameters: Properties,
    pub start_time: f64,
    pub duration: f64,
}

/// A timed media, text, or effect segment placed on a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Unique clip identifier.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClipKind,
    /// Position on the track timeline (seconds).
    pub start_time: f64,
    /// Length on the timeline (seconds).
    pub duration: f64,
    /// Offset into the source media where playback starts.
    pub trim_start: f64,
    /// Offset into the source media where playback stops (0 = unset).
    pub trim_end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub properties: Properties,
}

impl Clip {
    /// End time on the timeline.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Trim end with the "unset" case resolved to `trim_start + duration`.
    pub fn effective_trim_end(&self) -> f64 {
        if self.trim_end > 0.0 {
            self.trim_end
        } else {
            self.trim_start + self.duration
        }
    }

    /// Whether `time` falls strictly inside the clip's interval.
    pub fn contains_strictly(&self, time: f64) -> bool {
        time > self.start_time && time < self.end_time()
    }
}

/// A clip description without an id, as handed to `add_clip`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClipKind,
    pub start_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub trim_start: f64,
    #[serde(default)]
    pub trim_end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub properties: Properties,
}

impl ClipDraft {
    /// A draft with untrimmed source and no media attached.
    pub fn new(name: impl Into<String>, kind: ClipKind, start_time: f64, duration: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            start_time,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            video_url: None,
            audio_url: None,
            image_url: None,
            text: None,
            effects: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_trim(mut self, trim_start: f64, trim_end: f64) -> Self {
        self.trim_start = trim_start;
        self.trim_end = trim_end;
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Materialize the draft as a clip with the given id.
    pub fn into_clip(self, id: String) -> Clip {
        Clip {
            id,
            name: self.name,
            kind: self.kind,
            start_time: self.start_time,
            duration: self.duration,
            trim_start: self.trim_start,
            trim_end: self.trim_end,
            video_url: self.video_url,
            audio_url: self.audio_url,
            image_url: self.image_url,
            text: self.text,
            effects: self.effects,
            properties: self.properties,
        }
    }
}

/// Partial clip update. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClipUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ClipKind>,
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub trim_start: Option<f64>,
    pub trim_end: Option<f64>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
    pub text: Option<String>,
    pub effects: Option<Vec<Effect>>,
    pub properties: Option<Properties>,
}

impl ClipUpdate {
    pub fn start_time(start_time: f64) -> Self {
        Self {
            start_time: Some(start_time),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn properties(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
            ..Self::default()
        }
    }

    /// Shallow-merge this update into `clip`.
    pub fn apply_to(&self, clip: &mut Clip) {
        if let Some(name) = &self.name {
            clip.name = name.clone();
        }
        if let Some(kind) = self.kind {
            clip.kind = kind;
        }
        if let Some(v) = self.start_time {
            clip.start_time = v;
        }
        if let Some(v) = self.duration {
            clip.duration = v;
        }
        if let Some(v) = self.trim_start {
            clip.trim_start = v;
        }
        if let Some(v) = self.trim_end {
            clip.trim_end = v;
        }
        if let Some(url) = &self.video_url {
            clip.video_url = Some(url.clone());
        }
        if let Some(url) = &self.audio_url {
            clip.audio_url = Some(url.clone());
        }
        if let Some(url) = &self.image_url {
            clip.image_url = Some(url.clone());
        }
        if let Some(text) = &self.text {
            clip.text = Some(text.clone());
        }
        if let Some(effects) = &self.effects {
            clip.effects = effects.clone();
        }
        if let Some(properties) = &self.properties {
            clip.properties = properties.clone();
        }
    }
}

/// An ordered lane of clips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Clips in insertion order (overlap is allowed).
    pub clips: Vec<Clip>,
    /// Display height in pixels.
    pub height: u32,
    pub muted: bool,
    pub locked: bool,
    pub solo: bool,
}

impl Track {
    /// An empty, unmuted, unlocked track.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TrackKind, height: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            clips: Vec::new(),
            height,
            muted: false,
            locked: false,
            solo: false,
        }
    }

    pub fn clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    pub fn clip_mut(&mut self, clip_id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    /// Latest clip end on this track, or 0 when empty.
    pub fn end_time(&self) -> f64 {
        self.clips.iter().map(Clip::end_time).fold(0.0_f64, f64::max)
    }
}

/// Partial track update. Not recorded in history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackUpdate {
    pub name: Option<String>,
    pub height: Option<u32>,
    pub muted: Option<bool>,
    pub locked: Option<bool>,
    pub solo: Option<bool>,
    pub clips: Option<Vec<Clip>>,
}

impl TrackUpdate {
    pub fn apply_to(&self, track: &mut Track) {
        if let Some(name) = &self.name {
            track.name = name.clone();
        }
        if let Some(height) = self.height {
            track.height = height;
        }
        if let Some(muted) = self.muted {
            track.muted = muted;
        }
        if let Some(locked) = self.locked {
            track.locked = locked;
        }
        if let Some(solo) = self.solo {
            track.solo = solo;
        }
        if let Some(clips) = &self.clips {
            track.clips = clips.clone();
        }
    }
}
