//! Editor toolbar commands built on top of the timeline store.
//!
//! These resolve *where* an edit goes (selected clip, first video track,
//! playhead) and then call the store's ordinary mutators, so every command
//! below records history exactly like the underlying operation does.

use serde_json::Value;
use studio_app_state::{Clip, ClipDraft, ClipKind, ClipUpdate, TrackKind};
use studio_common::{EditOutcome, SkipReason};
use studio_node_graph::video_grid_nodes;
use studio_project::{clip_name_from_url, resolve_duration, MediaProbe};

use crate::studio::Studio;

pub const TEXT_CLIP_NAME: &str = "Text";
pub const TEXT_CLIP_TEXT: &str = "Sample Text";

/// Step used by `nudge_playhead` callers for one keyboard scrub.
pub const SCRUB_STEP: f64 = 1.0;

/// Styling slots a clip's properties can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipStyle {
    Animation,
    TextEffect,
    MediaFilter,
}

impl ClipStyle {
    pub fn key(self) -> &'static str {
        match self {
            ClipStyle::Animation => "animation",
            ClipStyle::TextEffect => "textEffect",
            ClipStyle::MediaFilter => "mediaFilter",
        }
    }
}

/// Media type of an imported file, from its MIME type.
fn import_kind(mime: &str) -> Option<ClipKind> {
    if mime.starts_with("video/") {
        Some(ClipKind::Video)
    } else if mime.starts_with("audio/") {
        Some(ClipKind::Audio)
    } else if mime.starts_with("image/") {
        Some(ClipKind::Image)
    } else {
        None
    }
}

impl Studio {
    fn first_track_of(&self, kind: TrackKind) -> Option<String> {
        self.timeline
            .tracks()
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.id.clone())
    }

    /// First video track, else the first track of any kind.
    fn default_target_track(&self) -> Option<String> {
        self.first_track_of(TrackKind::Video)
            .or_else(|| self.timeline.tracks().first().map(|t| t.id.clone()))
    }

    /// The selected clip and the id of the track holding it.
    fn selected(&self) -> Option<(String, Clip)> {
        let clip_id = self.timeline.selected_clip_id()?;
        let (track, clip) = self.timeline.find_clip_anywhere(clip_id)?;
        Some((track.id.clone(), clip.clone()))
    }

    /// Append a video from `url` to the first video track, creating one if
    /// there is none. The duration comes from `probe`, with the configured
    /// fallback when the probe fails.
    ///
    /// Blank URLs are ignored.
    pub fn load_video_from_url<P: MediaProbe + ?Sized>(&mut self, probe: &P, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let track_id = match self.first_track_of(TrackKind::Video) {
            Some(id) => id,
            None => self.timeline.add_track(TrackKind::Video),
        };
        let duration = resolve_duration(probe, url, &self.config.media);
        let start = self.timeline.last_clip_end(&track_id);

        let draft = ClipDraft::new(clip_name_from_url(url), ClipKind::Video, start, duration)
            .with_trim(0.0, duration)
            .with_video_url(url);
        let clip_id = self.timeline.add_clip(&track_id, draft)?;
        tracing::info!(%track_id, %clip_id, url, duration, "Video loaded from URL");
        Some(clip_id)
    }

    /// Append an imported file after the last clip of the default track.
    ///
    /// Videos and images keep their URL in `video_url` as well; unsupported
    /// MIME types are ignored.
    pub fn import_media(&mut self, name: &str, mime: &str, url: &str) -> Option<String> {
        let Some(kind) = import_kind(mime) else {
            tracing::debug!(name, mime, "Import skipped: unsupported media type");
            return None;
        };
        let track_id = self.default_target_track()?;
        let duration = match kind {
            ClipKind::Image => self.config.media.image_duration,
            _ => self.config.media.fallback_duration,
        };
        let start = self.timeline.last_clip_end(&track_id);

        let mut draft = ClipDraft::new(name, kind, start, duration).with_trim(0.0, duration);
        match kind {
            ClipKind::Audio => draft = draft.with_audio_url(url),
            ClipKind::Image => draft = draft.with_video_url(url).with_image_url(url),
            _ => draft = draft.with_video_url(url),
        }
        self.timeline.add_clip(&track_id, draft)
    }

    /// Add a default text clip at the playhead.
    ///
    /// It goes on the selected clip's track, else the first video track,
    /// else the first track.
    pub fn add_text_clip(&mut self) -> Option<String> {
        let track_id = self
            .selected()
            .map(|(track_id, _)| track_id)
            .or_else(|| self.default_target_track())?;
        let duration = self.config.media.text_duration;

        let draft = ClipDraft::new(TEXT_CLIP_NAME, ClipKind::Text, self.timeline.playhead(), duration)
            .with_trim(0.0, duration)
            .with_text(TEXT_CLIP_TEXT)
            .with_property("fontSize", 48)
            .with_property("color", "#ffffff")
            .with_property("fontFamily", "Arial")
            .with_property("x", 0.5)
            .with_property("y", 0.5)
            .with_property("alignment", "center");
        self.timeline.add_clip(&track_id, draft)
    }

    /// Split the selected clip at the playhead. Returns the new right half's id.
    pub fn split_selected_at_playhead(&mut self) -> Option<String> {
        let (track_id, clip) = self.selected()?;
        let playhead = self.timeline.playhead();
        self.timeline.split_clip(&track_id, &clip.id, playhead)
    }

    /// Delete the selected clip and clear the selection.
    pub fn delete_selected(&mut self) -> EditOutcome {
        let Some((track_id, clip)) = self.selected() else {
            return self.nothing_selected();
        };
        let outcome = self.timeline.remove_clip(&track_id, &clip.id);
        self.timeline.select_clip(None);
        outcome
    }

    pub fn clone_selected(&mut self) -> Option<String> {
        let (track_id, clip) = self.selected()?;
        self.timeline.clone_clip(&track_id, &clip.id)
    }

    /// Cut the selected clip's head off at the playhead.
    ///
    /// Only applies while the playhead is strictly inside the clip.
    pub fn trim_selected_start(&mut self) -> EditOutcome {
        self.trim_selected(true)
    }

    /// Cut the selected clip's tail off at the playhead.
    pub fn trim_selected_end(&mut self) -> EditOutcome {
        self.trim_selected(false)
    }

    fn trim_selected(&mut self, head: bool) -> EditOutcome {
        let Some((track_id, clip)) = self.selected() else {
            return self.nothing_selected();
        };
        let playhead = self.timeline.playhead();
        if !clip.contains_strictly(playhead) {
            return SkipReason::SplitOutOfRange {
                clip_id: clip.id,
                split_time: playhead,
            }
            .into();
        }
        if head {
            self.timeline.trim_clip(&track_id, &clip.id, Some(playhead), None)
        } else {
            self.timeline.trim_clip(&track_id, &clip.id, None, Some(playhead))
        }
    }

    /// Set or clear (`None`, or a falsy value) one styling slot of the
    /// selected clip. Other properties are kept.
    pub fn set_selected_clip_style(&mut self, style: ClipStyle, value: Option<Value>) -> EditOutcome {
        let Some((track_id, clip)) = self.selected() else {
            return self.nothing_selected();
        };
        let mut properties = clip.properties;
        match value.filter(studio_project::is_truthy) {
            Some(value) => {
                properties.insert(style.key().to_string(), value);
            }
            None => {
                properties.remove(style.key());
            }
        }
        self.timeline
            .update_clip(&track_id, &clip.id, ClipUpdate::properties(properties))
    }

    /// Move the playhead by `delta` seconds, clamped to the timeline.
    pub fn nudge_playhead(&mut self, delta: f64) {
        let target = self.timeline.playhead() + delta;
        self.timeline.set_playhead(target);
    }

    /// Add a completed video node for `video_url` to the graph.
    pub fn add_video_node(&mut self, video_url: &str) -> Option<String> {
        let node = video_grid_nodes(&[video_url]).into_iter().next()?;
        Some(self.graph.add_node(node))
    }

    fn nothing_selected(&self) -> EditOutcome {
        tracing::debug!("Toolbar command skipped: no clip selected");
        SkipReason::NoSelection.into()
    }
}
