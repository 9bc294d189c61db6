//! Timeline store: the single mutation surface for tracks, playhead,
//! duration, zoom, selection, canvas elements, and history.
//!
//! `TimelineStore` is an owned value. The application constructs one and
//! hands `&mut` access to whatever needs to edit the timeline; there is no
//! global instance.
//!
//! Clip editing operations live in `edit.rs`.

use std::sync::Arc;

use studio_common::{new_id, EditOutcome, EditorConfig, SkipReason, TimeCode};

use crate::canvas::{CanvasElement, CanvasElementDraft, CanvasElementUpdate, CanvasState};
use crate::history::HistoryManager;
use crate::playback::PlaybackState;
use crate::selection::SelectionState;
use crate::snapshot::HistorySnapshot;
use crate::state::{Clip, Track, TrackKind, TrackUpdate};

/// Id of the video track present in a fresh store.
pub const INITIAL_VIDEO_TRACK_ID: &str = "track-video-1";
/// Id of the audio track present in a fresh store.
pub const INITIAL_AUDIO_TRACK_ID: &str = "track-audio-1";

/// Authoritative timeline state.
///
/// Tracks are held as `Arc<Track>` and written copy-on-write, so history
/// snapshots share every track an edit leaves alone.
#[derive(Debug)]
pub struct TimelineStore {
    pub(crate) config: EditorConfig,
    pub(crate) tracks: Vec<Arc<Track>>,
    pub(crate) duration: f64,
    pub(crate) zoom: f64,
    pub(crate) selection: SelectionState,
    pub(crate) playback: PlaybackState,
    pub(crate) hovered_clip_id: Option<String>,
    pub(crate) canvas: CanvasState,
    pub(crate) history: HistoryManager,
}

impl Default for TimelineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineStore {
    /// A store with default configuration: one video and one audio track,
    /// 60 s duration, zoom 1.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let tracks = vec![
            Arc::new(Track::new(
                INITIAL_VIDEO_TRACK_ID,
                "Video Track 1",
                TrackKind::Video,
                config.video_track_height,
            )),
            Arc::new(Track::new(
                INITIAL_AUDIO_TRACK_ID,
                "Audio Track 1",
                TrackKind::Audio,
                config.audio_track_height,
            )),
        ];
        let initial = HistorySnapshot {
            tracks: tracks.clone(),
            selected_clip_id: None,
        };
        Self {
            duration: config.initial_duration.max(config.min_duration),
            zoom: 1.0_f64.max(config.min_zoom).min(config.max_zoom),
            history: HistoryManager::new(initial, config.history_limit),
            config,
            tracks,
            selection: SelectionState::new(),
            playback: PlaybackState::new(),
            hovered_clip_id: None,
            canvas: CanvasState::new(),
        }
    }

    // --- Readers ---

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Tracks in display order.
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Owned copies of all tracks, for consumers that outlive the borrow.
    pub fn snapshot_tracks(&self) -> Vec<Track> {
        self.tracks.iter().map(|t| Track::clone(t)).collect()
    }

    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id).map(|t| &**t)
    }

    pub fn clip(&self, track_id: &str, clip_id: &str) -> Option<&Clip> {
        self.track(track_id)?.clip(clip_id)
    }

    /// Locate a clip by id alone.
    pub fn find_clip_anywhere(&self, clip_id: &str) -> Option<(&Track, &Clip)> {
        self.tracks
            .iter()
            .find_map(|t| t.clip(clip_id).map(|c| (&**t, c)))
    }

    pub fn track_of_clip(&self, clip_id: &str) -> Option<&Track> {
        self.find_clip_anywhere(clip_id).map(|(t, _)| t)
    }

    /// End of the latest clip on a track (0 for an empty or unknown track).
    pub fn last_clip_end(&self, track_id: &str) -> f64 {
        self.track(track_id).map_or(0.0, Track::end_time)
    }

    pub fn total_clips(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn playhead(&self) -> f64 {
        self.playback.current_time.as_secs()
    }

    pub fn playhead_timecode(&self) -> TimeCode {
        self.playback.current_time
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Presentation scale at the current zoom.
    pub fn pixels_per_second(&self) -> f64 {
        self.config.pixels_per_second_at(self.zoom)
    }

    pub fn fps(&self) -> u32 {
        self.config.display_fps
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_clip_id(&self) -> Option<&str> {
        self.selection.primary()
    }

    pub fn selected_clip_ids(&self) -> &[String] {
        self.selection.selected_clips()
    }

    pub fn hovered_clip_id(&self) -> Option<&str> {
        self.hovered_clip_id.as_deref()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    // --- Internal helpers ---

    pub(crate) fn track_index(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Copy-on-write access to a track.
    pub(crate) fn track_mut(&mut self, track_id: &str) -> Option<&mut Track> {
        let index = self.track_index(track_id)?;
        Some(Arc::make_mut(&mut self.tracks[index]))
    }

    /// Record the pre-mutation state. Suppressed inside a batch.
    pub(crate) fn record_history(&mut self, label: &str) {
        let pre = HistorySnapshot::capture(self);
        self.history.record(label, pre);
    }

    /// Grow the duration to cover `end`. Never shrinks.
    pub(crate) fn grow_duration_to(&mut self, end: f64) {
        if end > self.duration {
            self.set_duration(end);
        }
    }

    pub(crate) fn count_tracks(&self, kind: TrackKind) -> usize {
        self.tracks.iter().filter(|t| t.kind == kind).count()
    }

    fn track_height(&self, kind: TrackKind) -> u32 {
        match kind {
            TrackKind::Video => self.config.video_track_height,
            TrackKind::Audio => self.config.audio_track_height,
        }
    }

    // --- Tracks (not recorded in history) ---

    /// Append an empty track named "{Kind} Track {n}" and return its id.
    pub fn add_track(&mut self, kind: TrackKind) -> String {
        let number = self.count_tracks(kind) + 1;
        let id = new_id(&format!("track-{}", kind.as_str()));
        let name = format!("{} Track {}", kind.label(), number);
        let height = self.track_height(kind);
        self.tracks
            .push(Arc::new(Track::new(id.clone(), name, kind, height)));
        tracing::debug!(track_id = %id, kind = kind.as_str(), "Track added");
        id
    }

    /// Remove a track. The last remaining track cannot be removed.
    ///
    /// Selection is left alone even if it points into the removed track.
    pub fn remove_track(&mut self, track_id: &str) -> EditOutcome {
        if self.tracks.len() <= 1 {
            tracing::debug!(track_id, "Remove track skipped: last track");
            return SkipReason::LastTrack.into();
        }
        let Some(index) = self.track_index(track_id) else {
            tracing::debug!(track_id, "Remove track skipped: unknown track");
            return SkipReason::TrackNotFound {
                track_id: track_id.to_string(),
            }
            .into();
        };
        self.tracks.remove(index);
        tracing::debug!(track_id, remaining = self.tracks.len(), "Track removed");
        EditOutcome::Applied
    }

    /// Apply a partial track update without recording history.
    ///
    /// Used for bulk clip attachment; grows the duration if the attached
    /// clips end later than the current duration.
    pub fn update_track(&mut self, track_id: &str, update: TrackUpdate) -> EditOutcome {
        let Some(track) = self.track_mut(track_id) else {
            tracing::debug!(track_id, "Update track skipped: unknown track");
            return SkipReason::TrackNotFound {
                track_id: track_id.to_string(),
            }
            .into();
        };
        update.apply_to(track);
        let end = track.end_time();
        let clips = track.clips.len();
        self.grow_duration_to(end);
        tracing::debug!(track_id, clips, "Track updated");
        EditOutcome::Applied
    }

    // --- Transport ---

    /// Move the playhead, clamped into `[0, duration]`. Non-finite input is ignored.
    pub fn set_playhead(&mut self, time: f64) {
        if !time.is_finite() {
            tracing::debug!(time, "Set playhead skipped: non-finite time");
            return;
        }
        self.playback.seek(time, self.duration);
    }

    /// Set the timeline duration, floored at the configured minimum.
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() {
            tracing::debug!(duration, "Set duration skipped: non-finite duration");
            return;
        }
        self.duration = duration.max(self.config.min_duration);
        tracing::debug!(duration = self.duration, "Duration set");
    }

    /// Set the zoom factor, clamped into the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            tracing::debug!(zoom, "Set zoom skipped: non-finite zoom");
            return;
        }
        self.zoom = zoom.max(self.config.min_zoom).min(self.config.max_zoom);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playback.set_playing(playing);
    }

    pub fn toggle_playing(&mut self) {
        self.playback.toggle_play_pause();
    }

    /// Duration reported by the media collaborator.
    ///
    /// The value is remembered for the end-of-media guard; a positive value
    /// also becomes the timeline duration.
    pub fn handle_duration_change(&mut self, media_duration: f64) {
        self.playback.media_duration = Some(media_duration);
        if media_duration > 0.0 {
            self.set_duration(media_duration);
        }
    }

    /// Time reported by the media collaborator while playing.
    ///
    /// Reaching the known media end stops playback and pins the playhead there.
    pub fn handle_time_update(&mut self, time: f64) {
        match self.playback.media_end() {
            Some(end) if time >= end => {
                self.set_playing(false);
                self.set_playhead(end);
                tracing::debug!(end, "Reached end of media");
            }
            _ => self.set_playhead(time),
        }
    }

    // --- Selection ---

    /// Single-select a clip, or clear the selection with `None`.
    pub fn select_clip(&mut self, clip_id: Option<&str>) -> EditOutcome {
        if let Some(id) = clip_id {
            if self.find_clip_anywhere(id).is_none() {
                tracing::debug!(clip_id = id, "Select skipped: unknown clip");
                return SkipReason::UnknownClip(id.to_string()).into();
            }
        }
        self.selection.select_clip(clip_id);
        EditOutcome::Applied
    }

    /// Toggle a clip in the multi-selection.
    ///
    /// An already-selected id can always be toggled off, even if the clip is gone.
    pub fn toggle_clip_selection(&mut self, clip_id: &str) -> EditOutcome {
        if !self.selection.is_clip_selected(clip_id) && self.find_clip_anywhere(clip_id).is_none() {
            tracing::debug!(clip_id, "Toggle skipped: unknown clip");
            return SkipReason::UnknownClip(clip_id.to_string()).into();
        }
        self.selection.toggle_clip(clip_id);
        EditOutcome::Applied
    }

    pub fn clear_clip_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_hovered_clip(&mut self, clip_id: Option<&str>) {
        self.hovered_clip_id = clip_id.map(str::to_owned);
    }

    // --- History ---

    /// Restore the state before the most recent recorded edit.
    pub fn undo(&mut self) -> EditOutcome {
        let current = HistorySnapshot::capture(self);
        let Some(target) = self.history.undo(current).cloned() else {
            return SkipReason::NothingToUndo.into();
        };
        target.restore(self);
        EditOutcome::Applied
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self) -> EditOutcome {
        let current = HistorySnapshot::capture(self);
        let Some(target) = self.history.redo(current).cloned() else {
            return SkipReason::NothingToRedo.into();
        };
        target.restore(self);
        EditOutcome::Applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a gesture (e.g. a clip drag). Edits until `end_batch` form one
    /// undo step.
    pub fn begin_batch(&mut self, label: &str) {
        let before = HistorySnapshot::capture(self);
        self.history.start_batch(label, before);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Forget all history; the current state becomes the initial entry.
    pub fn clear_history(&mut self) {
        let current = HistorySnapshot::capture(self);
        self.history.clear(current);
    }

    // --- Canvas elements (not recorded in history) ---

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn canvas_elements(&self) -> &[CanvasElement] {
        self.canvas.elements()
    }

    pub fn add_canvas_element(&mut self, draft: CanvasElementDraft) -> String {
        self.canvas.add(draft)
    }

    pub fn remove_canvas_element(&mut self, element_id: &str) -> EditOutcome {
        self.canvas.remove(element_id).into()
    }

    pub fn update_canvas_element(&mut self, element_id: &str, update: CanvasElementUpdate) -> EditOutcome {
        self.canvas.update(element_id, &update).into()
    }

    pub fn select_canvas_element(&mut self, element_id: Option<&str>) -> EditOutcome {
        self.canvas.select(element_id).into()
    }
}
