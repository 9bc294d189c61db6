//! Clip editing operations on `TimelineStore`.
//!
//! Every operation here records a history entry before changing anything,
//! and only when it is actually going to change something: unknown ids and
//! out-of-range input leave both the timeline and the history untouched.
//! Operations that create a clip return its id; the rest return an
//! `EditOutcome`.

use studio_common::{new_id, EditOutcome, SkipReason};

use crate::state::{Clip, ClipDraft, ClipUpdate, Track, TrackKind};
use crate::store::TimelineStore;

impl TimelineStore {
    /// Resolve a (track, clip) pair or explain why it does not exist.
    fn locate_clip(&self, track_id: &str, clip_id: &str) -> Result<&Clip, SkipReason> {
        let track = self.track(track_id).ok_or_else(|| SkipReason::TrackNotFound {
            track_id: track_id.to_string(),
        })?;
        track.clip(clip_id).ok_or_else(|| SkipReason::ClipNotFound {
            track_id: track_id.to_string(),
            clip_id: clip_id.to_string(),
        })
    }

    /// Mutable access to a clip that `locate_clip` already found.
    fn clip_mut(&mut self, track_id: &str, clip_id: &str) -> Option<&mut Clip> {
        self.track_mut(track_id)?.clip_mut(clip_id)
    }

    /// Append a clip to a track under a fresh id and return the id.
    ///
    /// Drafts without a positive, finite duration are rejected. The timeline
    /// duration grows to cover the clip's end.
    pub fn add_clip(&mut self, track_id: &str, draft: ClipDraft) -> Option<String> {
        if self.track(track_id).is_none() {
            tracing::debug!(track_id, "Add clip skipped: unknown track");
            return None;
        }
        if !(draft.duration.is_finite() && draft.duration > 0.0) {
            let reason = SkipReason::InvalidDuration(draft.duration);
            tracing::debug!(track_id, %reason, "Add clip skipped");
            return None;
        }
        self.record_history("Add clip");

        let id = new_id("clip");
        let end = draft.end_time();
        let track = self.track_mut(track_id)?;
        track.clips.push(draft.into_clip(id.clone()));
        self.grow_duration_to(end);

        tracing::debug!(track_id, clip_id = %id, end, "Clip added");
        Some(id)
    }

    /// Remove a clip and drop it from the selection.
    pub fn remove_clip(&mut self, track_id: &str, clip_id: &str) -> EditOutcome {
        if let Err(reason) = self.locate_clip(track_id, clip_id) {
            tracing::debug!(%reason, "Remove clip skipped");
            return reason.into();
        }
        self.record_history("Remove clip");

        if let Some(track) = self.track_mut(track_id) {
            track.clips.retain(|c| c.id != clip_id);
        }
        self.selection.forget_clip(clip_id);

        tracing::debug!(track_id, clip_id, "Clip removed");
        EditOutcome::Applied
    }

    /// Shallow-merge `update` into a clip.
    ///
    /// Every call is one history entry; continuous drags should be wrapped
    /// in `begin_batch`/`end_batch`.
    pub fn update_clip(&mut self, track_id: &str, clip_id: &str, update: ClipUpdate) -> EditOutcome {
        if let Err(reason) = self.locate_clip(track_id, clip_id) {
            tracing::debug!(%reason, "Update clip skipped");
            return reason.into();
        }
        self.record_history("Update clip");

        if let Some(clip) = self.clip_mut(track_id, clip_id) {
            update.apply_to(clip);
        }
        EditOutcome::Applied
    }

    /// Split a clip at `split_time`, which must lie strictly inside it.
    ///
    /// The first half keeps the original id; the second half gets a fresh id
    /// and is appended to the end of the track. Returns the second half's id.
    pub fn split_clip(&mut self, track_id: &str, clip_id: &str, split_time: f64) -> Option<String> {
        let clip = match self.locate_clip(track_id, clip_id) {
            Ok(clip) => clip.clone(),
            Err(reason) => {
                tracing::debug!(%reason, "Split clip skipped");
                return None;
            }
        };
        if !clip.contains_strictly(split_time) {
            let reason = SkipReason::SplitOutOfRange {
                clip_id: clip_id.to_string(),
                split_time,
            };
            tracing::debug!(%reason, "Split clip skipped");
            return None;
        }
        self.record_history("Split clip");

        let offset = split_time - clip.start_time;
        let source_start = clip.trim_start;
        let source_end = clip.effective_trim_end();
        let second_id = new_id("clip");
        let second = Clip {
            id: second_id.clone(),
            start_time: split_time,
            duration: clip.duration - offset,
            trim_start: source_start + offset,
            trim_end: source_end,
            ..clip
        };

        let track = self.track_mut(track_id)?;
        if let Some(first) = track.clip_mut(clip_id) {
            first.duration = offset;
            first.trim_start = source_start;
            first.trim_end = source_start + offset;
        }
        track.clips.push(second);

        tracing::debug!(track_id, clip_id, split_time, second_id = %second_id, "Clip split");
        Some(second_id)
    }

    /// Move a clip's left and/or right edge.
    ///
    /// Each edge is applied against the clip as it was before the call. A
    /// new start keeps the clip's end in place and shifts the source in-point
    /// by the same amount. A new end sets the duration measured from the
    /// original start and pulls `trim_end` in by how far the end moved.
    ///
    /// A start at or past the clip's end, an end at or before its start, or
    /// a non-finite value is rejected.
    pub fn trim_clip(
        &mut self,
        track_id: &str,
        clip_id: &str,
        new_start: Option<f64>,
        new_end: Option<f64>,
    ) -> EditOutcome {
        let original = match self.locate_clip(track_id, clip_id) {
            Ok(clip) => clip.clone(),
            Err(reason) => {
                tracing::debug!(%reason, "Trim clip skipped");
                return reason.into();
            }
        };
        if new_start.is_none() && new_end.is_none() {
            return SkipReason::EmptyUpdate.into();
        }
        if let Err(reason) = check_trim_points(&original, new_start, new_end) {
            tracing::debug!(%reason, "Trim clip skipped");
            return reason.into();
        }
        self.record_history("Trim clip");

        let Some(clip) = self.clip_mut(track_id, clip_id) else {
            return EditOutcome::Applied;
        };
        if let Some(start) = new_start {
            let delta = start - original.start_time;
            clip.start_time = start;
            clip.trim_start = original.trim_start + delta;
            clip.duration = original.duration - delta;
        }
        if let Some(end) = new_end {
            clip.duration = end - original.start_time;
            clip.trim_end = original.trim_end - (original.end_time() - end);
        }

        tracing::debug!(
            track_id,
            clip_id,
            start = clip.start_time,
            duration = clip.duration,
            "Clip trimmed"
        );
        EditOutcome::Applied
    }

    /// Duplicate a clip onto a brand-new video track appended at the end.
    ///
    /// The copy keeps the original's timing and gets " (Copy)" appended to
    /// its name. Returns the copy's id.
    pub fn clone_clip(&mut self, track_id: &str, clip_id: &str) -> Option<String> {
        let source = match self.locate_clip(track_id, clip_id) {
            Ok(clip) => clip.clone(),
            Err(reason) => {
                tracing::warn!(%reason, "Clone clip skipped");
                return None;
            }
        };
        self.record_history("Clone clip");

        let number = self.count_tracks(TrackKind::Video) + 1;
        let mut track = Track::new(
            new_id("track-video"),
            format!("Video Track {number}"),
            TrackKind::Video,
            self.config.video_track_height,
        );
        let copy_id = new_id("clip");
        let copy = Clip {
            id: copy_id.clone(),
            name: format!("{} (Copy)", source.name),
            ..source
        };
        let end = copy.end_time();
        track.clips.push(copy);

        tracing::debug!(track_id = %track.id, clip_id = %copy_id, "Clip cloned to new track");
        self.tracks.push(std::sync::Arc::new(track));
        self.grow_duration_to(end);
        Some(copy_id)
    }
}

/// Reject trim points that would leave the clip with no positive duration.
fn check_trim_points(clip: &Clip, new_start: Option<f64>, new_end: Option<f64>) -> Result<(), SkipReason> {
    let out_of_range = |time: f64| SkipReason::TrimOutOfRange {
        clip_id: clip.id.clone(),
        time,
    };
    if let Some(start) = new_start {
        if !start.is_finite() || start >= clip.end_time() {
            return Err(out_of_range(start));
        }
    }
    if let Some(end) = new_end {
        if !end.is_finite() || end <= clip.start_time {
            return Err(out_of_range(end));
        }
    }
    Ok(())
}
