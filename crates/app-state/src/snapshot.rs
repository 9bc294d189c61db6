//! Structurally shared timeline snapshot for undo/redo.
//!
//! A `HistorySnapshot` holds the track list as `Arc<Track>` handles. Capturing
//! clones the handles, not the tracks; the store copies a track on first write
//! (`Arc::make_mut`), so consecutive snapshots share every track an edit did
//! not touch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::state::{Clip, Track};
use crate::store::TimelineStore;

/// Tracks plus the primary clip selection at one point in time.
///
/// Playback state, zoom, duration, the multi-selection, and canvas elements
/// are not captured; undo/redo leaves them alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub tracks: Vec<Arc<Track>>,
    pub selected_clip_id: Option<String>,
}

impl HistorySnapshot {
    /// Capture the store's current tracks and primary selection.
    pub fn capture(store: &TimelineStore) -> Self {
        Self {
            tracks: store.tracks.clone(),
            selected_clip_id: store.selection.primary().map(str::to_owned),
        }
    }

    /// Write the snapshot back into `store`. Only tracks and the primary
    /// selection are replaced.
    pub fn restore(&self, store: &mut TimelineStore) {
        store.tracks = self.tracks.clone();
        store.selection.set_primary(self.selected_clip_id.clone());

        tracing::debug!(
            tracks = store.tracks.len(),
            clips = store.total_clips(),
            "Snapshot restored"
        );
    }

    /// Number of tracks physically shared (same allocation) with `other`.
    pub fn shared_tracks_with(&self, other: &HistorySnapshot) -> usize {
        self.tracks
            .iter()
            .filter(|a| other.tracks.iter().any(|b| Arc::ptr_eq(a, b)))
            .count()
    }

    /// Rough memory footprint of the data this snapshot does not share.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        for track in &self.tracks {
            size += std::mem::size_of::<Track>();
            size += track.id.len() + track.name.len();
            for clip in &track.clips {
                size += std::mem::size_of::<Clip>();
                size += clip.id.len() + clip.name.len();
            }
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClipDraft, ClipKind, TrackKind};

    #[test]
    fn capture_shares_tracks_with_store() {
        let store = TimelineStore::new();
        let a = HistorySnapshot::capture(&store);
        let b = HistorySnapshot::capture(&store);
        assert_eq!(a.shared_tracks_with(&b), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn edit_copies_only_touched_track() {
        let mut store = TimelineStore::new();
        let before = HistorySnapshot::capture(&store);

        let video = store.tracks()[0].id.clone();
        store.add_clip(&video, ClipDraft::new("A", ClipKind::Video, 0.0, 5.0));

        let after = HistorySnapshot::capture(&store);
        // The audio track is untouched and still physically shared.
        assert_eq!(before.shared_tracks_with(&after), 1);
        assert!(before.tracks[0].clips.is_empty());
        assert_eq!(after.tracks[0].clips.len(), 1);
    }

    #[test]
    fn restore_replaces_tracks_and_primary_only() {
        let mut store = TimelineStore::new();
        let snapshot = HistorySnapshot::capture(&store);

        store.add_track(TrackKind::Audio);
        store.set_zoom(3.0);
        assert_eq!(store.tracks().len(), 3);

        snapshot.restore(&mut store);
        assert_eq!(store.tracks().len(), 2);
        assert_eq!(store.zoom(), 3.0);
        assert_eq!(store.selected_clip_id(), None);
    }

    #[test]
    fn estimated_size_grows_with_content() {
        let mut store = TimelineStore::new();
        let empty = HistorySnapshot::capture(&store).estimated_size();
        let video = store.tracks()[0].id.clone();
        store.add_clip(&video, ClipDraft::new("A", ClipKind::Video, 0.0, 5.0));
        let full = HistorySnapshot::capture(&store).estimated_size();
        assert!(full > empty);
    }
}
