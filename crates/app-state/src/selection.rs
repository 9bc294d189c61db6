//! Clip selection: a primary clip plus an ordered multi-selection.

use serde::{Deserialize, Serialize};

/// Which clips are currently selected.
///
/// `primary` is the clip most recently brought into focus; `clips` is the
/// ordered multi-selection. Neither is validated against the timeline here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    primary: Option<String>,
    clips: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-select `clip_id`, or clear everything with `None`.
    pub fn select_clip(&mut self, clip_id: Option<&str>) {
        self.clips.clear();
        self.primary = clip_id.map(str::to_owned);
        if let Some(id) = clip_id {
            self.clips.push(id.to_string());
        }
    }

    /// Add `clip_id` to the multi-selection (making it primary), or remove it
    /// if already present.
    ///
    /// Removing the primary hands primary status to the last remaining
    /// selected clip, if any.
    pub fn toggle_clip(&mut self, clip_id: &str) {
        if self.is_clip_selected(clip_id) {
            self.clips.retain(|id| id != clip_id);
            if self.primary.as_deref() == Some(clip_id) {
                self.primary = self.clips.last().cloned();
            }
        } else {
            self.clips.push(clip_id.to_string());
            self.primary = Some(clip_id.to_string());
        }
    }

    /// Forget a clip that no longer exists.
    pub fn forget_clip(&mut self, clip_id: &str) {
        self.clips.retain(|id| id != clip_id);
        if self.primary.as_deref() == Some(clip_id) {
            self.primary = None;
        }
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.clips.clear();
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Overwrite the primary clip without touching the multi-selection.
    pub(crate) fn set_primary(&mut self, clip_id: Option<String>) {
        self.primary = clip_id;
    }

    pub fn selected_clips(&self) -> &[String] {
        &self.clips
    }

    pub fn is_clip_selected(&self, clip_id: &str) -> bool {
        self.clips.iter().any(|id| id == clip_id)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.clips.is_empty()
    }
}
