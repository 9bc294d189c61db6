//! Edit outcomes and skip reasons (thiserror-based).
//!
//! Editing operations never fail loudly: an operation that references an
//! unknown id, receives out-of-range input, or would break a structural floor
//! is skipped. The reason is still reported as a value so callers and tests
//! can tell an applied edit from a skipped one.

use thiserror::Error;

/// Why an editing operation was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("track not found: {track_id}")]
    TrackNotFound { track_id: String },

    #[error("clip {clip_id} not found on track {track_id}")]
    ClipNotFound { track_id: String, clip_id: String },

    #[error("clip not found on any track: {0}")]
    UnknownClip(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("no clip selected")]
    NoSelection,

    #[error("canvas element not found: {0}")]
    ElementNotFound(String),

    #[error("split time {split_time} is outside clip {clip_id}")]
    SplitOutOfRange { clip_id: String, split_time: f64 },

    #[error("trim point {time} would leave clip {clip_id} empty")]
    TrimOutOfRange { clip_id: String, time: f64 },

    #[error("clip duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("cannot remove the last remaining track")]
    LastTrack,

    #[error("update carries no changes")]
    EmptyUpdate,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Result of an editing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Applied,
    Skipped(SkipReason),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        !self.is_applied()
    }

    /// The skip reason, if the operation did nothing.
    pub fn reason(&self) -> Option<&SkipReason> {
        match self {
            EditOutcome::Applied => None,
            EditOutcome::Skipped(reason) => Some(reason),
        }
    }
}

impl From<SkipReason> for EditOutcome {
    fn from(reason: SkipReason) -> Self {
        EditOutcome::Skipped(reason)
    }
}

impl From<Result<(), SkipReason>> for EditOutcome {
    fn from(result: Result<(), SkipReason>) -> Self {
        match result {
            Ok(()) => EditOutcome::Applied,
            Err(reason) => EditOutcome::Skipped(reason),
        }
    }
}
