//! `studio-app-state` -- Timeline state management for the studio editor.
//!
//! This crate provides:
//!
//! - **`TimelineStore`**: the mutation surface for tracks, clips, playhead, duration, zoom,
//!   selection, and canvas elements. One owned instance per application, passed by reference.
//! - **`HistoryManager`**: cursor-based undo/redo over structurally shared snapshots.
//! - **`HistorySnapshot`**: tracks (as `Arc<Track>`) plus the primary selected clip.
//! - **`SelectionState`**: primary clip plus ordered multi-selection.
//! - **`PlaybackState`**: playhead, play/pause flag, media end guard.
//!
//! # Architecture
//!
//! ```text
//! TimelineStore
//! ├── tracks: Vec<Arc<Track>>        (copy-on-write timeline data)
//! ├── duration / zoom                (clamped by EditorConfig)
//! ├── selection: SelectionState      (what's selected)
//! ├── playback: PlaybackState        (transport state)
//! ├── canvas: CanvasState            (free-positioned overlays)
//! └── history: HistoryManager
//!     ├── entries: Vec<HistoryEntry> (snapshots, oldest first)
//!     ├── cursor                     (live slot)
//!     └── batch support              (one gesture = one step)
//! ```

pub mod canvas;
mod edit;
pub mod history;
pub mod playback;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod store;

// Re-export primary types at crate root for convenience.
pub use canvas::{CanvasElement, CanvasElementDraft, CanvasElementKind, CanvasElementUpdate, CanvasState};
pub use history::{HistoryEntry, HistoryManager};
pub use playback::{PlaybackMode, PlaybackState};
pub use selection::SelectionState;
pub use snapshot::HistorySnapshot;
pub use state::{
    Clip, ClipDraft, ClipKind, ClipUpdate, Effect, EffectKind, Properties, Track, TrackKind, TrackUpdate,
};
pub use store::{TimelineStore, INITIAL_AUDIO_TRACK_ID, INITIAL_VIDEO_TRACK_ID};
