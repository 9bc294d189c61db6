//! `studio` -- Application handle for the generative video studio.
//!
//! Ties the crates together without adding state of its own beyond the view
//! mode:
//!
//! - **`Studio`**: owns one `TimelineStore` and one `NodeGraphStore`
//! - **Editor entry**: `Studio::open_editor` projects the graph's flows onto
//!   fresh timeline tracks
//! - **Toolbar commands**: URL and file import, text clips, split/trim/clone
//!   of the selected clip, clip styling
//! - **Playback export**: `Studio::project_data` for the player
//!
//! # Usage
//!
//! ```rust
//! use studio::{Studio, ViewMode};
//!
//! let mut studio = Studio::new();
//! studio.seed_default_graph();
//! let report = studio.open_editor();
//! assert_eq!(report.tracks_added, 3);
//! assert_eq!(studio.view_mode(), ViewMode::Editor);
//!
//! let data = studio.project_data();
//! assert_eq!(data.element_count(), 3);
//! ```

mod actions;
pub mod config;
mod entry;
mod studio;

pub use actions::{ClipStyle, SCRUB_STEP, TEXT_CLIP_NAME, TEXT_CLIP_TEXT};
pub use config::StudioConfig;
pub use entry::EntryReport;
pub use studio::{Studio, ViewMode};

pub use studio_app_state as app_state;
pub use studio_common as common;
pub use studio_node_graph as node_graph;
pub use studio_project as project;
