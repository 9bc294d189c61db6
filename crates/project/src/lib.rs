//! `studio-project` -- Playback document export and media-duration resolution.
//!
//! The editor never renders anything itself. It hands the player a JSON
//! document describing every track and clip, and asks an external probe how
//! long a media URL plays. This crate covers both seams:
//!
//! - **Conversion**: `convert_tracks_to_project_data` turns timeline tracks
//!   into the player's `{ input: { tracks: [{ elements }] } }` shape
//! - **Save/Load**: JSON serialization of the document and a version-checked parse
//! - **Media**: the `MediaProbe` trait and its fallback policy
//!
//! # Usage
//!
//! ```rust
//! use studio_app_state::TimelineStore;
//! use studio_common::Resolution;
//! use studio_project::{convert_tracks_to_project_data, to_json_string_compact};
//!
//! let store = TimelineStore::new();
//! let data = convert_tracks_to_project_data(store.tracks(), Resolution::HD, "req-1");
//! assert_eq!(data.input.tracks.len(), 2);
//! let json = to_json_string_compact(&data).unwrap();
//! assert!(json.contains("\"requestId\":\"req-1\""));
//! ```

pub mod convert;
pub mod error;
pub mod load;
pub mod media;
pub mod save;
pub mod types;

pub use convert::{convert_tracks_to_project_data, convert_with_config, is_truthy};
pub use error::{ProjectError, ProjectResult};
pub use load::from_json_string;
pub use media::{
    clip_name_from_url, resolve_duration, KnownDurations, MediaError, MediaProbe, URL_CLIP_FALLBACK_NAME,
};
pub use save::{to_json_string, to_json_string_compact};
pub use types::{
    PlayerContext, PlayerElement, PlayerProperties, PlayerTrack, PlayerTrackType, ProjectData, ProjectInput,
};
