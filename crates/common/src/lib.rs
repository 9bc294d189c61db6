//! `studio-common` -- Shared types, configuration, and outcomes for the studio editor core.
//!
//! This crate is the foundation that all other studio crates depend on:
//!
//! - **Types**: `TimeCode`, `Resolution`, timecode text formatting and parsing
//! - **Ids**: fresh `{prefix}-{uuid}` identifiers for new entities
//! - **Outcomes**: `EditOutcome` / `SkipReason` (thiserror-based)
//! - **Config**: `EditorConfig`, `FlowLayoutConfig`, `MediaConfig`, `PlayerConfig`

pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use config::{EditorConfig, FlowLayoutConfig, MediaConfig, PlayerConfig};
pub use error::{EditOutcome, SkipReason};
pub use ids::new_id;
pub use types::{format_timecode, parse_timecode, Resolution, TimeCode, TIMECODE_FPS};
