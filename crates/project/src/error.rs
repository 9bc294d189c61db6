//! Error types for the project crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur while serializing or parsing a playback document.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document version is not the one the player understands.
    #[error("Unsupported document version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
