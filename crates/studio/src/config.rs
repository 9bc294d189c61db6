//! Aggregate configuration for a studio session.

use serde::{Deserialize, Serialize};
use studio_common::{EditorConfig, FlowLayoutConfig, MediaConfig, PlayerConfig};

/// Every tunable of a session in one serde-friendly struct.
///
/// Missing sections fall back to their defaults, so a partial JSON document
/// such as `{ "media": { "fallback_duration": 10.0 } }` is valid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub editor: EditorConfig,
    pub layout: FlowLayoutConfig,
    pub media: MediaConfig,
    pub player: PlayerConfig,
}

impl StudioConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
