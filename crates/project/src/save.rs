//! Document serialization: writing `ProjectData` to JSON.

use tracing::debug;

use crate::error::ProjectResult;
use crate::types::ProjectData;

/// Serialize a document to a pretty-printed JSON string.
pub fn to_json_string(data: &ProjectData) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(data)?;
    debug!(
        request_id = %data.input.context.request_id,
        json_len = json.len(),
        "Serialized project data to JSON"
    );
    Ok(json)
}

/// Serialize a document to a compact JSON string, as sent to the player.
pub fn to_json_string_compact(data: &ProjectData) -> ProjectResult<String> {
    let json = serde_json::to_string(data)?;
    debug!(
        request_id = %data.input.context.request_id,
        json_len = json.len(),
        "Serialized project data to compact JSON"
    );
    Ok(json)
}
