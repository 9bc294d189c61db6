//! Playback-engine document types.
//!
//! The shape is owned by the player: `{ input: { properties, context, tracks,
//! version } }` with camelCase keys and `s`/`e` start and end seconds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use studio_app_state::ClipKind;
use studio_common::Resolution;

/// Top-level document handed to the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub input: ProjectInput,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub properties: PlayerProperties,
    pub context: PlayerContext,
    pub tracks: Vec<PlayerTrack>,
    pub version: u32,
}

/// Output frame size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProperties {
    pub width: u32,
    pub height: u32,
}

impl From<Resolution> for PlayerProperties {
    fn from(res: Resolution) -> Self {
        Self {
            width: res.width,
            height: res.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerContext {
    pub request_id: String,
}

/// Player track type. Everything that is not audio renders as an element lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerTrackType {
    Audio,
    Element,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerTrack {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PlayerTrackType,
    pub name: String,
    pub elements: Vec<PlayerElement>,
}

/// One clip as the player sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerElement {
    pub id: String,
    pub track_id: String,
    #[serde(rename = "type")]
    pub kind: ClipKind,
    /// Start, in timeline seconds.
    pub s: f64,
    /// End, in timeline seconds (not a duration).
    pub e: f64,
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_effect: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_effects: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<Value>,
}

impl ProjectData {
    pub fn tracks(&self) -> &[PlayerTrack] {
        &self.input.tracks
    }

    pub fn element_count(&self) -> usize {
        self.input.tracks.iter().map(|t| t.elements.len()).sum()
    }

    pub fn element(&self, element_id: &str) -> Option<&PlayerElement> {
        self.input
            .tracks
            .iter()
            .flat_map(|t| t.elements.iter())
            .find(|e| e.id == element_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_json_shape() {
        let element = PlayerElement {
            id: "c1".into(),
            track_id: "t1".into(),
            kind: ClipKind::Video,
            s: 1.0,
            e: 4.0,
            props: Map::new(),
            animation: None,
            text_effect: Some(Value::from("typewriter")),
            frame_effects: None,
            object_fit: None,
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["trackId"], "t1");
        assert_eq!(json["type"], "video");
        assert_eq!(json["textEffect"], "typewriter");
        assert!(json.get("animation").is_none());
        assert!(json.get("objectFit").is_none());
    }

    #[test]
    fn context_and_track_type_names() {
        let ctx = PlayerContext {
            request_id: "r-1".into(),
        };
        assert_eq!(serde_json::to_value(&ctx).unwrap()["requestId"], "r-1");
        assert_eq!(
            serde_json::to_value(PlayerTrackType::Element).unwrap(),
            "element"
        );
        let props = PlayerProperties::from(Resolution::new(1280, 720));
        assert_eq!(props.width, 1280);
    }
}
