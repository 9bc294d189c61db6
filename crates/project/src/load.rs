//! Document deserialization: reading a player document back from JSON.

use studio_common::PlayerConfig;
use tracing::debug;

use crate::error::{ProjectError, ProjectResult};
use crate::types::ProjectData;

/// Parse a document, rejecting versions the player does not understand.
pub fn from_json_string(json: &str) -> ProjectResult<ProjectData> {
    let data: ProjectData = serde_json::from_str(json)?;

    let expected = PlayerConfig::default().document_version;
    if data.input.version != expected {
        return Err(ProjectError::UnsupportedVersion {
            version: data.input.version,
        });
    }

    debug!(
        tracks = data.input.tracks.len(),
        elements = data.element_count(),
        "Deserialized project data"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::to_json_string;
    use crate::convert::convert_tracks_to_project_data;
    use studio_app_state::{ClipDraft, ClipKind, Track, TrackKind};
    use studio_common::Resolution;

    fn sample() -> ProjectData {
        let mut track = Track::new("track-audio-1", "Audio Track 1", TrackKind::Audio, 60);
        track.clips.push(
            ClipDraft::new("Music", ClipKind::Audio, 1.0, 9.0)
                .with_audio_url("song.mp3")
                .into_clip("clip-a".into()),
        );
        convert_tracks_to_project_data(&[track], Resolution::HD, "load-test")
    }

    #[test]
    fn parses_exported_document() {
        let original = sample();
        let json = to_json_string(&original).unwrap();
        let parsed = from_json_string(&json).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.element("clip-a").unwrap().props["volume"], 0.5);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut data = sample();
        data.input.version = 2;
        let json = to_json_string(&data).unwrap();
        let err = from_json_string(&json).unwrap_err();
        assert!(matches!(err, ProjectError::UnsupportedVersion { version: 2 }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            from_json_string("{ \"input\": 3 }"),
            Err(ProjectError::Json(_))
        ));
    }
}
