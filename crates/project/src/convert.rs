//! Timeline → playback document conversion.
//!
//! Pure function of the tracks: no store access, no history. Defaults follow
//! the player's truthiness rules, so `0`, `""`, `false` and `null` count as
//! unset wherever a fallback exists.

use std::borrow::Borrow;

use serde_json::{Map, Value};
use studio_app_state::{Clip, ClipKind, Track, TrackKind};
use studio_common::{PlayerConfig, Resolution};
use tracing::debug;

use crate::types::{
    PlayerContext, PlayerElement, PlayerProperties, PlayerTrack, PlayerTrackType, ProjectData,
    ProjectInput,
};

pub const DEFAULT_TEXT: &str = "Sample Text";
pub const DEFAULT_FONT_SIZE: u32 = 48;
pub const DEFAULT_FILL: &str = "#ffffff";
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Properties lifted out of the props bag onto the element itself.
const LIFTED_KEYS: [&str; 4] = ["animation", "textEffect", "frameEffects", "objectFit"];

/// Convert tracks into the player document at `resolution`.
pub fn convert_tracks_to_project_data<T: Borrow<Track>>(
    tracks: &[T],
    resolution: Resolution,
    request_id: &str,
) -> ProjectData {
    let config = PlayerConfig {
        resolution,
        ..PlayerConfig::default()
    };
    convert_with_config(tracks, &config, request_id)
}

/// Convert tracks using an explicit player configuration.
pub fn convert_with_config<T: Borrow<Track>>(
    tracks: &[T],
    config: &PlayerConfig,
    request_id: &str,
) -> ProjectData {
    let tracks: Vec<PlayerTrack> = tracks
        .iter()
        .map(|t| {
            let track: &Track = t.borrow();
            convert_track(track)
        })
        .collect();

    debug!(
        request_id,
        tracks = tracks.len(),
        elements = tracks.iter().map(|t| t.elements.len()).sum::<usize>(),
        resolution = %config.resolution,
        "Converted timeline to project data"
    );

    ProjectData {
        input: ProjectInput {
            properties: PlayerProperties::from(config.resolution),
            context: PlayerContext {
                request_id: request_id.to_string(),
            },
            tracks,
            version: config.document_version,
        },
    }
}

fn convert_track(track: &Track) -> PlayerTrack {
    let kind = match track.kind {
        TrackKind::Audio => PlayerTrackType::Audio,
        _ => PlayerTrackType::Element,
    };
    PlayerTrack {
        id: track.id.clone(),
        kind,
        name: track.name.clone(),
        elements: track
            .clips
            .iter()
            .map(|clip| convert_clip(&track.id, clip))
            .collect(),
    }
}

fn convert_clip(track_id: &str, clip: &Clip) -> PlayerElement {
    let mut rest = clip.properties.clone();
    let [animation, text_effect, frame_effects, object_fit] =
        LIFTED_KEYS.map(|key| rest.remove(key).filter(is_truthy));

    let mut props = Map::new();
    match clip.kind {
        ClipKind::Video => {
            props.insert("src".into(), source(clip.video_url.as_deref()));
            props.insert("play".into(), Value::Bool(true));
            insert_resume_time(&mut props, clip);
        }
        ClipKind::Audio => {
            props.insert("src".into(), source(clip.audio_url.as_deref()));
            props.insert("play".into(), Value::Bool(true));
            props.insert(
                "volume".into(),
                truthy_or(&clip.properties, "volume", Value::from(DEFAULT_VOLUME)),
            );
            insert_resume_time(&mut props, clip);
        }
        ClipKind::Image => {
            props.insert("src".into(), source(clip.image_url.as_deref()));
        }
        ClipKind::Text => text_props(&mut props, clip),
        ClipKind::Effect => {
            // Effect clips pass every property through, lifted ones included.
            props.extend(clip.properties.clone());
        }
    }
    props.extend(rest);

    PlayerElement {
        id: clip.id.clone(),
        track_id: track_id.to_string(),
        kind: clip.kind,
        s: clip.start_time,
        e: clip.end_time(),
        props,
        animation,
        text_effect,
        frame_effects,
        object_fit,
    }
}

fn text_props(props: &mut Map<String, Value>, clip: &Clip) {
    let p = &clip.properties;
    let text = clip
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TEXT);
    props.insert("text".into(), Value::from(text));
    props.insert("fontSize".into(), truthy_or(p, "fontSize", Value::from(DEFAULT_FONT_SIZE)));
    props.insert("fill".into(), truthy_or(p, "color", Value::from(DEFAULT_FILL)));
    props.insert(
        "fontFamily".into(),
        truthy_or(p, "fontFamily", Value::from(DEFAULT_FONT_FAMILY)),
    );
    for key in ["x", "y"] {
        if let Some(value) = p.get(key) {
            props.insert(key.into(), value.clone());
        }
    }
    if let Some(align) = p.get("alignment").filter(|v| is_truthy(v)) {
        props.insert("textAlign".into(), align.clone());
    }
    for key in ["maxWidth", "textWrap"] {
        if let Some(value) = p.get(key).filter(|v| is_truthy(v)) {
            props.insert(key.into(), value.clone());
        }
    }
}

/// Trimmed media resumes from its trim start.
fn insert_resume_time(props: &mut Map<String, Value>, clip: &Clip) {
    if clip.trim_start > 0.0 || clip.trim_end > 0.0 {
        props.insert("time".into(), Value::from(clip.trim_start));
    }
}

fn source(url: Option<&str>) -> Value {
    Value::from(url.unwrap_or_default())
}

fn truthy_or(props: &Map<String, Value>, key: &str, fallback: Value) -> Value {
    props
        .get(key)
        .filter(|v| is_truthy(v))
        .cloned()
        .unwrap_or(fallback)
}

/// Player-side truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use studio_app_state::ClipDraft;

    fn track(kind: TrackKind, clips: Vec<Clip>) -> Track {
        let mut t = Track::new("t1", "Track", kind, 80);
        t.clips = clips;
        t
    }

    fn convert_one(kind: TrackKind, clip: Clip) -> PlayerElement {
        let data = convert_tracks_to_project_data(&[track(kind, vec![clip])], Resolution::HD, "req");
        data.input.tracks[0].elements[0].clone()
    }

    #[test]
    fn document_envelope() {
        let tracks = vec![
            track(TrackKind::Video, vec![]),
            Track::new("a1", "Audio", TrackKind::Audio, 60),
        ];
        let data = convert_tracks_to_project_data(&tracks, Resolution::new(1280, 720), "req-7");
        assert_eq!(data.input.version, 1);
        assert_eq!(data.input.properties.width, 1280);
        assert_eq!(data.input.context.request_id, "req-7");
        assert_eq!(data.input.tracks[0].kind, PlayerTrackType::Element);
        assert_eq!(data.input.tracks[1].kind, PlayerTrackType::Audio);
        assert_eq!(data.element_count(), 0);
    }

    #[test]
    fn video_element_uses_end_not_duration() {
        let clip = ClipDraft::new("v", ClipKind::Video, 2.0, 3.0)
            .with_video_url("https://x/v.mp4")
            .into_clip("c1".into());
        let el = convert_one(TrackKind::Video, clip);
        assert_eq!(el.s, 2.0);
        assert_eq!(el.e, 5.0);
        assert_eq!(el.track_id, "t1");
        assert_eq!(el.props["src"], "https://x/v.mp4");
        assert_eq!(el.props["play"], true);
        assert!(el.props.get("time").is_none());
    }

    #[test]
    fn trimmed_video_resumes_at_trim_start() {
        let clip = ClipDraft::new("v", ClipKind::Video, 0.0, 3.0)
            .with_trim(0.0, 4.0)
            .into_clip("c1".into());
        let el = convert_one(TrackKind::Video, clip);
        assert_eq!(el.props["src"], "");
        assert_eq!(el.props["time"], 0.0);
    }

    #[test]
    fn audio_volume_falls_back_on_falsy() {
        let clip = ClipDraft::new("a", ClipKind::Audio, 0.0, 3.0)
            .with_audio_url("a.mp3")
            .with_property("volume", 0)
            .into_clip("c1".into());
        let el = convert_one(TrackKind::Audio, clip);
        assert_eq!(el.props["src"], "a.mp3");
        // Custom properties merge last and overwrite.
        assert_eq!(el.props["volume"], 0);

        let clip = ClipDraft::new("a", ClipKind::Audio, 0.0, 3.0).into_clip("c2".into());
        assert_eq!(convert_one(TrackKind::Audio, clip).props["volume"], 0.5);
    }

    #[test]
    fn text_defaults_and_styling() {
        let clip = ClipDraft::new("t", ClipKind::Text, 0.0, 5.0)
            .with_text("")
            .into_clip("c1".into());
        let el = convert_one(TrackKind::Video, clip);
        assert_eq!(el.props["text"], DEFAULT_TEXT);
        assert_eq!(el.props["fontSize"], 48);
        assert_eq!(el.props["fill"], "#ffffff");
        assert_eq!(el.props["fontFamily"], "Arial");
        assert!(el.props.get("x").is_none());
        assert!(el.props.get("textAlign").is_none());

        let clip = ClipDraft::new("t", ClipKind::Text, 0.0, 5.0)
            .with_text("Hello")
            .with_property("color", "#ff0000")
            .with_property("x", 0)
            .with_property("alignment", "left")
            .with_property("maxWidth", 0)
            .into_clip("c2".into());
        let el = convert_one(TrackKind::Video, clip);
        assert_eq!(el.props["text"], "Hello");
        assert_eq!(el.props["fill"], "#ff0000");
        assert_eq!(el.props["x"], 0);
        assert_eq!(el.props["textAlign"], "left");
        // Falsy maxWidth is not translated but still merged verbatim.
        assert_eq!(el.props["maxWidth"], 0);
        assert_eq!(el.props["alignment"], "left");
    }

    #[test]
    fn lifted_properties_leave_props_bag() {
        let clip = ClipDraft::new("v", ClipKind::Video, 0.0, 1.0)
            .with_property("animation", json!({ "name": "fade" }))
            .with_property("objectFit", "cover")
            .with_property("textEffect", "")
            .with_property("mediaFilter", "retro")
            .into_clip("c1".into());
        let el = convert_one(TrackKind::Video, clip);
        assert_eq!(el.animation, Some(json!({ "name": "fade" })));
        assert_eq!(el.object_fit, Some(json!("cover")));
        assert_eq!(el.text_effect, None);
        assert!(el.props.get("animation").is_none());
        assert!(el.props.get("textEffect").is_none());
        assert_eq!(el.props["mediaFilter"], "retro");
    }

    #[test]
    fn effect_clips_pass_everything_through() {
        let clip = ClipDraft::new("fx", ClipKind::Effect, 0.0, 1.0)
            .with_property("animation", "fade")
            .with_property("intensity", 3)
            .into_clip("c1".into());
        let el = convert_one(TrackKind::Video, clip);
        assert_eq!(el.props["animation"], "fade");
        assert_eq!(el.props["intensity"], 3);
        assert_eq!(el.animation, Some(json!("fade")));
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
    }
}
