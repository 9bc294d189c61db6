//! Whole-session scenarios across the timeline, graph, and export crates.

use serde_json::Value;
use studio::app_state::{ClipDraft, ClipKind, ClipUpdate, INITIAL_VIDEO_TRACK_ID};
use studio::node_graph::{
    create_content_node, ConnectionDraft, ContentMedia, NodeStatus, Position, SAMPLE_VIDEO_URLS,
};
use studio::project::{from_json_string, to_json_string_compact, KnownDurations, PlayerTrackType};
use studio::{ClipStyle, Studio, StudioConfig, ViewMode};

fn video_node(label: &str, url: &str) -> studio::node_graph::NodeGraphNode {
    create_content_node(
        label,
        Position::default(),
        ContentMedia::Video,
        None,
        Some(url),
        NodeStatus::Completed,
    )
}

#[test]
fn canvas_to_editor_to_player() {
    let mut studio = Studio::new();
    studio.seed_default_graph();
    let report = studio.open_editor();
    assert_eq!(report.tracks_added, 3);
    assert_eq!(studio.view_mode(), ViewMode::Editor);

    let data = studio.project_data_with_request("e2e");
    assert_eq!(data.tracks().len(), 3);
    assert!(data.tracks().iter().all(|t| t.kind == PlayerTrackType::Element));

    let second = &data.tracks()[1].elements[0];
    assert_eq!(second.s, 10.0);
    assert_eq!(second.e, 20.0);
    assert_eq!(second.props["src"], SAMPLE_VIDEO_URLS[1]);
    assert_eq!(second.props["play"], true);

    let json = to_json_string_compact(&data).unwrap();
    let parsed = from_json_string(&json).unwrap();
    assert_eq!(parsed.element_count(), 3);
}

#[test]
fn long_chain_leaves_a_gap_before_the_third_video() {
    let mut studio = Studio::new();
    let ids: Vec<String> = ["A", "B", "C"]
        .iter()
        .zip(SAMPLE_VIDEO_URLS)
        .map(|(label, url)| studio.graph_mut().add_node(video_node(label, url)))
        .collect();
    for pair in ids.windows(2) {
        let graph = studio.graph();
        let draft = ConnectionDraft::between(
            graph.node(&pair[0]).unwrap(),
            graph.node(&pair[1]).unwrap(),
        )
        .unwrap();
        studio.graph_mut().add_connection(draft);
    }

    studio.open_editor();
    let starts: Vec<f64> = studio
        .timeline()
        .tracks()
        .iter()
        .map(|t| t.clips[0].start_time)
        .collect();
    assert_eq!(starts, [0.0, 10.0, 30.0]);
    assert_eq!(studio.timeline().duration(), 60.0);
}

#[test]
fn editing_session_with_undo_and_redo() {
    let mut studio = Studio::new();
    let probe = KnownDurations::new().with("https://cdn/a.mp4", 8.0);
    let clip_id = studio.load_video_from_url(&probe, "https://cdn/a.mp4").unwrap();

    studio.timeline_mut().select_clip(Some(&clip_id));
    studio.timeline_mut().set_playhead(3.0);
    let right = studio.split_selected_at_playhead().unwrap();
    studio.set_selected_clip_style(ClipStyle::Animation, Some(Value::from("fade")));
    assert_eq!(studio.timeline().total_clips(), 2);

    // Undo the style and the split.
    assert!(studio.timeline_mut().undo().is_applied());
    assert!(studio.timeline_mut().undo().is_applied());
    let timeline = studio.timeline();
    assert_eq!(timeline.total_clips(), 1);
    assert_eq!(timeline.clip(INITIAL_VIDEO_TRACK_ID, &clip_id).unwrap().duration, 8.0);

    assert!(studio.timeline_mut().redo().is_applied());
    assert!(studio.timeline().clip(INITIAL_VIDEO_TRACK_ID, &right).is_some());
    assert_eq!(
        studio.timeline().clip(INITIAL_VIDEO_TRACK_ID, &clip_id).unwrap().duration,
        3.0
    );

    // A fresh edit drops the redo branch.
    studio.timeline_mut().update_clip(
        INITIAL_VIDEO_TRACK_ID,
        &clip_id,
        ClipUpdate::start_time(1.0),
    );
    assert!(!studio.timeline().can_redo());
}

#[test]
fn drag_is_one_undo_step() {
    let mut studio = Studio::new();
    let timeline = studio.timeline_mut();
    let id = timeline
        .add_clip(INITIAL_VIDEO_TRACK_ID, ClipDraft::new("v", ClipKind::Video, 0.0, 5.0))
        .unwrap();

    timeline.begin_batch("Move clip");
    for step in 1..=10 {
        timeline.update_clip(INITIAL_VIDEO_TRACK_ID, &id, ClipUpdate::start_time(step as f64));
    }
    timeline.end_batch();

    assert_eq!(timeline.clip(INITIAL_VIDEO_TRACK_ID, &id).unwrap().start_time, 10.0);
    timeline.undo();
    assert_eq!(timeline.clip(INITIAL_VIDEO_TRACK_ID, &id).unwrap().start_time, 0.0);
    timeline.undo();
    assert_eq!(timeline.total_clips(), 0);
}

#[test]
fn player_callbacks_stop_at_media_end() {
    let mut studio = Studio::new();
    let timeline = studio.timeline_mut();
    timeline.handle_duration_change(12.0);
    assert_eq!(timeline.duration(), 12.0);

    timeline.set_playing(true);
    timeline.handle_time_update(4.0);
    assert_eq!(timeline.playhead(), 4.0);
    assert!(timeline.is_playing());

    timeline.handle_time_update(12.5);
    assert!(!timeline.is_playing());
    assert_eq!(timeline.playhead(), 12.0);
}

#[test]
fn configured_session() {
    let config = StudioConfig::from_json(
        r#"{ "layout": { "clip_duration": 4.0, "clip_step": 5.0 }, "media": { "fallback_duration": 6.0 } }"#,
    )
    .unwrap();
    let mut studio = Studio::with_config(config);

    let clip = studio.load_video_from_url(&KnownDurations::new(), "x.mp4").unwrap();
    assert_eq!(
        studio.timeline().clip(INITIAL_VIDEO_TRACK_ID, &clip).unwrap().duration,
        6.0
    );

    studio.seed_default_graph();
    studio.open_editor();
    let second = &studio.timeline().tracks()[1].clips[0];
    assert_eq!(second.start_time, 5.0);
    assert_eq!(second.duration, 4.0);
}
