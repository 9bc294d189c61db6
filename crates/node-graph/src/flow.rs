//! Flow extraction and projection of flows onto timeline tracks.
//!
//! A flow is a simple path of content nodes. Extraction starts at every
//! content node with no incoming connection and repeatedly follows the
//! *first* connection leaving the current node. A single visited set spans
//! all flows, so a node reachable from two roots belongs to whichever root
//! reached it first, and cycles terminate.
//!
//! Projection gives every video-capable node of a flow its own video track:
//!
//! ```text
//! flow:  [img] -> [vid A] -> [img] -> [vid B] -> [vid C]
//!
//! track-video-1   |A-------|                         start 0
//! track-video-2            |B-------|                start 1 x step
//! track-video-3                      ...  |C-------| start (i+1) x step, i >= 2
//! ```

use std::collections::HashSet;

use studio_app_state::{ClipDraft, ClipKind, Track, TrackKind};
use studio_common::FlowLayoutConfig;

use crate::types::{NodeGraphConnection, NodeGraphNode};

/// Content nodes along one path, root first.
pub type Flow<'a> = Vec<&'a NodeGraphNode>;

/// Extract all flows from a graph.
///
/// Non-content nodes are ignored as flow members, but any connection
/// (whatever its source) counts as an incoming edge when picking roots.
pub fn extract_flows<'a>(
    nodes: &'a [NodeGraphNode],
    connections: &[NodeGraphConnection],
) -> Vec<Flow<'a>> {
    let content: Vec<&NodeGraphNode> = nodes.iter().filter(|n| n.is_content()).collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut flows = Vec::new();

    let roots = content
        .iter()
        .copied()
        .filter(|node| !connections.iter().any(|c| c.target_node_id == node.id));

    for root in roots {
        if visited.contains(root.id.as_str()) {
            continue;
        }
        let flow = traverse(root, &content, connections, &mut visited);
        tracing::debug!(root = %root.id, len = flow.len(), "Flow extracted");
        flows.push(flow);
    }
    flows
}

fn traverse<'a>(
    start: &'a NodeGraphNode,
    content: &[&'a NodeGraphNode],
    connections: &[NodeGraphConnection],
    visited: &mut HashSet<&'a str>,
) -> Flow<'a> {
    let mut flow = vec![start];
    visited.insert(start.id.as_str());

    let mut current = start;
    while let Some(edge) = connections.iter().find(|c| c.source_node_id == current.id) {
        let Some(next) = content.iter().copied().find(|n| n.id == edge.target_node_id) else {
            break;
        };
        if !visited.insert(next.id.as_str()) {
            break;
        }
        flow.push(next);
        current = next;
    }
    flow
}

/// A clip waiting to be attached to a projected track.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedClip {
    pub track_id: String,
    pub clip: ClipDraft,
}

/// New tracks (empty) plus the clips that belong on them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowProjection {
    pub tracks: Vec<Track>,
    pub clips: Vec<ProjectedClip>,
}

impl FlowProjection {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clips projected onto `track_id`.
    pub fn clips_for<'a>(&'a self, track_id: &'a str) -> impl Iterator<Item = &'a ClipDraft> + 'a {
        self.clips
            .iter()
            .filter(move |p| p.track_id == track_id)
            .map(|p| &p.clip)
    }
}

/// Start time of the `index`-th video of a flow.
///
/// The first two videos sit at 0 and one step; from the third on, the start
/// is `(index + 1)` steps, so there is a gap of one step before the third.
pub fn clip_start(index: usize, step: f64) -> f64 {
    match index {
        0 => 0.0,
        1 => step,
        i => step * (i + 1) as f64,
    }
}

/// Project flows onto brand-new video tracks, one track per video node.
pub fn map_flows_to_timeline(flows: &[Flow<'_>], layout: &FlowLayoutConfig) -> FlowProjection {
    let mut projection = FlowProjection::default();
    let mut track_counter = 1usize;

    for flow in flows {
        let videos = flow.iter().filter(|n| n.is_video_capable());
        for (index, node) in videos.enumerate() {
            let track_id = format!("track-video-{track_counter}");
            track_counter += 1;

            let name = format!("Video Track {}", projection.tracks.len() + 1);
            projection.tracks.push(Track::new(
                track_id.clone(),
                name,
                TrackKind::Video,
                layout.track_height,
            ));

            let label = if node.label.is_empty() {
                "Video Clip"
            } else {
                node.label.as_str()
            };
            let mut clip = ClipDraft::new(
                label,
                ClipKind::Video,
                clip_start(index, layout.clip_step),
                layout.clip_duration,
            );
            clip.video_url = node.video_url().map(str::to_owned);

            projection.clips.push(ProjectedClip { track_id, clip });
        }
    }

    tracing::debug!(
        flows = flows.len(),
        tracks = projection.tracks.len(),
        "Flows projected onto timeline"
    );
    projection
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::types::{NodeKind, NodePort, PortKind, Position};

    fn node(id: &str, kind: NodeKind, video_url: Option<&str>) -> NodeGraphNode {
        let mut n = NodeGraphNode::new(kind, format!("Node {id}"), Position::default());
        n.id = id.to_string();
        n.inputs.push(NodePort::new("in-0", "Input", PortKind::Image));
        let port_kind = if video_url.is_some() {
            PortKind::Video
        } else {
            PortKind::Image
        };
        n.outputs.push(NodePort::new("out-0", "Out", port_kind));
        if let Some(url) = video_url {
            n.properties.insert("videoUrl".into(), Value::from(url));
        }
        n
    }

    fn content(id: &str) -> NodeGraphNode {
        node(id, NodeKind::Content, None)
    }

    fn video(id: &str) -> NodeGraphNode {
        node(id, NodeKind::Content, Some(&format!("https://cdn/{id}.mp4")))
    }

    fn edge(from: &str, to: &str) -> NodeGraphConnection {
        NodeGraphConnection {
            id: format!("{from}->{to}"),
            source_node_id: from.into(),
            source_port_id: "out-0".into(),
            target_node_id: to.into(),
            target_port_id: "in-0".into(),
        }
    }

    fn ids(flow: &Flow<'_>) -> Vec<String> {
        flow.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn single_chain_is_one_flow() {
        let nodes = vec![content("a"), content("b"), content("c")];
        let conns = vec![edge("a", "b"), edge("b", "c")];
        let flows = extract_flows(&nodes, &conns);
        assert_eq!(flows.len(), 1);
        assert_eq!(ids(&flows[0]), ["a", "b", "c"]);
    }

    #[test]
    fn cycle_terminates_with_each_node_once() {
        // r -> a -> b -> a: a root is needed to enter the cycle.
        let nodes = vec![content("r"), content("a"), content("b")];
        let conns = vec![edge("r", "a"), edge("a", "b"), edge("b", "a")];
        let flows = extract_flows(&nodes, &conns);
        assert_eq!(flows.len(), 1);
        assert_eq!(ids(&flows[0]), ["r", "a", "b"]);
    }

    #[test]
    fn pure_cycle_has_no_root() {
        let nodes = vec![content("a"), content("b")];
        let conns = vec![edge("a", "b"), edge("b", "a")];
        assert!(extract_flows(&nodes, &conns).is_empty());
    }

    #[test]
    fn only_first_outgoing_edge_is_followed() {
        let nodes = vec![content("a"), content("b"), content("c")];
        let conns = vec![edge("a", "b"), edge("a", "c")];
        let flows = extract_flows(&nodes, &conns);
        // "c" has an incoming edge, so it is not a root either; it is dropped.
        assert_eq!(flows.len(), 1);
        assert_eq!(ids(&flows[0]), ["a", "b"]);
    }

    #[test]
    fn visited_set_is_global_across_flows() {
        let nodes = vec![content("r1"), content("r2"), content("shared"), content("tail")];
        let conns = vec![edge("r1", "shared"), edge("r2", "shared"), edge("shared", "tail")];
        let flows = extract_flows(&nodes, &conns);
        assert_eq!(flows.len(), 2);
        assert_eq!(ids(&flows[0]), ["r1", "shared", "tail"]);
        assert_eq!(ids(&flows[1]), ["r2"]);
    }

    #[test]
    fn instruction_nodes_are_not_flow_members() {
        let nodes = vec![
            node("i", NodeKind::Instruction, None),
            content("a"),
            content("b"),
        ];
        // i -> a makes "a" a non-root; traversal from nowhere reaches it.
        let conns = vec![edge("i", "a"), edge("a", "b")];
        assert!(extract_flows(&nodes, &conns).is_empty());

        // a -> i stops at the instruction node.
        let conns = vec![edge("a", "i")];
        let flows = extract_flows(&nodes, &conns);
        assert_eq!(flows.len(), 2);
        assert_eq!(ids(&flows[0]), ["a"]);
        assert_eq!(ids(&flows[1]), ["b"]);
    }

    #[test]
    fn dangling_target_stops_traversal() {
        let nodes = vec![content("a")];
        let conns = vec![edge("a", "missing")];
        let flows = extract_flows(&nodes, &conns);
        assert_eq!(ids(&flows[0]), ["a"]);
    }

    #[test]
    fn two_videos_in_one_flow() {
        let nodes = vec![content("img"), video("v1"), content("img2"), video("v2")];
        let conns = vec![edge("img", "v1"), edge("v1", "img2"), edge("img2", "v2")];
        let flows = extract_flows(&nodes, &conns);
        let projection = map_flows_to_timeline(&flows, &FlowLayoutConfig::default());

        assert_eq!(projection.tracks.len(), 2);
        assert_eq!(projection.clips.len(), 2);
        assert_eq!(projection.tracks[0].id, "track-video-1");
        assert_eq!(projection.tracks[1].name, "Video Track 2");

        let first = &projection.clips[0];
        assert_eq!(first.track_id, "track-video-1");
        assert_eq!(first.clip.start_time, 0.0);
        assert_eq!(first.clip.duration, 10.0);
        assert_eq!(first.clip.video_url.as_deref(), Some("https://cdn/v1.mp4"));
        assert_eq!(first.clip.name, "Node v1");

        let second = &projection.clips[1];
        assert_eq!(second.track_id, "track-video-2");
        assert_eq!(second.clip.start_time, 10.0);
        assert_eq!(second.clip.duration, 10.0);
    }

    #[test]
    fn third_video_starts_after_a_gap() {
        let nodes = vec![video("a"), video("b"), video("c"), video("d")];
        let conns = vec![edge("a", "b"), edge("b", "c"), edge("c", "d")];
        let flows = extract_flows(&nodes, &conns);
        let projection = map_flows_to_timeline(&flows, &FlowLayoutConfig::default());
        let starts: Vec<f64> = projection.clips.iter().map(|p| p.clip.start_time).collect();
        assert_eq!(starts, [0.0, 10.0, 30.0, 40.0]);
    }

    #[test]
    fn separate_flows_restart_at_zero_and_keep_counting_tracks() {
        let nodes = vec![video("a"), video("b"), video("c")];
        let conns = vec![edge("a", "b")];
        let flows = extract_flows(&nodes, &conns);
        let projection = map_flows_to_timeline(&flows, &FlowLayoutConfig::default());

        let track_ids: Vec<&str> = projection.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(track_ids, ["track-video-1", "track-video-2", "track-video-3"]);
        assert_eq!(projection.clips[2].clip.start_time, 0.0);
        assert_eq!(projection.clips_for("track-video-3").count(), 1);
    }

    #[test]
    fn flows_without_videos_produce_nothing() {
        let nodes = vec![content("a"), content("b")];
        let conns = vec![edge("a", "b")];
        let flows = extract_flows(&nodes, &conns);
        let projection = map_flows_to_timeline(&flows, &FlowLayoutConfig::default());
        assert!(projection.is_empty());
        assert!(projection.clips.is_empty());
    }

    #[test]
    fn empty_label_falls_back() {
        let mut v = video("v");
        v.label.clear();
        let nodes = vec![v];
        let flows = extract_flows(&nodes, &[]);
        let projection = map_flows_to_timeline(&flows, &FlowLayoutConfig::default());
        assert_eq!(projection.clips[0].clip.name, "Video Clip");
        assert_eq!(projection.clips[0].clip.trim_start, 0.0);
        assert_eq!(projection.clips[0].clip.trim_end, 0.0);
        assert!(projection.clips[0].clip.effects.is_empty());
    }

    #[test]
    fn layout_is_configurable() {
        let nodes = vec![video("a"), video("b")];
        let conns = vec![edge("a", "b")];
        let flows = extract_flows(&nodes, &conns);
        let layout = FlowLayoutConfig {
            clip_duration: 4.0,
            clip_step: 6.0,
            track_height: 100,
        };
        let projection = map_flows_to_timeline(&flows, &layout);
        assert_eq!(projection.clips[1].clip.start_time, 6.0);
        assert_eq!(projection.clips[1].clip.duration, 4.0);
        assert_eq!(projection.tracks[0].height, 100);
    }
}
