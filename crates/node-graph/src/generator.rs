//! Sample graph construction: onboarding instruction nodes and demo flows.

use serde_json::Value;
use studio_common::new_id;

use crate::types::{ConnectionDraft, NodeGraphNode, NodeKind, NodePort, NodeStatus, PortKind, Position};

/// Placeholder thumbnails for content nodes created without one.
pub const SAMPLE_IMAGE_URLS: [&str; 5] = [
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400",
    "https://images.unsplash.com/photo-1518791841217-8f162f1e1131?w=400",
    "https://images.unsplash.com/photo-1519681393784-d120267933ba?w=400",
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=400",
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=400",
];

/// Publicly hosted sample videos.
pub const SAMPLE_VIDEO_URLS: [&str; 10] = [
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/SubaruOutbackOnStreetAndDirt.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
];

/// Media a content node represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentMedia {
    Image,
    Video,
}

impl ContentMedia {
    fn port_kind(self) -> PortKind {
        match self {
            ContentMedia::Image => PortKind::Image,
            ContentMedia::Video => PortKind::Video,
        }
    }
}

/// An onboarding annotation node with one output per entry of `outputs`.
pub fn create_instruction_node(
    label: &str,
    instruction_text: &str,
    position: Position,
    outputs: &[PortKind],
) -> NodeGraphNode {
    let mut node = NodeGraphNode::new(NodeKind::Instruction, label, position);
    node.id = new_id("node");
    node.outputs = outputs
        .iter()
        .enumerate()
        .map(|(idx, kind)| NodePort::new(format!("out-{idx}"), kind.port_name(), *kind))
        .collect();
    node.instruction_text = Some(instruction_text.to_string());
    node
}

/// An image or video content node with one input (`in-0`) and one output (`out-0`).
///
/// The output port carries the video URL (or the thumbnail when there is no
/// video). Without a thumbnail the first sample image is used.
pub fn create_content_node(
    label: &str,
    position: Position,
    media: ContentMedia,
    thumbnail_url: Option<&str>,
    video_url: Option<&str>,
    status: NodeStatus,
) -> NodeGraphNode {
    let thumbnail = thumbnail_url.unwrap_or(SAMPLE_IMAGE_URLS[0]).to_string();
    let kind = media.port_kind();

    let mut node = NodeGraphNode::new(NodeKind::Content, label, position);
    node.id = new_id("node");
    node.inputs = vec![NodePort::new("in-0", "Input", kind)];

    let mut output = NodePort::new("out-0", kind.port_name(), kind);
    output.value = Some(Value::from(video_url.unwrap_or(thumbnail.as_str())));
    node.outputs = vec![output];

    if let Some(url) = video_url {
        node.properties.insert("videoUrl".into(), Value::from(url));
    }
    node.properties
        .insert("thumbnailUrl".into(), Value::from(thumbnail.as_str()));
    node.thumbnail_url = Some(thumbnail);
    node.status = Some(status);
    node
}

const FLOW_START_X: f64 = 400.0;
const FLOW_SPACING_X: f64 = 200.0;
const FLOW_ONE_Y: f64 = 100.0;
const FLOW_TWO_Y: f64 = 400.0;

/// Three instruction nodes followed by two demo flows:
/// Image 1 -> Video 1 -> Image 2 -> Video 2, and Image 3 -> Video 3.
///
/// `video_urls` supplies the generated media for the three video nodes.
pub fn onboarding_nodes(video_urls: [&str; 3]) -> Vec<NodeGraphNode> {
    let mut nodes = vec![
        create_instruction_node(
            "Generate your first image",
            "Here is a Text to Image action node ready to run.\n\
             Click on it, write a prompt, select a style and run.\n\
             You can create this by clicking on the + button in the tool bar at the bottom.",
            Position::new(100.0, 100.0),
            &[PortKind::Image],
        ),
        create_instruction_node(
            "1. Edit Image",
            "Select an image node to edit.\n\
             Use the editing tools to modify your image.\n\
             Apply filters, adjust colors, or crop as needed.",
            Position::new(100.0, 250.0),
            &[PortKind::Image],
        ),
        create_instruction_node(
            "2. Generate Video",
            "Upload or select a start frame image.\n\
             Click \"Generate Video\" button.\n\
             Optionally add an end frame for keyframe control.",
            Position::new(100.0, 400.0),
            &[PortKind::Video],
        ),
    ];

    let at = |column: f64, y: f64| Position::new(FLOW_START_X + FLOW_SPACING_X * column, y);
    let image = |label: &str, pos: Position, thumb: usize| {
        create_content_node(
            label,
            pos,
            ContentMedia::Image,
            Some(SAMPLE_IMAGE_URLS[thumb]),
            None,
            NodeStatus::Ready,
        )
    };
    let video = |label: &str, pos: Position, thumb: usize, url: &str| {
        create_content_node(
            label,
            pos,
            ContentMedia::Video,
            Some(SAMPLE_IMAGE_URLS[thumb]),
            Some(url),
            NodeStatus::Completed,
        )
    };

    nodes.push(image("Image 1", at(0.0, FLOW_ONE_Y), 0));
    nodes.push(video("Video 1", at(1.0, FLOW_ONE_Y), 1, video_urls[0]));
    nodes.push(image("Image 2", at(2.0, FLOW_ONE_Y), 2));
    nodes.push(video("Video 2", at(3.0, FLOW_ONE_Y), 3, video_urls[1]));
    nodes.push(image("Image 3", at(0.0, FLOW_TWO_Y), 4));
    nodes.push(video("Video 3", at(1.0, FLOW_TWO_Y), 0, video_urls[2]));
    nodes
}

/// `onboarding_nodes` seeded with the first three sample videos.
pub fn default_onboarding_nodes() -> Vec<NodeGraphNode> {
    onboarding_nodes([SAMPLE_VIDEO_URLS[0], SAMPLE_VIDEO_URLS[1], SAMPLE_VIDEO_URLS[2]])
}

/// Connections for the onboarding flows. Instruction nodes are skipped;
/// content nodes 0-3 form the first chain and 4-5 the second.
pub fn flow_connections(nodes: &[NodeGraphNode]) -> Vec<ConnectionDraft> {
    let content: Vec<&NodeGraphNode> = nodes.iter().filter(|n| n.is_content()).collect();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    if content.len() >= 4 {
        pairs.extend([(0, 1), (1, 2), (2, 3)]);
    }
    if content.len() >= 6 {
        pairs.push((4, 5));
    }
    pairs
        .into_iter()
        .filter_map(|(from, to)| ConnectionDraft::between(content[from], content[to]))
        .collect()
}

/// Completed video nodes laid out four per row, one per URL.
pub fn video_grid_nodes(video_urls: &[&str]) -> Vec<NodeGraphNode> {
    video_urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            let position = Position::new(100.0 + (i % 4) as f64 * 250.0, 100.0 + (i / 4) as f64 * 300.0);
            create_content_node(
                &format!("Video {}", i + 1),
                position,
                ContentMedia::Video,
                Some(SAMPLE_IMAGE_URLS[i % SAMPLE_IMAGE_URLS.len()]),
                Some(*url),
                NodeStatus::Completed,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{extract_flows, map_flows_to_timeline};
    use crate::store::NodeGraphStore;
    use studio_common::FlowLayoutConfig;

    #[test]
    fn instruction_node_shape() {
        let node = create_instruction_node(
            "Hint",
            "Do the thing",
            Position::new(1.0, 2.0),
            &[PortKind::Image, PortKind::Video, PortKind::Number],
        );
        assert!(node.id.starts_with("node-"));
        assert_eq!(node.kind, NodeKind::Instruction);
        assert!(node.inputs.is_empty());
        let names: Vec<&str> = node.outputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Image", "Video", "Output"]);
        assert_eq!(node.outputs[2].id, "out-2");
        assert_eq!(node.instruction_text.as_deref(), Some("Do the thing"));
    }

    #[test]
    fn content_node_shape() {
        let node = create_content_node(
            "Video 1",
            Position::default(),
            ContentMedia::Video,
            None,
            Some("https://cdn/v.mp4"),
            NodeStatus::Completed,
        );
        assert_eq!(node.inputs[0].id, "in-0");
        assert_eq!(node.inputs[0].kind, PortKind::Video);
        assert_eq!(node.outputs[0].id, "out-0");
        assert_eq!(node.outputs[0].value, Some(Value::from("https://cdn/v.mp4")));
        assert_eq!(node.thumbnail_url.as_deref(), Some(SAMPLE_IMAGE_URLS[0]));
        assert_eq!(node.properties["thumbnailUrl"], SAMPLE_IMAGE_URLS[0]);
        assert!(node.is_video_capable());

        let image = create_content_node(
            "Image",
            Position::default(),
            ContentMedia::Image,
            Some("https://cdn/i.png"),
            None,
            NodeStatus::Ready,
        );
        assert!(image.properties.get("videoUrl").is_none());
        assert_eq!(image.outputs[0].value, Some(Value::from("https://cdn/i.png")));
        assert!(!image.is_video_capable());
    }

    #[test]
    fn onboarding_graph_projects_three_tracks() {
        let nodes = default_onboarding_nodes();
        assert_eq!(nodes.len(), 9);
        assert_eq!(
            nodes.iter().filter(|n| n.kind == NodeKind::Instruction).count(),
            3
        );

        let connections = flow_connections(&nodes);
        assert_eq!(connections.len(), 4);

        let store = NodeGraphStore::with_graph(nodes, connections);
        let flows = extract_flows(store.nodes(), store.connections());
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].len(), 4);
        assert_eq!(flows[1].len(), 2);

        let projection = map_flows_to_timeline(&flows, &FlowLayoutConfig::default());
        let starts: Vec<f64> = projection.clips.iter().map(|p| p.clip.start_time).collect();
        assert_eq!(starts, [0.0, 10.0, 0.0]);
        assert_eq!(projection.clips[0].clip.name, "Video 1");
        assert_eq!(projection.clips[2].clip.name, "Video 3");
    }

    #[test]
    fn connections_need_enough_content_nodes() {
        let nodes = video_grid_nodes(&SAMPLE_VIDEO_URLS[..3]);
        assert!(flow_connections(&nodes).is_empty());
        let nodes = video_grid_nodes(&SAMPLE_VIDEO_URLS[..5]);
        assert_eq!(flow_connections(&nodes).len(), 3);
    }

    #[test]
    fn video_grid_layout() {
        let nodes = video_grid_nodes(&SAMPLE_VIDEO_URLS[..6]);
        assert_eq!(nodes[3].position, Position::new(850.0, 100.0));
        assert_eq!(nodes[4].position, Position::new(100.0, 400.0));
        assert_eq!(nodes[5].label, "Video 6");
        assert!(nodes.iter().all(NodeGraphNode::is_video_capable));
    }
}
