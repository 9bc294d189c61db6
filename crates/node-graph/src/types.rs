//! Node graph entities: nodes, typed ports, and directed connections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a node does in the generative flow.
///
/// Only `Instruction` and `Content` nodes matter to timeline projection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Input,
    Output,
    Effect,
    Transform,
    Composite,
    Instruction,
    Content,
}

/// Data type carried by a port.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Video,
    Audio,
    Image,
    Number,
    Color,
    Vector,
}

impl PortKind {
    /// Default display name for a port of this kind.
    pub fn port_name(self) -> &'static str {
        match self {
            PortKind::Image => "Image",
            PortKind::Video => "Video",
            _ => "Output",
        }
    }
}

/// Generation status of a content node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Ready,
    Processing,
    Completed,
    Error,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodePort {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PortKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl NodePort {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PortKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            value: None,
        }
    }
}

/// A node in the generative-flow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGraphNode {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,
    #[serde(default)]
    pub inputs: Vec<NodePort>,
    #[serde(default)]
    pub outputs: Vec<NodePort>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_text: Option<String>,
}

impl NodeGraphNode {
    /// A portless node without an id.
    pub fn new(kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: String::new(),
            kind,
            label: label.into(),
            position,
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: Map::new(),
            thumbnail_url: None,
            status: None,
            instruction_text: None,
        }
    }

    pub fn is_content(&self) -> bool {
        self.kind == NodeKind::Content
    }

    pub fn has_output(&self, kind: PortKind) -> bool {
        self.outputs.iter().any(|p| p.kind == kind)
    }

    /// The generated video URL, if the `videoUrl` property is a non-empty string.
    pub fn video_url(&self) -> Option<&str> {
        self.properties
            .get("videoUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Whether projection turns this node into a timeline clip: it needs a
    /// video output port and a generated video URL.
    pub fn is_video_capable(&self) -> bool {
        self.has_output(PortKind::Video) && self.video_url().is_some()
    }
}

/// A directed edge from an output port to an input port.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGraphConnection {
    pub id: String,
    pub source_node_id: String,
    pub source_port_id: String,
    pub target_node_id: String,
    pub target_port_id: String,
}

/// A connection without id, as handed to `add_connection`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDraft {
    pub source_node_id: String,
    pub source_port_id: String,
    pub target_node_id: String,
    pub target_port_id: String,
}

impl ConnectionDraft {
    /// Connect `source`'s first output to `target`'s first input.
    ///
    /// Returns `None` when either side lacks the port.
    pub fn between(source: &NodeGraphNode, target: &NodeGraphNode) -> Option<Self> {
        let out = source.outputs.first()?;
        let input = target.inputs.first()?;
        Some(Self {
            source_node_id: source.id.clone(),
            source_port_id: out.id.clone(),
            target_node_id: target.id.clone(),
            target_port_id: input.id.clone(),
        })
    }
}

/// Partial node update. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeUpdate {
    pub label: Option<String>,
    pub position: Option<Position>,
    pub inputs: Option<Vec<NodePort>>,
    pub outputs: Option<Vec<NodePort>>,
    pub properties: Option<Map<String, Value>>,
    pub thumbnail_url: Option<String>,
    pub status: Option<NodeStatus>,
    pub instruction_text: Option<String>,
}

impl NodeUpdate {
    pub(crate) fn apply_to(self, node: &mut NodeGraphNode) {
        if let Some(label) = self.label {
            node.label = label;
        }
        if let Some(position) = self.position {
            node.position = position;
        }
        if let Some(inputs) = self.inputs {
            node.inputs = inputs;
        }
        if let Some(outputs) = self.outputs {
            node.outputs = outputs;
        }
        if let Some(properties) = self.properties {
            node.properties = properties;
        }
        if self.thumbnail_url.is_some() {
            node.thumbnail_url = self.thumbnail_url;
        }
        if self.status.is_some() {
            node.status = self.status;
        }
        if self.instruction_text.is_some() {
            node.instruction_text = self.instruction_text;
        }
    }
}
