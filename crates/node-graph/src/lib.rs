//! `studio-node-graph` -- Generative node graph and its projection onto the timeline.
//!
//! - **`NodeGraphStore`**: node/connection CRUD with cascading node removal.
//! - **`extract_flows`**: walks content nodes root-to-leaf along the first outgoing edge.
//! - **`map_flows_to_timeline`**: one new video track per video node, time-offset per flow.
//! - **`generator`**: onboarding instruction nodes and sample flows.
//!
//! The graph has no relation to the timeline store. Projection reads the
//! graph and produces fresh `Track`/`ClipDraft` values; attaching them to a
//! `TimelineStore` is the caller's job.

pub mod flow;
pub mod generator;
pub mod store;
pub mod types;

pub use flow::{clip_start, extract_flows, map_flows_to_timeline, Flow, FlowProjection, ProjectedClip};
pub use generator::{
    create_content_node, create_instruction_node, default_onboarding_nodes, flow_connections, onboarding_nodes,
    video_grid_nodes, ContentMedia, SAMPLE_IMAGE_URLS, SAMPLE_VIDEO_URLS,
};
pub use store::NodeGraphStore;
pub use types::{
    ConnectionDraft, NodeGraphConnection, NodeGraphNode, NodeKind, NodePort, NodeStatus, NodeUpdate, PortKind, Position,
};
