//! The application handle.
//!
//! One `Studio` per editing session. It owns the timeline and the node graph
//! and is passed by reference to whatever drives it; nothing here is global.

use studio_app_state::TimelineStore;
use studio_common::new_id;
use studio_node_graph::{flow_connections, onboarding_nodes, NodeGraphStore, SAMPLE_VIDEO_URLS};
use studio_project::{convert_with_config, ProjectData};

use crate::config::StudioConfig;

/// Which surface the session is showing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// The node-graph canvas where flows are built.
    #[default]
    Canvas,
    /// The timeline editor.
    Editor,
}

#[derive(Debug)]
pub struct Studio {
    pub(crate) config: StudioConfig,
    pub(crate) timeline: TimelineStore,
    pub(crate) graph: NodeGraphStore,
    pub(crate) view_mode: ViewMode,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    pub fn new() -> Self {
        Self::with_config(StudioConfig::default())
    }

    pub fn with_config(config: StudioConfig) -> Self {
        Self {
            timeline: TimelineStore::with_config(config.editor.clone()),
            graph: NodeGraphStore::new(),
            view_mode: ViewMode::default(),
            config,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn timeline(&self) -> &TimelineStore {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut TimelineStore {
        &mut self.timeline
    }

    pub fn graph(&self) -> &NodeGraphStore {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut NodeGraphStore {
        &mut self.graph
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        tracing::debug!(?mode, "View mode changed");
        self.view_mode = mode;
    }

    /// Populate an empty graph with the onboarding nodes and their flows.
    ///
    /// Returns `false` and leaves the graph alone when it already has nodes.
    pub fn seed_onboarding_graph(&mut self, video_urls: [&str; 3]) -> bool {
        if !self.graph.nodes().is_empty() {
            return false;
        }
        let nodes = onboarding_nodes(video_urls);
        let connections = flow_connections(&nodes);
        self.graph = NodeGraphStore::with_graph(nodes, connections);
        tracing::info!(
            nodes = self.graph.nodes().len(),
            connections = self.graph.connections().len(),
            "Onboarding graph seeded"
        );
        true
    }

    /// `seed_onboarding_graph` with the first three sample videos.
    pub fn seed_default_graph(&mut self) -> bool {
        self.seed_onboarding_graph([SAMPLE_VIDEO_URLS[0], SAMPLE_VIDEO_URLS[1], SAMPLE_VIDEO_URLS[2]])
    }

    /// The current timeline as a player document, under a fresh request id.
    pub fn project_data(&self) -> ProjectData {
        self.project_data_with_request(&new_id("studio"))
    }

    pub fn project_data_with_request(&self, request_id: &str) -> ProjectData {
        convert_with_config(self.timeline.tracks(), &self.config.player, request_id)
    }
}
