//! Node graph store: node and connection collections plus node selection.
//!
//! Graph edits are not recorded in any history.

use studio_common::ids::is_unassigned;
use studio_common::{new_id, EditOutcome, SkipReason};

use crate::flow::{extract_flows, Flow};
use crate::types::{ConnectionDraft, NodeGraphConnection, NodeGraphNode, NodeUpdate};

#[derive(Clone, Debug, Default)]
pub struct NodeGraphStore {
    nodes: Vec<NodeGraphNode>,
    connections: Vec<NodeGraphConnection>,
    selected_node_id: Option<String>,
}

impl NodeGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `nodes` and the given connections.
    pub fn with_graph(nodes: Vec<NodeGraphNode>, connections: Vec<ConnectionDraft>) -> Self {
        let mut store = Self::new();
        for node in nodes {
            store.add_node(node);
        }
        for draft in connections {
            store.add_connection(draft);
        }
        store
    }

    pub fn nodes(&self) -> &[NodeGraphNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[NodeGraphConnection] {
        &self.connections
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeGraphNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn connection(&self, connection_id: &str) -> Option<&NodeGraphConnection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    /// Connections leaving `node_id`, in insertion order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a NodeGraphConnection> + 'a {
        self.connections
            .iter()
            .filter(move |c| c.source_node_id == node_id)
    }

    /// Connections arriving at `node_id`, in insertion order.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a NodeGraphConnection> + 'a {
        self.connections
            .iter()
            .filter(move |c| c.target_node_id == node_id)
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.selected_node_id.as_deref()
    }

    pub fn selected_node(&self) -> Option<&NodeGraphNode> {
        self.node(self.selected_node_id.as_deref()?)
    }

    /// Add a node, keeping its id if it has one, and return the id.
    pub fn add_node(&mut self, mut node: NodeGraphNode) -> String {
        if is_unassigned(&node.id) {
            node.id = new_id("node");
        }
        let id = node.id.clone();
        tracing::debug!(node_id = %id, kind = ?node.kind, "Node added");
        self.nodes.push(node);
        id
    }

    /// Remove a node together with every connection touching it.
    pub fn remove_node(&mut self, node_id: &str) -> EditOutcome {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != node_id);
        if self.nodes.len() == before {
            tracing::debug!(node_id, "Remove node skipped: unknown node");
            return SkipReason::NodeNotFound(node_id.to_string()).into();
        }

        let connections_before = self.connections.len();
        self.connections
            .retain(|c| c.source_node_id != node_id && c.target_node_id != node_id);
        if self.selected_node_id.as_deref() == Some(node_id) {
            self.selected_node_id = None;
        }

        tracing::debug!(
            node_id,
            connections_removed = connections_before - self.connections.len(),
            "Node removed"
        );
        EditOutcome::Applied
    }

    pub fn update_node(&mut self, node_id: &str, update: NodeUpdate) -> EditOutcome {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            tracing::debug!(node_id, "Update node skipped: unknown node");
            return SkipReason::NodeNotFound(node_id.to_string()).into();
        };
        update.apply_to(node);
        EditOutcome::Applied
    }

    /// Select a node, or clear the selection with `None`.
    pub fn select_node(&mut self, node_id: Option<&str>) -> EditOutcome {
        if let Some(id) = node_id {
            if self.node(id).is_none() {
                tracing::debug!(node_id = id, "Select node skipped: unknown node");
                return SkipReason::NodeNotFound(id.to_string()).into();
            }
        }
        self.selected_node_id = node_id.map(str::to_owned);
        EditOutcome::Applied
    }

    /// Add a connection under a fresh id and return the id.
    ///
    /// Endpoints are not validated; cycles and dangling edges are allowed.
    pub fn add_connection(&mut self, draft: ConnectionDraft) -> String {
        let id = new_id("conn");
        tracing::debug!(
            connection_id = %id,
            source = %draft.source_node_id,
            target = %draft.target_node_id,
            "Connection added"
        );
        self.connections.push(NodeGraphConnection {
            id: id.clone(),
            source_node_id: draft.source_node_id,
            source_port_id: draft.source_port_id,
            target_node_id: draft.target_node_id,
            target_port_id: draft.target_port_id,
        });
        id
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> EditOutcome {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != connection_id);
        if self.connections.len() == before {
            return SkipReason::ConnectionNotFound(connection_id.to_string()).into();
        }
        EditOutcome::Applied
    }

    /// Flows of content nodes in the current graph.
    pub fn flows(&self) -> Vec<Flow<'_>> {
        extract_flows(&self.nodes, &self.connections)
    }
}
