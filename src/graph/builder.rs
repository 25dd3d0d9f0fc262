//! GraphBuilder: accumulates classified entries into a Graph

use super::edge::{Edge, Route};
use super::model::Graph;
use super::node::{Category, Node, NodeId};
use std::collections::HashMap;
use tracing::debug;

/// What happened to an entry handed to [`GraphBuilder::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new peripheral node was created
    Inserted,
    /// An existing node with the same label was overwritten
    Replaced,
    /// The label collides with the center id and was dropped
    ReservedLabel,
}

/// Accumulates entries for one graph
///
/// Nodes are keyed by label with last-write-wins on conflict. The route of
/// each node is stored alongside it and edges are derived only in
/// [`build`](Self::build), so an edge exists iff its node exists and always
/// reflects the node's latest category.
#[derive(Debug)]
pub struct GraphBuilder {
    center: Node,
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, (Node, Route)>,
}

impl GraphBuilder {
    /// Start a graph around the given center label
    pub fn new(center: impl Into<NodeId>) -> Self {
        Self {
            center: Node::center(center),
            order: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    pub fn center_id(&self) -> &NodeId {
        &self.center.id
    }

    /// Insert or overwrite the peripheral node for `label`.
    pub fn upsert(
        &mut self,
        label: impl Into<NodeId>,
        category: Category,
        description: impl Into<String>,
        route: Route,
    ) -> Upsert {
        let node = Node::peripheral(label, category, description);
        if node.id == self.center.id {
            debug!(label = %node.id, "dropping entry that reuses the center label");
            return Upsert::ReservedLabel;
        }

        match self.nodes.get_mut(&node.id) {
            Some(existing) => {
                debug!(label = %node.id, "overwriting duplicate label");
                *existing = (node, route);
                Upsert::Replaced
            }
            None => {
                self.order.push(node.id.clone());
                self.nodes.insert(node.id.clone(), (node, route));
                Upsert::Inserted
            }
        }
    }

    /// Number of peripheral nodes accumulated so far
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Finish the graph, deriving one edge per peripheral node.
    pub fn build(mut self) -> Graph {
        let mut nodes = Vec::with_capacity(self.order.len());
        let mut edges = Vec::with_capacity(self.order.len());
        for id in &self.order {
            if let Some((node, route)) = self.nodes.remove(id) {
                edges.push(Edge::derive(&self.center.id, &node, route));
                nodes.push(node);
            }
        }
        Graph::from_parts(self.center, nodes, edges)
    }
}
