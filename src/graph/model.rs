//! Graph: one center node, its peripheral nodes, and the derived edges

use super::edge::Edge;
use super::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An immutable knowledge graph centred on the queried concept
///
/// Built once per successful parse by [`GraphBuilder`](super::GraphBuilder).
/// A new parse produces a new `Graph`; nothing mutates one in place.
/// Peripheral nodes keep the order in which their label was first seen and
/// `edges[i]` always belongs to `nodes[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr")]
pub struct Graph {
    center: Node,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub(super) fn from_parts(center: Node, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        debug_assert_eq!(nodes.len(), edges.len());
        Self {
            center,
            nodes,
            edges,
        }
    }

    /// The center node
    pub fn center(&self) -> &Node {
        &self.center
    }

    /// Peripheral nodes, in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Center plus peripheral nodes
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.center).chain(self.nodes.iter())
    }

    /// All edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get a node by ID (center included)
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.all_nodes().find(|n| &n.id == id)
    }

    /// The edge attached to a peripheral node
    pub fn edge_for(&self, id: &NodeId) -> Option<&Edge> {
        self.nodes
            .iter()
            .position(|n| &n.id == id)
            .and_then(|i| self.edges.get(i))
    }

    /// Number of nodes, center included
    pub fn node_count(&self) -> usize {
        self.nodes.len() + 1
    }

    /// Number of peripheral nodes
    pub fn peripheral_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Why a deserialized graph was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphShapeError {
    #[error("center node {0} does not have the center role")]
    CenterRole(NodeId),

    #[error("{nodes} peripheral nodes but {edges} edges")]
    EdgeCount { nodes: usize, edges: usize },

    #[error("node {0} is not peripheral or reuses the center label")]
    Peripheral(NodeId),

    #[error("duplicate node {0}")]
    DuplicateNode(NodeId),

    #[error("edge for {0} does not join it to the center")]
    DetachedEdge(NodeId),
}

/// Wire form of [`Graph`], checked before it becomes one
#[derive(Deserialize)]
struct GraphRepr {
    center: Node,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TryFrom<GraphRepr> for Graph {
    type Error = GraphShapeError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        let GraphRepr {
            center,
            nodes,
            edges,
        } = repr;

        if !center.is_center() {
            return Err(GraphShapeError::CenterRole(center.id));
        }
        if nodes.len() != edges.len() {
            return Err(GraphShapeError::EdgeCount {
                nodes: nodes.len(),
                edges: edges.len(),
            });
        }
        for (i, (node, edge)) in nodes.iter().zip(&edges).enumerate() {
            if node.is_center() || node.id == center.id {
                return Err(GraphShapeError::Peripheral(node.id.clone()));
            }
            if nodes[..i].iter().any(|n| n.id == node.id) {
                return Err(GraphShapeError::DuplicateNode(node.id.clone()));
            }
            let joined = (edge.source == node.id && edge.target == center.id)
                || (edge.source == center.id && edge.target == node.id);
            if !joined {
                return Err(GraphShapeError::DetachedEdge(node.id.clone()));
            }
        }

        Ok(Self {
            center,
            nodes,
            edges,
        })
    }
}
