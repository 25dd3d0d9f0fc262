//! Edge representation with category-derived direction and style

use super::node::{Category, Node, NodeId};
use serde::{Deserialize, Serialize};

/// Which way an edge points relative to the center node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// label → center
    Inbound,
    /// center → label
    Outbound,
}

/// Line style handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Direction and style assigned to every edge of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub direction: EdgeDirection,
    pub style: EdgeStyle,
}

impl Route {
    pub const fn new(direction: EdgeDirection, style: EdgeStyle) -> Self {
        Self { direction, style }
    }
}

impl Default for Route {
    /// The route used for the `UNKNOWN` category: center → label, dotted.
    fn default() -> Self {
        Self::new(EdgeDirection::Outbound, EdgeStyle::Dotted)
    }
}

/// A directed, styled edge between the center and one peripheral node
///
/// Edges are never authored directly; they are derived from a node and the
/// route of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub style: EdgeStyle,
    /// Category of the peripheral endpoint
    pub category: Category,
}

impl Edge {
    /// Derive the edge linking `node` to `center` according to `route`.
    pub fn derive(center: &NodeId, node: &Node, route: Route) -> Self {
        let (source, target) = match route.direction {
            EdgeDirection::Inbound => (node.id.clone(), center.clone()),
            EdgeDirection::Outbound => (center.clone(), node.id.clone()),
        };
        Self {
            source,
            target,
            style: route.style,
            category: node.category.clone().unwrap_or(Category::Unknown),
        }
    }

    /// The endpoint that is not `center`
    pub fn peripheral<'a>(&'a self, center: &NodeId) -> &'a NodeId {
        if &self.source == center {
            &self.target
        } else {
            &self.source
        }
    }
}
