//! Core graph data structures

mod builder;
mod edge;
mod model;
mod node;

#[cfg(test)]
mod tests;

pub use builder::{GraphBuilder, Upsert};
pub use edge::{Edge, EdgeDirection, EdgeStyle, Route};
pub use model::{Graph, GraphShapeError};
pub use node::{Category, Node, NodeId, NodeRole};
