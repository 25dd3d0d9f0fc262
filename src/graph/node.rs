//! Node representation in the knowledge graph

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
///
/// The id is the node's label, compared case-sensitively. Serializes as a
/// plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a label
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Classifier tag attached to a parsed entry
///
/// `Named` carries the canonical category name from the grammar's vocabulary
/// (e.g. `PRE`, `Lv3`). Lines whose first field matches nothing in the
/// vocabulary are kept as `Unknown` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Category {
    Named(String),
    Unknown,
}

impl Category {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Display name; `UNKNOWN` for the fallback category.
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Role of a node within a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// The queried concept; exactly one per graph
    Center,
    /// A node produced by a parsed line
    Peripheral,
}

/// A node in the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier (the label)
    pub id: NodeId,
    pub role: NodeRole,
    /// Category of the line that produced this node; `None` for the center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Free-text description, empty for the center
    #[serde(default)]
    pub description: String,
}

impl Node {
    /// Create the center node for a queried concept
    pub fn center(label: impl Into<NodeId>) -> Self {
        Self {
            id: label.into(),
            role: NodeRole::Center,
            category: None,
            description: String::new(),
        }
    }

    /// Create a peripheral node
    pub fn peripheral(
        label: impl Into<NodeId>,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: label.into(),
            role: NodeRole::Peripheral,
            category: Some(category),
            description: description.into(),
        }
    }

    pub fn is_center(&self) -> bool {
        self.role == NodeRole::Center
    }

    /// The label shown to the user
    pub fn label(&self) -> &str {
        self.id.as_str()
    }
}
