//! Node implementation for typed graphs

use super::types::{Category, NodeId};
use serde::{Deserialize, Serialize};

/// A node in a typed graph
///
/// Nodes carry:
/// - A unique ID
/// - A category (`nodetype`); only foreign graphs lack one
/// - A display label, defaulting to the ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Category this node belongs to
    pub nodetype: Option<Category>,

    /// Display label
    pub label: String,
}

impl Node {
    /// Create a typed node labelled with its own ID
    pub fn new(id: impl Into<NodeId>, nodetype: impl Into<Category>) -> Self {
        let id = id.into();
        let label = id.as_str().to_string();
        Node {
            id,
            nodetype: Some(nodetype.into()),
            label,
        }
    }

    /// Create a node without a category
    pub fn untyped(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        let label = id.as_str().to_string();
        Node {
            id,
            nodetype: None,
            label,
        }
    }

    /// Replace the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Check if node belongs to a category
    pub fn is_of(&self, category: &str) -> bool {
        self.nodetype.as_ref().is_some_and(|c| c.as_str() == category)
    }
}
