//! Edge implementation for typed graphs

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// Relation metadata carried by edges derived from relational sources
/// (e.g. `PPrel` with subtypes `activation`, `phosphorylation`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub relation_type: String,
    pub subtypes: Vec<String>,
}

impl Relation {
    pub fn new(relation_type: impl Into<String>) -> Self {
        Relation {
            relation_type: relation_type.into(),
            subtypes: Vec::new(),
        }
    }

    pub fn with_subtypes<I, S>(mut self, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtypes = subtypes.into_iter().map(Into::into).collect();
        self
    }
}

/// An edge as reported by the store
///
/// In undirected graphs `source`/`target` only reflect insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Plain edges carry no payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            relation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_builder() {
        let relation = Relation::new("PPrel").with_subtypes(["activation", "phosphorylation"]);
        assert_eq!(relation.relation_type, "PPrel");
        assert_eq!(relation.subtypes, vec!["activation", "phosphorylation"]);
    }

    #[test]
    fn test_edge_new() {
        let edge = Edge::new("a", "b");
        assert_eq!(edge.source.as_str(), "a");
        assert_eq!(edge.target.as_str(), "b");
        assert!(edge.relation.is_none());
    }
}
