//! Core type definitions for typed graphs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a node (e.g. `hsa:9344`, `ec:2.7.8.2`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

/// Node category (the `nodetype`), usually the KEGG database a node comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(category: impl Into<String>) -> Self {
        Category(category.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category(s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_string())
    }
}

impl From<&Category> for Category {
    fn from(c: &Category) -> Self {
        c.clone()
    }
}

/// Whether edges carry a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GraphKind {
    #[default]
    Undirected,
    Directed,
}

/// Ordered node -> category map, used for seed sets and bipartition sides
pub type NodeCategories = IndexMap<NodeId, Category>;

/// Tag every node in `nodes` with the same category, keeping first-seen order
pub fn categorize<I, N>(nodes: I, category: impl Into<Category>) -> NodeCategories
where
    I: IntoIterator<Item = N>,
    N: Into<NodeId>,
{
    let category = category.into();
    nodes
        .into_iter()
        .map(|n| (n.into(), category.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new("hsa:9344");
        assert_eq!(id.as_str(), "hsa:9344");
        assert_eq!(format!("{}", id), "hsa:9344");

        let id2: NodeId = "ec:2.7.8.2".into();
        assert!(id2 < id);
    }

    #[test]
    fn test_category() {
        let category = Category::new("enzyme");
        assert_eq!(category.as_str(), "enzyme");
        assert_eq!(format!("{}", category), "enzyme");
    }

    #[test]
    fn test_lookup_by_str() {
        let map = categorize(["a1", "a2", "a1"], "A");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a2"), Some(&Category::new("A")));
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("a1"));
    }

    #[test]
    fn test_default_kind() {
        assert_eq!(GraphKind::default(), GraphKind::Undirected);
    }
}
