//! Node-link JSON export for external renderers

use super::edge::Edge;
use super::node::Node;
use super::store::{GraphResult, GraphStore};
use super::types::GraphKind;
use serde::{Deserialize, Serialize};

/// Serializable snapshot of a graph in node-link layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkData {
    pub directed: bool,
    pub name: String,
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

impl GraphStore {
    pub fn to_node_link(&self) -> NodeLinkData {
        NodeLinkData {
            directed: self.is_directed(),
            name: self.name().to_string(),
            nodes: self.nodes().cloned().collect(),
            links: self.edges(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_node_link())
    }

    /// Rebuild a graph from a node-link snapshot; links must reference listed nodes
    pub fn from_node_link(data: NodeLinkData) -> GraphResult<GraphStore> {
        let kind = if data.directed {
            GraphKind::Directed
        } else {
            GraphKind::Undirected
        };
        let mut graph = GraphStore::with_kind(data.name, kind);
        for node in data.nodes {
            graph.insert_node(node);
        }
        for link in data.links {
            match link.relation {
                Some(relation) => {
                    graph.add_edge_with_relation(&link.source, &link.target, relation)?
                }
                None => graph.add_edge(&link.source, &link.target)?,
            };
        }
        Ok(graph)
    }
}
