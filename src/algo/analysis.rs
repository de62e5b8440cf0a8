//! Graph measures and path queries

use super::derive::connected_components;
use super::{build_view, ids_at};
use crate::graph::{GraphError, GraphResult, GraphStore, NodeId};
use keggraph_algorithms::{bfs, count_all_cliques, radius_and_diameter, NodeId as AlgoNodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Configuration for `graph_measures`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasuresConfig {
    /// Stop counting cliques after this many; `None` enumerates all of them
    pub clique_limit: Option<usize>,
}

impl Default for MeasuresConfig {
    fn default() -> Self {
        Self {
            clique_limit: Some(1_000_000),
        }
    }
}

/// Summary measures of the largest connected component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMeasures {
    pub nodes: usize,
    pub edges: usize,
    /// All cliques, single nodes and edges included
    pub cliques: usize,
    pub max_clique_size: usize,
    pub cliques_truncated: bool,
    pub radius: usize,
    pub diameter: usize,
}

impl fmt::Display for GraphMeasures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes: {}", self.nodes)?;
        writeln!(f, "edges: {}", self.edges)?;
        let marker = if self.cliques_truncated { "+" } else { "" };
        writeln!(f, "cliques: {}{}", self.cliques, marker)?;
        writeln!(f, "radius: {}", self.radius)?;
        write!(f, "diameter: {}", self.diameter)
    }
}

/// Measures of the largest connected component of `graph`
pub fn graph_measures(graph: &GraphStore, config: &MeasuresConfig) -> GraphResult<GraphMeasures> {
    let components = connected_components(graph);
    let largest = components
        .first()
        .ok_or_else(|| GraphError::EmptyGraph(graph.name().to_string()))?;

    let view = build_view(largest);
    let cliques = count_all_cliques(&view, config.clique_limit);
    if cliques.truncated {
        warn!(
            "Clique enumeration on '{}' stopped after {} cliques",
            graph.name(),
            cliques.count
        );
    }

    // A connected, non-empty component always has finite eccentricities
    let (radius, diameter) = radius_and_diameter(&view)
        .ok_or_else(|| GraphError::EmptyGraph(largest.name().to_string()))?;

    let measures = GraphMeasures {
        nodes: largest.node_count(),
        edges: largest.edge_count(),
        cliques: cliques.count,
        max_clique_size: cliques.max_size,
        cliques_truncated: cliques.truncated,
        radius,
        diameter,
    };
    debug!("Measures of '{}': {:?}", graph.name(), measures);
    Ok(measures)
}

/// Unweighted shortest path from `source` to `target`, following successors.
///
/// Returns `None` when `target` is unreachable.
pub fn shortest_path(
    graph: &GraphStore,
    source: &str,
    target: &str,
) -> GraphResult<Option<Vec<NodeId>>> {
    let source_idx = graph
        .node_index(source)
        .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(source)))?;
    let target_idx = graph
        .node_index(target)
        .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(target)))?;

    let view = build_view(graph);
    let path = bfs(&view, source_idx as AlgoNodeId, target_idx as AlgoNodeId)
        .map(|result| ids_at(graph, result.path.into_iter().map(|idx| idx as usize)));
    Ok(path)
}
