//! Graph derivation and analysis
//!
//! Algorithms are implemented in the `keggraph-algorithms` crate over dense
//! integer views. This module provides the adapter layer plus the operations
//! that derive new typed graphs from existing ones.

pub mod analysis;
pub mod derive;

use crate::graph::{GraphStore, NodeId};
use keggraph_algorithms::{GraphView, NodeId as AlgoNodeId};

// Re-export algorithms
pub use keggraph_algorithms::{
    count_all_cliques, is_bipartite, radius_and_diameter, weakly_connected_components,
    CliqueCount, WccResult,
};

pub use analysis::{graph_measures, shortest_path, GraphMeasures, MeasuresConfig};
pub use derive::{
    compose, connected_components, connected_subgraph, neighbor_graph, prune_isolated_nodes,
    projected_graph,
};

/// Build a GraphView from the store for algorithm execution.
///
/// Dense index `i` (and algorithm node id `i`) is the node at insertion
/// position `i` in the store.
pub fn build_view(store: &GraphStore) -> GraphView {
    let node_count = store.node_count();
    let index_to_node: Vec<AlgoNodeId> = (0..node_count as AlgoNodeId).collect();

    let mut outgoing: Vec<Vec<usize>> = Vec::with_capacity(node_count);
    for id in store.node_ids() {
        let targets = store
            .neighbors(id.as_str())
            .filter_map(|other| store.node_index(other.as_str()))
            .collect();
        outgoing.push(targets);
    }

    GraphView::from_adjacency_list(index_to_node, outgoing, store.is_directed())
}

/// Dense indices of the given nodes; unknown IDs are skipped
pub(crate) fn indices_of<'a, I>(store: &GraphStore, ids: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a NodeId>,
{
    ids.into_iter()
        .filter_map(|id| store.node_index(id.as_str()))
        .collect()
}

/// Node IDs for dense indices coming back from a view built over `store`
pub(crate) fn ids_at<I>(store: &GraphStore, indices: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = usize>,
{
    indices
        .into_iter()
        .filter_map(|idx| store.node_id_at(idx).cloned())
        .collect()
}
