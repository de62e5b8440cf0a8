//! Operations deriving new typed graphs from existing ones
//!
//! All functions leave their input untouched.

use super::{build_view, ids_at, indices_of};
use crate::graph::{GraphError, GraphKind, GraphResult, GraphStore, NodeCategories, NodeId};
use indexmap::IndexSet;
use keggraph_algorithms::{projected_pairs, reachable_from, weakly_connected_components};
use tracing::debug;

/// Induced subgraph over the seeds and their immediate neighbors (successors when directed).
///
/// Seeds absent from `graph` contribute nothing, unless `keep_isolated` is set:
/// then they are added as isolated nodes with the category supplied in `seeds`.
/// Defaults to the name `neighbor_graph_of_<name>`.
pub fn neighbor_graph(
    graph: &GraphStore,
    seeds: &NodeCategories,
    keep_isolated: bool,
    name: Option<&str>,
) -> GraphStore {
    let mut keep: IndexSet<&NodeId> = IndexSet::new();
    for seed in seeds.keys() {
        if !graph.has_node(seed.as_str()) {
            debug!("Seed {} is not in graph '{}'", seed, graph.name());
            continue;
        }
        keep.insert(seed);
        keep.extend(graph.neighbors(seed.as_str()));
    }

    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("neighbor_graph_of_{}", graph.name()));
    let mut result = graph.subgraph(keep.into_iter(), name);

    if keep_isolated {
        for (seed, category) in seeds {
            if !result.has_node(seed.as_str()) {
                result.add_node(seed, category);
            }
        }
    }

    result
}

/// Projection of `graph` onto the seed nodes.
///
/// The projection category is the one of the first seed present in the
/// graph. Two members are linked iff they share a common neighbor, with one
/// edge per pair. Seeds absent from the graph become isolated nodes of that
/// category. Defaults to the name `<name>_projected`.
pub fn projected_graph(
    graph: &GraphStore,
    seeds: &[NodeId],
    name: Option<&str>,
) -> GraphResult<GraphStore> {
    let first = seeds
        .iter()
        .find_map(|seed| graph.get_node(seed.as_str()))
        .ok_or_else(|| GraphError::NoProjection(graph.name().to_string()))?;
    let category = first
        .nodetype
        .clone()
        .ok_or_else(|| GraphError::NotATypedGraph(graph.name().to_string()))?;

    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_projected", graph.name()));
    let mut projection = GraphStore::with_kind(name, graph.kind());
    let mut members = Vec::new();

    for seed in seeds {
        match graph.get_node(seed.as_str()) {
            Some(node) if node.nodetype.as_ref() == Some(&category) => {
                projection.copy_node(node);
                members.push(seed);
            }
            Some(node) => {
                return Err(GraphError::MixedCategories {
                    node: seed.clone(),
                    expected: category,
                    found: node
                        .nodetype
                        .clone()
                        .ok_or_else(|| GraphError::NotATypedGraph(graph.name().to_string()))?,
                });
            }
            None => {
                projection.add_node(seed, &category);
            }
        }
    }

    let view = build_view(graph);
    let member_indices = indices_of(graph, members);
    for (u, w) in projected_pairs(&view, &member_indices) {
        if let (Some(a), Some(b)) = (graph.node_id_at(u), graph.node_id_at(w)) {
            projection.add_edge(a, b)?;
        }
    }

    debug!(
        "Projected '{}' onto {} {} nodes: {} edges",
        graph.name(),
        projection.node_count(),
        category,
        projection.edge_count()
    );
    Ok(projection)
}

/// Weakly connected components, largest first; ties keep discovery order.
///
/// Components are named `<name>_component_<i>`.
pub fn connected_components(graph: &GraphStore) -> Vec<GraphStore> {
    let view = build_view(graph);
    let wcc = weakly_connected_components(&view);

    wcc.components
        .iter()
        .enumerate()
        .map(|(i, members)| {
            let ids = ids_at(graph, members.iter().map(|&m| m as usize));
            graph.subgraph(ids.iter(), format!("{}_component_{}", graph.name(), i))
        })
        .collect()
}

/// Induced subgraph over every node reachable from any seed.
///
/// Follows successors (all neighbors when undirected); absent seeds are
/// ignored. Defaults to the name `connected_subgraph_of_<name>`.
pub fn connected_subgraph(graph: &GraphStore, seeds: &[NodeId], name: Option<&str>) -> GraphStore {
    let view = build_view(graph);
    let seed_indices = indices_of(graph, seeds);
    let reached = reachable_from(&view, &seed_indices);

    let ids = ids_at(
        graph,
        reached
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(idx, _)| idx),
    );
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("connected_subgraph_of_{}", graph.name()));
    graph.subgraph(ids.iter(), name)
}

/// Union of several graphs of the same kind.
///
/// Node attributes and edge relations of later graphs win; node order is
/// first appearance. The result takes the name of the last graph.
pub fn compose<'a, I>(graphs: I) -> GraphResult<GraphStore>
where
    I: IntoIterator<Item = &'a GraphStore>,
{
    let mut graphs = graphs.into_iter().peekable();
    let kind: GraphKind = graphs
        .peek()
        .map(|g| g.kind())
        .ok_or_else(|| GraphError::Composition("no graphs to compose".to_string()))?;

    let mut composed = GraphStore::with_kind("", kind);
    for graph in graphs {
        if graph.kind() != kind {
            return Err(GraphError::Composition(format!(
                "graph '{}' is {:?}, expected {:?}",
                graph.name(),
                graph.kind(),
                kind
            )));
        }
        for node in graph.nodes() {
            composed.copy_node(node);
        }
        for edge in graph.edges() {
            composed.copy_edge(edge);
        }
        composed.set_name(graph.name());
    }

    Ok(composed)
}

/// Copy of `graph` without its isolated nodes
pub fn prune_isolated_nodes(graph: &GraphStore) -> GraphStore {
    let mut pruned = graph.clone();
    let removed = pruned.prune_isolated_nodes_in_place();
    debug!("Pruned {} isolated nodes from '{}'", removed, graph.name());
    pruned
}
