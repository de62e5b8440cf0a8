//! Graph construction from index-aligned node lists

use super::store::{GraphError, GraphResult, GraphStore};
use super::types::{Category, NodeId};
use crate::kegg::KeggSource;
use crate::link::LinkResult;
use tracing::debug;

/// Add `nodes_a[i]` (tagged `category_a`), `nodes_b[i]` (tagged `category_b`)
/// and the edge between them, for every index.
///
/// Lists of different lengths are rejected before the graph is touched.
pub fn populate(
    graph: &mut GraphStore,
    nodes_a: &[NodeId],
    nodes_b: &[NodeId],
    category_a: impl Into<Category>,
    category_b: impl Into<Category>,
) -> GraphResult<()> {
    if nodes_a.len() != nodes_b.len() {
        return Err(GraphError::LengthMismatch {
            left: nodes_a.len(),
            right: nodes_b.len(),
        });
    }

    let category_a = category_a.into();
    let category_b = category_b.into();

    for (a, b) in nodes_a.iter().zip(nodes_b) {
        graph.add_node(a, &category_a);
        graph.add_node(b, &category_b);
        graph.add_edge(a, b)?;
    }

    debug!(
        "Populated graph '{}': {} nodes, {} edges",
        graph.name(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(())
}

/// Fetch the `source` -> `target` link relation and build the graph `"{source}_to_{target}"`
pub fn kegg_link_graph<S: KeggSource + ?Sized>(
    kegg: &S,
    source: &str,
    target: &str,
) -> LinkResult<GraphStore> {
    let (source_nodes, target_nodes) = kegg.fetch_link(source, target)?;

    let mut graph = GraphStore::new(format!("{}_to_{}", source, target));
    populate(&mut graph, &source_nodes, &target_nodes, source, target)?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn test_populate_builds_bipartite_pairs() {
        let mut graph = GraphStore::new("g");
        populate(
            &mut graph,
            &ids(&["a1", "a1", "a2"]),
            &ids(&["b1", "b2", "b1"]),
            "A",
            "B",
        )
        .unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.get_node("b2").unwrap().is_of("B"));
        assert_eq!(graph.get_node("a2").unwrap().label, "a2");
    }

    #[test]
    fn test_populate_rejects_mismatched_lengths() {
        let mut graph = GraphStore::new("g");
        let result = populate(&mut graph, &ids(&["a1", "a2"]), &ids(&["b1"]), "A", "B");

        assert_eq!(result, Err(GraphError::LengthMismatch { left: 2, right: 1 }));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_populate_skips_self_pairs() {
        let mut graph = GraphStore::new("g");
        populate(&mut graph, &ids(&["x"]), &ids(&["x"]), "A", "A").unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
