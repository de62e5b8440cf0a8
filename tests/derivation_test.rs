use keggraph::graph::{categorize, populate};
use keggraph::{
    compose, connected_components, connected_subgraph, graph_measures, neighbor_graph,
    projected_graph, prune_isolated_nodes, shortest_path, GraphError, GraphStore, MeasuresConfig,
    NodeId,
};

fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}

/// Two components:
///   hsa:1 - ko:A - hsa:2 - ko:B
///   hsa:3 - ko:C
fn gene_to_ortholog() -> GraphStore {
    let mut graph = GraphStore::new("hsa_to_ko");
    populate(
        &mut graph,
        &ids(&["hsa:1", "hsa:2", "hsa:2", "hsa:3"]),
        &ids(&["ko:A", "ko:A", "ko:B", "ko:C"]),
        "hsa",
        "ko",
    )
    .unwrap();
    graph
}

#[test]
fn test_populate_builds_typed_graph() {
    let graph = gene_to_ortholog();

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(
        graph.unique_categories().unwrap().iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        ["hsa", "ko"]
    );
    assert_eq!(graph.get_nodes_by_category("ko").unwrap(), ids(&["ko:A", "ko:B", "ko:C"]));
    assert!(matches!(
        graph.get_nodes_by_category("pathway"),
        Err(GraphError::MissingCategory { .. })
    ));
}

#[test]
fn test_populate_length_mismatch_leaves_graph_untouched() {
    let mut graph = GraphStore::new("g");
    let err = populate(&mut graph, &ids(&["a", "b"]), &ids(&["c"]), "x", "y").unwrap_err();
    assert_eq!(err, GraphError::LengthMismatch { left: 2, right: 1 });
    assert!(graph.is_empty());
}

#[test]
fn test_neighbor_graph() {
    let graph = gene_to_ortholog();
    let seeds = categorize(ids(&["ko:A", "ko:Z"]), "ko");

    let neighbors = neighbor_graph(&graph, &seeds, false, None);
    assert_eq!(neighbors.name(), "neighbor_graph_of_hsa_to_ko");
    assert_eq!(neighbors.node_count(), 3);
    assert_eq!(neighbors.edge_count(), 2);
    assert!(!neighbors.has_node("ko:Z"));

    let kept = neighbor_graph(&graph, &seeds, true, Some("kept"));
    assert_eq!(kept.name(), "kept");
    assert_eq!(kept.node_count(), 4);
    assert_eq!(kept.degree("ko:Z"), 0);
    assert!(kept.get_node("ko:Z").unwrap().is_of("ko"));
}

#[test]
fn test_populate_single_category() {
    let mut graph = GraphStore::new("ko_to_ko");
    populate(&mut graph, &ids(&["x", "y"]), &ids(&["y", "z"]), "A", "A").unwrap();

    assert_eq!(
        graph.unique_categories().unwrap().iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        ["A"]
    );
    assert_eq!(graph.get_nodes_by_category("A").unwrap(), ids(&["x", "y", "z"]));
}

#[test]
fn test_neighbor_graph_is_stable_on_its_result() {
    let graph = gene_to_ortholog();
    let seeds = categorize(ids(&["hsa:1", "ko:Z"]), "ko");

    let first = neighbor_graph(&graph, &seeds, true, None);
    // Seed with every node of the result, each under its own category
    let mut reseeded = first.nodes_of_category(&"hsa".into());
    reseeded.extend(first.nodes_of_category(&"ko".into()));
    assert_eq!(reseeded.len(), first.node_count());

    let second = neighbor_graph(&first, &reseeded, true, None);

    assert_eq!(
        second.node_ids().collect::<Vec<_>>(),
        first.node_ids().collect::<Vec<_>>()
    );
    assert_eq!(second.edges(), first.edges());
    assert_eq!(second.edge_count(), 1);
}

#[test]
fn test_projection_shares_neighbors() {
    let graph = gene_to_ortholog();

    let projection = projected_graph(&graph, &ids(&["hsa:1", "hsa:2", "hsa:3"]), None).unwrap();
    assert_eq!(projection.name(), "hsa_to_ko_projected");
    assert_eq!(projection.node_count(), 3);
    assert_eq!(projection.edge_count(), 1);
    assert!(projection.has_edge("hsa:2", "hsa:1"));
    assert_eq!(projection.degree("hsa:3"), 0);

    let orthologs = projected_graph(&graph, &ids(&["ko:A", "ko:B", "ko:C"]), None).unwrap();
    assert!(orthologs.has_edge("ko:A", "ko:B"));
    assert!(!orthologs.has_edge("ko:A", "ko:C"));
}

#[test]
fn test_projection_errors() {
    let graph = gene_to_ortholog();

    assert_eq!(
        projected_graph(&graph, &ids(&["nowhere"]), None).unwrap_err(),
        GraphError::NoProjection("hsa_to_ko".to_string())
    );
    assert!(matches!(
        projected_graph(&graph, &ids(&["hsa:1", "ko:A"]), None),
        Err(GraphError::MixedCategories { .. })
    ));

    // Absent seeds become isolated members
    let padded = projected_graph(&graph, &ids(&["hsa:1", "hsa:99"]), None).unwrap();
    assert!(padded.has_node("hsa:99"));
    assert_eq!(padded.edge_count(), 0);
}

#[test]
fn test_components_and_connected_subgraph() {
    let graph = gene_to_ortholog();

    let components = connected_components(&graph);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].name(), "hsa_to_ko_component_0");
    assert_eq!(components[0].node_count(), 4);
    assert_eq!(components[1].node_count(), 2);

    let reached = connected_subgraph(&graph, &ids(&["ko:C"]), None);
    assert_eq!(reached.name(), "connected_subgraph_of_hsa_to_ko");
    assert_eq!(
        reached.node_ids().map(NodeId::as_str).collect::<Vec<_>>(),
        ["hsa:3", "ko:C"]
    );
}

#[test]
fn test_compose_and_prune() {
    let mut first = GraphStore::new("first");
    first.add_node("a", "x");
    first.add_node("b", "y");
    first.add_edge("a", "b").unwrap();

    let mut second = GraphStore::new("second");
    second.add_node("b", "z");
    second.add_node("c", "z");

    let composed = compose([&first, &second]).unwrap();
    assert_eq!(composed.name(), "second");
    assert_eq!(composed.node_count(), 3);
    assert_eq!(composed.edge_count(), 1);
    assert!(composed.get_node("b").unwrap().is_of("z"));

    let pruned = prune_isolated_nodes(&composed);
    assert!(!pruned.has_node("c"));
    assert_eq!(composed.node_count(), 3);

    let directed = GraphStore::new_directed("d");
    assert!(matches!(
        compose([&first, &directed]),
        Err(GraphError::Composition(_))
    ));
}

#[test]
fn test_measures_and_paths() {
    let graph = gene_to_ortholog();

    let measures = graph_measures(&graph, &MeasuresConfig::default()).unwrap();
    assert_eq!(measures.nodes, 4);
    assert_eq!(measures.edges, 3);
    // 4 single nodes + 3 edges
    assert_eq!(measures.cliques, 7);
    assert_eq!(measures.max_clique_size, 2);
    assert!(!measures.cliques_truncated);
    assert_eq!(measures.radius, 2);
    assert_eq!(measures.diameter, 3);

    let path = shortest_path(&graph, "hsa:1", "ko:B").unwrap().unwrap();
    assert_eq!(path, ids(&["hsa:1", "ko:A", "hsa:2", "ko:B"]));
    assert_eq!(shortest_path(&graph, "hsa:1", "ko:C").unwrap(), None);
    assert!(shortest_path(&graph, "hsa:1", "missing").is_err());

    assert!(matches!(
        graph_measures(&GraphStore::new("empty"), &MeasuresConfig::default()),
        Err(GraphError::EmptyGraph(_))
    ));
}

#[test]
fn test_node_link_export() {
    let graph = gene_to_ortholog();
    let json = graph.to_json().unwrap();
    let data: keggraph::NodeLinkData = serde_json::from_str(&json).unwrap();

    let restored = GraphStore::from_node_link(data).unwrap();
    assert_eq!(restored.name(), "hsa_to_ko");
    assert_eq!(restored.node_count(), 6);
    assert_eq!(restored.edge_count(), 4);
    assert!(restored.get_node("ko:B").unwrap().is_of("ko"));
}
