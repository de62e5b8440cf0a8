use keggraph::graph::kegg_link_graph;
use keggraph::kegg::{DatabaseInfo, KeggError, KeggResult, KeggSource};
use keggraph::parser::ColumnRecord;
use keggraph::{Bipartite, Chain, ChainError, ChainState, Chained, LinkGraph, NodeId};
use std::cell::Cell;
use std::collections::HashMap;

/// In-memory KEGG: cross-reference lists and LINK relations
#[derive(Default)]
struct FakeKegg {
    linked: HashMap<String, Vec<String>>,
    links: HashMap<(String, String), Vec<(String, String)>>,
    link_calls: Cell<usize>,
}

impl FakeKegg {
    fn with_link(mut self, source: &str, target: &str, pairs: &[(&str, &str)]) -> Self {
        self.linked
            .entry(source.to_string())
            .or_default()
            .push(target.to_string());
        self.links.insert(
            (source.to_string(), target.to_string()),
            pairs.iter().map(|(s, t)| (s.to_string(), t.to_string())).collect(),
        );
        self
    }
}

impl KeggSource for FakeKegg {
    fn fetch_metadata(&self, category: &str) -> KeggResult<DatabaseInfo> {
        let mut fields = ColumnRecord::new();
        fields.insert(category.to_string(), vec![format!("KEGG {}", category)]);
        if let Some(linked) = self.linked.get(category) {
            fields.insert("linked db".to_string(), linked.clone());
        }
        Ok(DatabaseInfo::new(category, fields))
    }

    fn fetch_link(&self, source: &str, target: &str) -> KeggResult<(Vec<NodeId>, Vec<NodeId>)> {
        self.link_calls.set(self.link_calls.get() + 1);
        let pairs = self
            .links
            .get(&(source.to_string(), target.to_string()))
            .ok_or_else(|| KeggError::EmptyResponse(format!("{}_{}_link", target, source)))?;
        Ok(pairs
            .iter()
            .map(|(s, t)| (NodeId::from(s.as_str()), NodeId::from(t.as_str())))
            .unzip())
    }
}

/// hsa genes -> orthologs -> pathways
fn kegg() -> FakeKegg {
    FakeKegg::default()
        .with_link(
            "hsa",
            "ko",
            &[("hsa:1", "ko:K1"), ("hsa:2", "ko:K1"), ("hsa:3", "ko:K2")],
        )
        .with_link(
            "ko",
            "pathway",
            &[("ko:K1", "path:map1"), ("ko:K2", "path:map1"), ("ko:K2", "path:map2")],
        )
}

#[test]
fn test_link_graph_fetch() {
    let kegg = kegg();
    let link = LinkGraph::fetch(&kegg, "hsa", "ko").unwrap();

    assert_eq!(link.name(), "hsa_to_ko");
    assert_eq!(link.source_linked_db(), ["ko"]);
    assert_eq!(link.target_linked_db(), ["pathway"]);
    assert_eq!(link.graph().edge_count(), 3);
    assert!(link.is_bipartite());

    let plain = kegg_link_graph(&kegg, "ko", "pathway").unwrap();
    assert_eq!(plain.name(), "ko_to_pathway");
    assert_eq!(plain.node_count(), 4);
}

#[test]
fn test_chain_build() {
    let kegg = kegg();
    let chain = Chain::fetch(&kegg, ["hsa", "ko", "pathway"]).unwrap();

    assert_eq!(chain.state(), ChainState::Built);
    assert_eq!(chain.name(), "hsa>ko>pathway chain");
    assert_eq!(chain.levels().len(), 2);
    assert_eq!(chain.graph().node_count(), 7);
    assert_eq!(chain.graph().edge_count(), 6);
    assert!(chain.graph().get_node("ko:K2").unwrap().is_of("ko"));
    assert_eq!(kegg.link_calls.get(), 2);
}

#[test]
fn test_missing_cross_reference_leaves_chain_unbuilt() {
    let kegg = kegg();
    let mut chain = Chain::new(["hsa", "pathway", "ko"]).unwrap();

    let err = chain.build(&kegg).unwrap_err();
    assert!(matches!(
        err,
        ChainError::MissingCrossReference { ref source_db, ref target_db }
            if source_db.as_str() == "hsa" && target_db.as_str() == "pathway"
    ));
    assert_eq!(chain.state(), ChainState::Unbuilt);
    assert!(chain.graph().is_empty());
    assert_eq!(kegg.link_calls.get(), 0);
}

#[test]
fn test_build_twice_is_refused() {
    let kegg = kegg();
    let mut chain = Chain::fetch(&kegg, ["hsa", "ko"]).unwrap();
    assert!(matches!(
        chain.build(&kegg),
        Err(ChainError::InvalidState { state: ChainState::Built, .. })
    ));
}

#[test]
fn test_propagation_from_genes_to_pathways() {
    let kegg = kegg();
    let mut chain = Chain::fetch(&kegg, ["hsa", "ko", "pathway"]).unwrap();

    let reached = chain
        .directed_propagation(&[NodeId::from("hsa:3")], 0, true)
        .unwrap();
    assert_eq!(reached.name(), "propagation through hsa>ko>pathway chain");
    assert!(reached.is_directed());
    assert_eq!(
        reached.node_ids().map(NodeId::as_str).collect::<Vec<_>>(),
        ["hsa:3", "ko:K2", "path:map1", "path:map2"]
    );
    assert!(reached.has_edge("hsa:3", "ko:K2"));
    assert!(reached.has_edge("ko:K2", "path:map2"));
    assert!(!reached.has_edge("path:map2", "ko:K2"));
    assert_eq!(chain.state(), ChainState::Directed);
}

#[test]
fn test_chain_projection() {
    let kegg = kegg();
    let chain = Chain::fetch(&kegg, ["hsa", "ko", "pathway"]).unwrap();

    let orthologs = chain.projected_graph(None).unwrap();
    assert_eq!(orthologs.name(), "projection of ko_to_pathway onto ko nodes");
    assert!(orthologs.has_edge("ko:K1", "ko:K2"));

    let genes = chain.projected_graph_for("hsa").unwrap();
    assert!(genes.has_edge("hsa:1", "hsa:2"));
    assert_eq!(genes.degree("hsa:3"), 0);

    assert!(matches!(
        chain.projected_graph_for("drug"),
        Err(ChainError::UnknownCategory(_))
    ));
}
