//! Bipartite graphs between two KEGG databases
//!
//! A [`LinkGraph`] is built from the LINK relation of a `(source, target)`
//! database pair. It keeps track of which nodes belong to each side so that
//! derived graphs can be re-tagged and projected.

use crate::algo::{build_view, connected_subgraph, is_bipartite, neighbor_graph, projected_graph};
use crate::graph::{
    categorize, populate, Category, GraphError, GraphResult, GraphStore, NodeCategories, NodeId,
};
use crate::kegg::{KeggError, KeggSource};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Kegg(#[from] KeggError),
}

pub type LinkResult<T> = Result<T, LinkError>;

/// Capability of graphs split into a source and a target side
pub trait Bipartite {
    fn graph(&self) -> &GraphStore;
    fn source_category(&self) -> &Category;
    fn target_category(&self) -> &Category;
    fn source_nodes(&self) -> &NodeCategories;
    fn target_nodes(&self) -> &NodeCategories;

    /// No edge joins two nodes of the same side, and the graph is two-colourable
    fn is_bipartite(&self) -> bool {
        let graph = self.graph();
        let closed_side = |side: &NodeCategories| {
            side.keys().any(|node| {
                graph
                    .neighbors(node.as_str())
                    .any(|other| side.contains_key(other.as_str()))
            })
        };
        !closed_side(self.source_nodes())
            && !closed_side(self.target_nodes())
            && is_bipartite(&build_view(graph))
    }

    /// Projection onto `seeds`, or onto the source side when `None`
    fn projected_graph(&self, seeds: Option<&[NodeId]>) -> GraphResult<GraphStore> {
        let graph = self.graph();
        if !self.is_bipartite() {
            return Err(GraphError::NotBipartite(graph.name().to_string()));
        }

        let seeds: Vec<NodeId> = match seeds {
            Some(seeds) => seeds.to_vec(),
            None => self.source_nodes().keys().cloned().collect(),
        };
        let category = seeds
            .iter()
            .find_map(|seed| graph.get_node(seed.as_str()))
            .and_then(|node| node.nodetype.clone())
            .unwrap_or_else(|| self.source_category().clone());

        let name = format!("projection of {} onto {} nodes", graph.name(), category);
        projected_graph(graph, &seeds, Some(&name))
    }
}

#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: GraphStore,
    source_category: Category,
    target_category: Category,
    source_nodes: NodeCategories,
    target_nodes: NodeCategories,
    source_linked_db: Vec<String>,
    target_linked_db: Vec<String>,
}

impl LinkGraph {
    /// Fetch the LINK relation and both INFO records, and build the graph `"{source}_to_{target}"`
    pub fn fetch<S: KeggSource + ?Sized>(
        kegg: &S,
        source_category: &str,
        target_category: &str,
    ) -> LinkResult<Self> {
        let (sources, targets) = kegg.fetch_link(source_category, target_category)?;
        let mut link = Self::from_links(source_category, target_category, sources, targets)?;

        link.source_linked_db = kegg.fetch_metadata(source_category)?.linked_db().to_vec();
        link.target_linked_db = kegg.fetch_metadata(target_category)?.linked_db().to_vec();

        info!(
            "Built link graph '{}': {} {} nodes, {} {} nodes, {} edges",
            link.graph.name(),
            link.source_nodes.len(),
            link.source_category,
            link.target_nodes.len(),
            link.target_category,
            link.graph.edge_count()
        );
        Ok(link)
    }

    /// Build from already fetched, index-aligned node lists
    pub fn from_links(
        source_category: impl Into<Category>,
        target_category: impl Into<Category>,
        sources: Vec<NodeId>,
        targets: Vec<NodeId>,
    ) -> GraphResult<Self> {
        let source_category = source_category.into();
        let target_category = target_category.into();

        let mut graph = GraphStore::new(format!("{}_to_{}", source_category, target_category));
        populate(&mut graph, &sources, &targets, &source_category, &target_category)?;

        Ok(LinkGraph {
            source_nodes: categorize(sources, &source_category),
            target_nodes: categorize(targets, &target_category),
            graph,
            source_category,
            target_category,
            source_linked_db: Vec::new(),
            target_linked_db: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.graph.name()
    }

    pub fn into_graph(self) -> GraphStore {
        self.graph
    }

    /// Databases cross-referenced by the source database (empty when built offline)
    pub fn source_linked_db(&self) -> &[String] {
        &self.source_linked_db
    }

    pub fn target_linked_db(&self) -> &[String] {
        &self.target_linked_db
    }

    /// Category of the first seed present in the graph
    fn seed_category(&self, seeds: &[NodeId]) -> GraphResult<Category> {
        let node = seeds
            .iter()
            .find_map(|seed| self.graph.get_node(seed.as_str()))
            .ok_or_else(|| GraphError::SeedsNotInGraph(self.graph.name().to_string()))?;
        node.nodetype
            .clone()
            .ok_or_else(|| GraphError::NotATypedGraph(self.graph.name().to_string()))
    }

    /// Same category pair and cross-references, around another graph
    fn with_graph(&self, graph: GraphStore) -> LinkGraph {
        LinkGraph {
            source_nodes: graph.nodes_of_category(&self.source_category),
            target_nodes: graph.nodes_of_category(&self.target_category),
            graph,
            source_category: self.source_category.clone(),
            target_category: self.target_category.clone(),
            source_linked_db: self.source_linked_db.clone(),
            target_linked_db: self.target_linked_db.clone(),
        }
    }

    fn replace_graph(&mut self, graph: GraphStore) {
        self.graph.replace_contents(graph);
        self.source_nodes = self.graph.nodes_of_category(&self.source_category);
        self.target_nodes = self.graph.nodes_of_category(&self.target_category);
    }

    fn derive_neighbor_graph(
        &self,
        seeds: &[NodeId],
        keep_isolated: bool,
    ) -> GraphResult<GraphStore> {
        let category = self.seed_category(seeds)?;
        let seeds = categorize(seeds, category);
        Ok(neighbor_graph(&self.graph, &seeds, keep_isolated, None))
    }

    /// Seeds plus their neighbors, as a new link graph
    pub fn neighbor_graph(&self, seeds: &[NodeId], keep_isolated: bool) -> GraphResult<LinkGraph> {
        let graph = self.derive_neighbor_graph(seeds, keep_isolated)?;
        Ok(self.with_graph(graph))
    }

    /// Shrink this graph to the seeds plus their neighbors; the name is kept
    pub fn neighbor_graph_in_place(
        &mut self,
        seeds: &[NodeId],
        keep_isolated: bool,
    ) -> GraphResult<()> {
        let graph = self.derive_neighbor_graph(seeds, keep_isolated)?;
        self.replace_graph(graph);
        Ok(())
    }

    /// Everything reachable from the seeds, as a new link graph
    pub fn connected_subgraph(&self, seeds: &[NodeId]) -> GraphResult<LinkGraph> {
        self.seed_category(seeds)?;
        Ok(self.with_graph(connected_subgraph(&self.graph, seeds, None)))
    }

    /// Shrink this graph to everything reachable from the seeds; the name is kept
    pub fn connected_subgraph_in_place(&mut self, seeds: &[NodeId]) -> GraphResult<()> {
        self.seed_category(seeds)?;
        let graph = connected_subgraph(&self.graph, seeds, None);
        self.replace_graph(graph);
        Ok(())
    }
}

impl Bipartite for LinkGraph {
    fn graph(&self) -> &GraphStore {
        &self.graph
    }

    fn source_category(&self) -> &Category {
        &self.source_category
    }

    fn target_category(&self) -> &Category {
        &self.target_category
    }

    fn source_nodes(&self) -> &NodeCategories {
        &self.source_nodes
    }

    fn target_nodes(&self) -> &NodeCategories {
        &self.target_nodes
    }
}
