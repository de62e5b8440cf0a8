//! In-memory typed graph storage
//!
//! Nodes are keyed by string identifiers and keep insertion order, which is
//! what "discovery order" means everywhere else in the crate. Edges are simple:
//! re-adding an edge is a no-op and self-loops are never stored.

use super::edge::{Edge, Relation};
use super::node::Node;
use super::types::{Category, GraphKind, NodeCategories, NodeId};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Graph '{0}' is not a valid typed graph: no node carries a nodetype")]
    NotATypedGraph(String),

    #[error("Category {category} is missing in graph '{graph}'")]
    MissingCategory { category: Category, graph: String },

    #[error("Graph '{0}' has no projected graph: no seed node is part of it")]
    NoProjection(String),

    #[error("Cannot compose graphs: {0}")]
    Composition(String),

    #[error("Node lists differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Seed node {node} has category {found}, expected {expected}")]
    MixedCategories {
        node: NodeId,
        expected: Category,
        found: Category,
    },

    #[error("No seed node is present in graph '{0}'")]
    SeedsNotInGraph(String),

    #[error("Graph '{0}' is not bipartite")]
    NotBipartite(String),

    #[error("Graph '{0}' is empty")]
    EmptyGraph(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Per-node storage: attributes plus adjacency
///
/// Undirected graphs only fill `outgoing`.
#[derive(Debug, Clone)]
struct NodeSlot {
    node: Node,
    outgoing: IndexSet<NodeId>,
    incoming: IndexSet<NodeId>,
}

impl NodeSlot {
    fn new(node: Node) -> Self {
        NodeSlot {
            node,
            outgoing: IndexSet::new(),
            incoming: IndexSet::new(),
        }
    }
}

/// In-memory typed graph
///
/// - slots: NodeId -> node attributes + adjacency, in insertion order
/// - relations: edge key -> relation metadata, for edges that carry one
#[derive(Debug, Clone)]
pub struct GraphStore {
    name: String,
    kind: GraphKind,
    slots: IndexMap<NodeId, NodeSlot>,
    relations: HashMap<(NodeId, NodeId), Relation>,
    edge_count: usize,
}

impl GraphStore {
    /// Create a new empty undirected graph
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, GraphKind::Undirected)
    }

    /// Create a new empty directed graph
    pub fn new_directed(name: impl Into<String>) -> Self {
        Self::with_kind(name, GraphKind::Directed)
    }

    pub fn with_kind(name: impl Into<String>, kind: GraphKind) -> Self {
        GraphStore {
            name: name.into(),
            kind,
            slots: IndexMap::new(),
            relations: HashMap::new(),
            edge_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Insert a typed node, or re-tag it if it already exists.
    ///
    /// Returns true if the node is new.
    pub fn add_node(&mut self, id: impl Into<NodeId>, nodetype: impl Into<Category>) -> bool {
        let id = id.into();
        let nodetype = nodetype.into();
        match self.slots.get_mut(id.as_str()) {
            Some(slot) => {
                slot.node.nodetype = Some(nodetype);
                false
            }
            None => {
                let node = Node::new(id.clone(), nodetype);
                self.slots.insert(id, NodeSlot::new(node));
                true
            }
        }
    }

    /// Insert a node without a category (foreign graphs only)
    pub fn add_untyped_node(&mut self, id: impl Into<NodeId>) -> bool {
        self.insert_node(Node::untyped(id))
    }

    /// Insert a node with all its attributes, replacing the attributes of an existing one
    pub fn insert_node(&mut self, node: Node) -> bool {
        match self.slots.get_mut(node.id.as_str()) {
            Some(slot) => {
                slot.node = node;
                false
            }
            None => {
                self.slots.insert(node.id.clone(), NodeSlot::new(node));
                true
            }
        }
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns false if the edge already existed or would be a self-loop.
    pub fn add_edge(&mut self, a: impl AsRef<str>, b: impl AsRef<str>) -> GraphResult<bool> {
        self.link(a.as_ref(), b.as_ref(), None)
    }

    /// Add an edge carrying relation metadata (replaces the metadata of an existing edge)
    pub fn add_edge_with_relation(
        &mut self,
        a: impl AsRef<str>,
        b: impl AsRef<str>,
        relation: Relation,
    ) -> GraphResult<bool> {
        self.link(a.as_ref(), b.as_ref(), Some(relation))
    }

    fn link(&mut self, a: &str, b: &str, relation: Option<Relation>) -> GraphResult<bool> {
        let a_id = self.existing_id(a)?;
        let b_id = self.existing_id(b)?;

        if a_id == b_id {
            debug!("Skipping self-loop on {} in graph '{}'", a_id, self.name);
            return Ok(false);
        }

        let key = self.edge_key(&a_id, &b_id);
        if let Some(relation) = relation {
            self.relations.insert(key, relation);
        }

        if self.has_edge(a, b) {
            return Ok(false);
        }

        match self.kind {
            GraphKind::Undirected => {
                self.slot_mut(&a_id).outgoing.insert(b_id.clone());
                self.slot_mut(&b_id).outgoing.insert(a_id);
            }
            GraphKind::Directed => {
                self.slot_mut(&a_id).outgoing.insert(b_id.clone());
                self.slot_mut(&b_id).incoming.insert(a_id);
            }
        }
        self.edge_count += 1;
        Ok(true)
    }

    fn existing_id(&self, id: &str) -> GraphResult<NodeId> {
        self.slots
            .get_key_value(id)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))
    }

    fn slot_mut(&mut self, id: &NodeId) -> &mut NodeSlot {
        // Callers resolve ids through `existing_id` first
        self.slots
            .get_mut(id.as_str())
            .unwrap_or_else(|| unreachable!("slot for {} vanished", id))
    }

    fn edge_key(&self, a: &NodeId, b: &NodeId) -> (NodeId, NodeId) {
        if self.kind == GraphKind::Undirected && b < a {
            (b.clone(), a.clone())
        } else {
            (a.clone(), b.clone())
        }
    }

    /// Remove an edge; returns true if it existed
    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        if !self.has_edge(a, b) {
            return false;
        }
        match self.kind {
            GraphKind::Undirected => {
                if let Some(slot) = self.slots.get_mut(a) {
                    slot.outgoing.shift_remove(b);
                }
                if let Some(slot) = self.slots.get_mut(b) {
                    slot.outgoing.shift_remove(a);
                }
            }
            GraphKind::Directed => {
                if let Some(slot) = self.slots.get_mut(a) {
                    slot.outgoing.shift_remove(b);
                }
                if let Some(slot) = self.slots.get_mut(b) {
                    slot.incoming.shift_remove(a);
                }
            }
        }
        let key = self.edge_key(&NodeId::from(a), &NodeId::from(b));
        self.relations.remove(&key);
        self.edge_count -= 1;
        true
    }

    /// Remove a node and all its incident edges
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let slot = self.slots.get(id)?;
        let outgoing: Vec<NodeId> = slot.outgoing.iter().cloned().collect();
        let incoming: Vec<NodeId> = slot.incoming.iter().cloned().collect();

        for other in &outgoing {
            self.remove_edge(id, other.as_str());
        }
        for other in &incoming {
            self.remove_edge(other.as_str(), id);
        }

        self.slots.shift_remove(id).map(|slot| slot.node)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Check if an edge exists (either orientation for undirected graphs)
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.slots
            .get(a)
            .is_some_and(|slot| slot.outgoing.contains(b))
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.slots.get(id).map(|slot| &slot.node)
    }

    /// Relation metadata of an edge, if it carries any
    pub fn relation(&self, a: &str, b: &str) -> Option<&Relation> {
        if !self.has_edge(a, b) {
            return None;
        }
        self.relations
            .get(&self.edge_key(&NodeId::from(a), &NodeId::from(b)))
    }

    /// Position of a node in insertion order
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.slots.get_index_of(id)
    }

    /// Node ID at an insertion position
    pub fn node_id_at(&self, index: usize) -> Option<&NodeId> {
        self.slots.get_index(index).map(|(id, _)| id)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.slots.values().map(|slot| &slot.node)
    }

    /// All node IDs, in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.slots.keys()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All edges; each undirected edge is reported once, oriented by the
    /// insertion order of its endpoints
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (idx, (id, slot)) in self.slots.iter().enumerate() {
            for other in &slot.outgoing {
                if self.kind == GraphKind::Undirected
                    && self.slots.get_index_of(other.as_str()).is_some_and(|o| o < idx)
                {
                    continue;
                }
                edges.push(Edge {
                    source: id.clone(),
                    target: other.clone(),
                    relation: self.relation(id.as_str(), other.as_str()).cloned(),
                });
            }
        }
        edges
    }

    /// Adjacent nodes (successors for directed graphs); empty for unknown nodes
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.slots
            .get(id)
            .into_iter()
            .flat_map(|slot| slot.outgoing.iter())
    }

    /// Nodes with an edge into `id` (same as `neighbors` for undirected graphs)
    pub fn predecessors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a NodeId> + 'a {
        let directed = self.is_directed();
        self.slots.get(id).into_iter().flat_map(move |slot| {
            if directed {
                slot.incoming.iter()
            } else {
                slot.outgoing.iter()
            }
        })
    }

    /// Number of incident edges
    pub fn degree(&self, id: &str) -> usize {
        self.slots
            .get(id)
            .map(|slot| slot.outgoing.len() + slot.incoming.len())
            .unwrap_or(0)
    }

    /// Nodes without any incident edge
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.outgoing.is_empty() && slot.incoming.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Remove isolated nodes, returning how many were removed
    pub fn prune_isolated_nodes_in_place(&mut self) -> usize {
        let isolated = self.isolated_nodes();
        for id in &isolated {
            self.slots.shift_remove(id.as_str());
        }
        isolated.len()
    }

    /// Sorted unique categories present in the graph
    pub fn unique_categories(&self) -> GraphResult<Vec<Category>> {
        let categories: BTreeSet<&Category> =
            self.nodes().filter_map(|n| n.nodetype.as_ref()).collect();
        if categories.is_empty() {
            return Err(GraphError::NotATypedGraph(self.name.clone()));
        }
        Ok(categories.into_iter().cloned().collect())
    }

    /// All node IDs of a category, in insertion order
    pub fn get_nodes_by_category(&self, category: &str) -> GraphResult<Vec<NodeId>> {
        let known = self.unique_categories()?;
        if !known.iter().any(|c| c.as_str() == category) {
            return Err(GraphError::MissingCategory {
                category: Category::from(category),
                graph: self.name.clone(),
            });
        }
        Ok(self
            .nodes()
            .filter(|n| n.is_of(category))
            .map(|n| n.id.clone())
            .collect())
    }

    /// Nodes of a category as a node -> category map; empty if the category is absent
    pub fn nodes_of_category(&self, category: &Category) -> NodeCategories {
        self.nodes()
            .filter(|n| n.nodetype.as_ref() == Some(category))
            .map(|n| (n.id.clone(), category.clone()))
            .collect()
    }

    /// Nodes adjacent to `id`, each with its category
    pub fn linked_nodes(&self, id: &str) -> GraphResult<NodeCategories> {
        if !self.has_node(id) {
            return Err(GraphError::NodeNotFound(NodeId::from(id)));
        }
        self.neighbors(id)
            .map(|other| {
                let category = self
                    .get_node(other.as_str())
                    .and_then(|n| n.nodetype.clone())
                    .ok_or_else(|| GraphError::NotATypedGraph(self.name.clone()))?;
                Ok((other.clone(), category))
            })
            .collect()
    }

    /// Induced subgraph over the given nodes (unknown IDs are ignored).
    ///
    /// Node order follows this graph; relations are carried over.
    pub fn subgraph<'a, I>(&self, ids: I, name: impl Into<String>) -> GraphStore
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let keep: FxHashSet<&str> = ids.into_iter().map(NodeId::as_str).collect();
        let mut sub = GraphStore::with_kind(name, self.kind);

        for (id, slot) in &self.slots {
            if keep.contains(id.as_str()) {
                sub.insert_node(slot.node.clone());
            }
        }
        for edge in self.edges() {
            if keep.contains(edge.source.as_str()) && keep.contains(edge.target.as_str()) {
                sub.copy_edge(edge);
            }
        }
        sub
    }

    /// Add a node copied from another graph (attributes included)
    pub(crate) fn copy_node(&mut self, node: &Node) {
        self.insert_node(node.clone());
    }

    /// Add an edge copied from another graph; endpoints must already be present
    pub(crate) fn copy_edge(&mut self, edge: Edge) {
        let result = match edge.relation {
            Some(relation) => self.add_edge_with_relation(&edge.source, &edge.target, relation),
            None => self.add_edge(&edge.source, &edge.target),
        };
        if let Err(err) = result {
            debug!("Dropping edge {} - {}: {}", edge.source, edge.target, err);
        }
    }

    /// Directed copy: every undirected edge in both directions
    pub fn to_directed(&self) -> GraphStore {
        if self.is_directed() {
            return self.clone();
        }
        let mut directed = GraphStore::new_directed(self.name.clone());
        for node in self.nodes() {
            directed.copy_node(node);
        }
        for edge in self.edges() {
            let mut reverse = edge.clone();
            std::mem::swap(&mut reverse.source, &mut reverse.target);
            directed.copy_edge(edge);
            directed.copy_edge(reverse);
        }
        directed
    }

    /// Undirected copy; antiparallel directed edges collapse into one
    pub fn to_undirected(&self) -> GraphStore {
        if !self.is_directed() {
            return self.clone();
        }
        let mut undirected = GraphStore::new(self.name.clone());
        for node in self.nodes() {
            undirected.copy_node(node);
        }
        for edge in self.edges() {
            undirected.copy_edge(edge);
        }
        undirected
    }

    /// Replace nodes and edges with those of `other`, keeping this graph's name
    pub fn replace_contents(&mut self, other: GraphStore) {
        let name = std::mem::take(&mut self.name);
        *self = other;
        self.name = name;
    }

    /// Clear all nodes and edges (the name is kept)
    pub fn clear(&mut self) {
        self.slots.clear();
        self.relations.clear();
        self.edge_count = 0;
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new("")
    }
}
