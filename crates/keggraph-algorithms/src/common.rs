//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
///
/// Callers map their own identifiers onto these; the adapter in the main crate
/// uses the node's insertion position in its store.
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Undirected graphs are stored with every edge in both directions, so
/// `successors` and `predecessors` coincide.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Whether edges carry a direction
    pub directed: bool,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Neighbors ignoring direction, deduplicated and sorted by index
    pub fn undirected_neighbors(&self, idx: usize) -> Vec<usize> {
        if !self.directed {
            let mut out = self.successors(idx).to_vec();
            out.sort_unstable();
            return out;
        }
        let mut all: Vec<usize> = self
            .successors(idx)
            .iter()
            .chain(self.predecessors(idx).iter())
            .copied()
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    /// Number of edges (each undirected edge counted once)
    pub fn edge_count(&self) -> usize {
        if self.directed {
            self.out_targets.len()
        } else {
            self.out_targets.len() / 2
        }
    }

    /// Build a view from adjacency lists.
    ///
    /// `outgoing[i]` lists the targets of node `i`. For undirected views every
    /// edge must already appear in both lists; incoming lists are derived.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<usize>>,
        directed: bool,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (src, targets) in outgoing.iter().enumerate() {
            for &dst in targets {
                incoming[dst].push(src);
            }
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            directed,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Build an undirected view from an edge list over dense indices `0..node_count`.
    pub fn undirected_from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut outgoing = vec![Vec::new(); node_count];
        for &(u, v) in edges {
            outgoing[u].push(v);
            outgoing[v].push(u);
        }
        Self::from_adjacency_list((0..node_count as NodeId).collect(), outgoing, false)
    }
}
