//! Connected components
//!
//! Weakly connected components via union-find. Component order is
//! deterministic: descending size, ties broken by the dense index of the
//! component's first node.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Result of the WCC algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WccResult {
    /// Components, largest first; nodes inside a component keep index order
    pub components: Vec<Vec<NodeId>>,
    /// Map of NodeId -> position in `components`
    pub node_component: HashMap<NodeId, usize>,
}

impl WccResult {
    /// The largest component, if the graph has any node
    pub fn largest(&self) -> Option<&[NodeId]> {
        self.components.first().map(Vec::as_slice)
    }
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction.
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for u_idx in 0..n {
        for &v_idx in view.successors(u_idx) {
            uf.union(u_idx, v_idx);
        }
    }

    // Group by root in discovery order
    let mut root_slot: HashMap<usize, usize> = HashMap::new();
    let mut grouped: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        let root = uf.find(i);
        let slot = *root_slot.entry(root).or_insert_with(|| {
            grouped.push(Vec::new());
            grouped.len() - 1
        });
        grouped[slot].push(i);
    }

    // Stable: equal sizes keep discovery order
    grouped.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut node_component = HashMap::with_capacity(n);
    let components = grouped
        .into_iter()
        .enumerate()
        .map(|(cid, members)| {
            members
                .into_iter()
                .map(|idx| {
                    let node_id = view.index_to_node[idx];
                    node_component.insert(node_id, cid);
                    node_id
                })
                .collect()
        })
        .collect();

    WccResult {
        components,
        node_component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashSet;

    #[test]
    fn test_wcc() {
        // Nodes: 1, 2, 3, 4, 5, 6
        // Edges: 1->2, 3->4->5, 6 (isolated)
        let index_to_node = vec![1, 2, 3, 4, 5, 6];
        let mut outgoing = vec![vec![]; 6];
        outgoing[0].push(1);
        outgoing[2].push(3);
        outgoing[3].push(4);

        let view = GraphView::from_adjacency_list(index_to_node, outgoing, true);
        let result = weakly_connected_components(&view);

        assert_eq!(result.components.len(), 3);
        assert_eq!(result.components[0], vec![3, 4, 5]);
        assert_eq!(result.components[1], vec![1, 2]);
        assert_eq!(result.components[2], vec![6]);

        let c1 = result.node_component[&1];
        let c2 = result.node_component[&2];
        assert_eq!(c1, c2);
        assert_ne!(c1, result.node_component[&4]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        // {0,1} and {2,3} have equal size, {4} last
        let view = GraphView::undirected_from_edges(5, &[(2, 3), (0, 1)]);
        let result = weakly_connected_components(&view);

        assert_eq!(result.components, vec![vec![0, 1], vec![2, 3], vec![4]]);
        assert_eq!(result.largest(), Some(&[0, 1][..]));
    }

    #[test]
    fn test_random_graphs_are_partitioned() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let n = rng.gen_range(1..60);
            let edges: Vec<(usize, usize)> = (0..rng.gen_range(0..80))
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
                .filter(|(u, v)| u != v)
                .collect();
            let view = GraphView::undirected_from_edges(n, &edges);
            let result = weakly_connected_components(&view);

            let mut seen = HashSet::new();
            for component in &result.components {
                for node in component {
                    assert!(seen.insert(*node), "node {} in two components", node);
                }
            }
            assert_eq!(seen.len(), n);

            for pair in result.components.windows(2) {
                assert!(pair[0].len() >= pair[1].len());
            }
            for &(u, v) in &edges {
                assert_eq!(
                    result.node_component[&(u as NodeId)],
                    result.node_component[&(v as NodeId)]
                );
            }
        }
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::undirected_from_edges(0, &[]);
        let result = weakly_connected_components(&view);
        assert!(result.components.is_empty());
        assert!(result.largest().is_none());
    }
}
