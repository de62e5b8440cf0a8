//! Pathfinding and distance algorithms
//!
//! Unweighted BFS shortest paths, forward reachability, and
//! eccentricity-based radius/diameter.

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Follows successors, which for undirected views means all neighbors.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut queue = VecDeque::new();
    let mut visited = HashMap::new(); // index -> parent_index

    queue.push_back(source_idx);
    visited.insert(source_idx, None);

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            // Reconstruct path
            let mut path = Vec::new();
            let mut curr = Some(target_idx);
            while let Some(idx) = curr {
                path.push(view.index_to_node[idx]);
                curr = visited.get(&idx).copied().flatten();
            }
            path.reverse();
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if !visited.contains_key(&next_idx) {
                visited.insert(next_idx, Some(current_idx));
                queue.push_back(next_idx);
            }
        }
    }

    None
}

/// Hop distances from `source_idx` to every index, ignoring direction.
///
/// Unreachable nodes are `None`.
pub fn bfs_distances(view: &GraphView, source_idx: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    let mut queue = VecDeque::new();
    dist[source_idx] = Some(0);
    queue.push_back(source_idx);

    while let Some(u) = queue.pop_front() {
        let d = dist[u].unwrap_or(0);
        for v in view.undirected_neighbors(u) {
            if dist[v].is_none() {
                dist[v] = Some(d + 1);
                queue.push_back(v);
            }
        }
    }

    dist
}

/// Every index reachable from any of `seeds` by following successors.
///
/// Seeds are included. The returned flags are indexed densely.
pub fn reachable_from(view: &GraphView, seeds: &[usize]) -> Vec<bool> {
    let mut visited = vec![false; view.node_count];
    let mut queue = VecDeque::new();

    for &seed in seeds {
        if seed < view.node_count && !visited[seed] {
            visited[seed] = true;
            queue.push_back(seed);
        }
    }

    while let Some(u) = queue.pop_front() {
        for &v in view.successors(u) {
            if !visited[v] {
                visited[v] = true;
                queue.push_back(v);
            }
        }
    }

    visited
}

/// Eccentricity of every node, treating edges as undirected.
///
/// Returns `None` if the view is empty or not connected, where eccentricity
/// is infinite.
pub fn eccentricities(view: &GraphView) -> Option<Vec<usize>> {
    if view.node_count == 0 {
        return None;
    }

    (0..view.node_count)
        .into_par_iter()
        .map(|idx| {
            bfs_distances(view, idx)
                .into_iter()
                .try_fold(0usize, |acc, d| d.map(|d| acc.max(d)))
        })
        .collect()
}

/// Radius and diameter as `(radius, diameter)`; `None` when disconnected or empty.
pub fn radius_and_diameter(view: &GraphView) -> Option<(usize, usize)> {
    let ecc = eccentricities(view)?;
    let radius = *ecc.iter().min()?;
    let diameter = *ecc.iter().max()?;
    Some((radius, diameter))
}
