//! Clique enumeration
//!
//! Enumerates *every* clique (not only maximal ones), including single nodes
//! and single edges. The number of cliques grows exponentially with density,
//! so callers can cap the enumeration.

use super::common::GraphView;

/// Outcome of a (possibly capped) clique enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CliqueCount {
    /// Cliques counted
    pub count: usize,
    /// Size of the largest clique seen
    pub max_size: usize,
    /// True when `limit` stopped the enumeration early
    pub truncated: bool,
}

/// Count all cliques of the graph, treating edges as undirected.
///
/// Each clique is generated exactly once, as the sequence of its members in
/// increasing index order. Stops after `limit` cliques when one is given.
pub fn count_all_cliques(view: &GraphView, limit: Option<usize>) -> CliqueCount {
    let adjacency: Vec<Vec<usize>> = (0..view.node_count)
        .map(|u| view.undirected_neighbors(u))
        .collect();

    let mut state = CliqueCount {
        count: 0,
        max_size: 0,
        truncated: false,
    };

    // Stack of (clique size, candidates that extend it)
    let mut stack: Vec<(usize, Vec<usize>)> = vec![(0, (0..view.node_count).collect())];

    while let Some((size, candidates)) = stack.pop() {
        for (i, &v) in candidates.iter().enumerate() {
            if limit.is_some_and(|max| state.count >= max) {
                state.truncated = true;
                return state;
            }
            state.count += 1;
            state.max_size = state.max_size.max(size + 1);

            // Candidates after v that are also adjacent to v (both sorted)
            let extension = sorted_intersection(&candidates[i + 1..], &adjacency[v]);
            if !extension.is_empty() {
                stack.push((size + 1, extension));
            }
        }
    }

    state
}

fn sorted_intersection(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
