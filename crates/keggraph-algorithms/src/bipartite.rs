//! Bipartite checks and projection

use super::common::GraphView;
use std::collections::VecDeque;

/// Two-colouring test, ignoring edge direction.
///
/// Every component is coloured independently; isolated nodes are trivially fine.
pub fn is_bipartite(view: &GraphView) -> bool {
    let mut colour: Vec<Option<bool>> = vec![None; view.node_count];
    let mut queue = VecDeque::new();

    for start in 0..view.node_count {
        if colour[start].is_some() {
            continue;
        }
        colour[start] = Some(false);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            let side = colour[u].unwrap_or(false);
            for v in view.undirected_neighbors(u) {
                match colour[v] {
                    None => {
                        colour[v] = Some(!side);
                        queue.push_back(v);
                    }
                    Some(c) if c == side => return false,
                    Some(_) => {}
                }
            }
        }
    }

    true
}

/// Pairs of `members` that share at least one common successor.
///
/// For undirected views each unordered pair is reported once, with the member
/// listed first in `members` on the left. For directed views `(u, w)` means
/// `w` is a successor of one of `u`'s successors. Indices are dense.
pub fn projected_pairs(view: &GraphView, members: &[usize]) -> Vec<(usize, usize)> {
    // Position of each member in `members`, None for non-members
    let mut position: Vec<Option<usize>> = vec![None; view.node_count];
    for (pos, &m) in members.iter().enumerate() {
        if m < view.node_count && position[m].is_none() {
            position[m] = Some(pos);
        }
    }

    let mut pairs = Vec::new();
    let mut marked = vec![false; view.node_count];

    for (pos, &u) in members.iter().enumerate() {
        if position.get(u).copied().flatten() != Some(pos) {
            continue; // duplicate or out of range
        }

        let mut touched = Vec::new();
        for &nbr in view.successors(u) {
            for &w in view.successors(nbr) {
                if w == u || marked[w] {
                    continue;
                }
                let Some(w_pos) = position[w] else { continue };
                if !view.directed && w_pos < pos {
                    continue; // reported from w's side already
                }
                marked[w] = true;
                touched.push(w);
                pairs.push((u, w));
            }
        }
        for w in touched {
            marked[w] = false;
        }
    }

    pairs
}
