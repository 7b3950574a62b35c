//! Structural predicates needed before colouring faces.

use std::collections::VecDeque;

use gcol_core::ColorableGraph;

/// Returns whether every node is reachable from node 0. Empty graphs count as
/// connected.
pub fn is_connected(graph: &dyn ColorableGraph) -> bool {
    let n = graph.node_count();
    if n == 0 {
        return true;
    }
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([0usize]);
    seen[0] = true;
    let mut reached = 1;
    while let Some(u) = queue.pop_front() {
        for &v in graph.neighbors(u) {
            if !seen[v] {
                seen[v] = true;
                reached += 1;
                queue.push_back(v);
            }
        }
    }
    reached == n
}

/// Returns every bridge as `(min, max)` index pairs.
///
/// Iterative Tarjan low-link search, so deep paths do not exhaust the call
/// stack.
pub fn bridges(graph: &dyn ColorableGraph) -> Vec<(usize, usize)> {
    let n = graph.node_count();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut time = 0usize;
    let mut found = Vec::new();
    // (node, parent, next neighbour slot)
    let mut stack: Vec<(usize, usize, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        stack.push((root, usize::MAX, 0));

        while let Some(&(u, parent, slot)) = stack.last() {
            if let Some(&v) = graph.neighbors(u).get(slot) {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                if v == parent {
                    continue;
                }
                if disc[v] == usize::MAX {
                    disc[v] = time;
                    low[v] = time;
                    time += 1;
                    stack.push((v, u, 0));
                } else {
                    low[u] = low[u].min(disc[v]);
                }
            } else {
                stack.pop();
                if parent != usize::MAX {
                    low[parent] = low[parent].min(low[u]);
                    if low[u] > disc[parent] {
                        found.push((parent.min(u), parent.max(u)));
                    }
                }
            }
        }
    }
    found.sort_unstable();
    found
}

/// Returns whether the graph has at least one bridge.
pub fn has_bridges(graph: &dyn ColorableGraph) -> bool {
    !bridges(graph).is_empty()
}

/// Euler bound `m <= 3n - 6`, necessary for planarity when `n >= 3`.
pub fn within_planar_edge_bound(graph: &dyn ColorableGraph) -> bool {
    let n = graph.node_count();
    n < 3 || graph.edge_count() <= 3 * n - 6
}
