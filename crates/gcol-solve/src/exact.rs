//! Branch and bound over DSatur branching.
//!
//! The search keeps one working colouring plus an explicit stack of frames;
//! each frame records the node it coloured, the next colour to try, and the
//! number of colours in use before the node was coloured. Backtracking pops
//! frames and undoes their assignment, so memory stays linear in the number
//! of nodes however deep the tree gets.

use gcol_core::{colors_used, Color, ColorableGraph, UNCOLORED};
use tracing::debug;

use crate::adjacency::Adjacency;

/// Result of a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactOutcome {
    /// Best colouring found, if any.
    pub colors: Option<Vec<Color>>,
    /// Whether the result is proven: the tree was exhausted or the lower
    /// bound was met. `false` when the node budget ran out first.
    pub exhaustive: bool,
    /// Colour assignments made.
    pub explored: u64,
}

/// Improves `initial` towards a minimum colouring.
///
/// `clique` must be a clique of the graph; its size is the lower bound and
/// its members are fixed to colours `0..clique.len()`.
pub fn minimise(
    adj: &Adjacency,
    initial: Vec<Color>,
    clique: &[usize],
    node_limit: Option<u64>,
) -> ExactOutcome {
    let upper = colors_used(&initial);
    if upper <= clique.len() {
        return ExactOutcome {
            colors: Some(initial),
            exhaustive: true,
            explored: 0,
        };
    }
    let outcome = branch_and_bound(adj, clique, upper, clique.len(), node_limit);
    ExactOutcome {
        colors: outcome.colors.or(Some(initial)),
        ..outcome
    }
}

/// Searches for a colouring with at most `k` colours.
pub fn k_feasible(
    adj: &Adjacency,
    k: usize,
    clique: &[usize],
    node_limit: Option<u64>,
) -> ExactOutcome {
    if adj.is_empty() {
        return ExactOutcome {
            colors: Some(Vec::new()),
            exhaustive: true,
            explored: 0,
        };
    }
    branch_and_bound(adj, clique, k + 1, k, node_limit)
}

/// Searches for colourings with fewer than `bound` colours, tightening the
/// bound on every solution and stopping once a solution uses at most
/// `stop_at` colours.
fn branch_and_bound(
    adj: &Adjacency,
    clique: &[usize],
    bound: usize,
    stop_at: usize,
    node_limit: Option<u64>,
) -> ExactOutcome {
    let n = adj.len();
    if n == 0 {
        return ExactOutcome {
            colors: Some(Vec::new()),
            exhaustive: true,
            explored: 0,
        };
    }
    if clique.len() >= bound {
        return ExactOutcome {
            colors: None,
            exhaustive: true,
            explored: 0,
        };
    }

    let mut state = SearchState::new(adj, bound);
    for (color, &node) in clique.iter().enumerate() {
        state.assign(node, color);
    }

    let mut bound = bound;
    let mut best = None;
    let mut stack: Vec<Frame> = Vec::new();
    let mut used = clique.len();
    let mut explored = 0u64;
    let mut descend = true;
    let mut exhaustive = true;

    loop {
        // Ancestors may still hold a colour at or above a freshly tightened
        // bound; such a prefix cannot lead to an improvement.
        if descend && used < bound {
            match state.select() {
                Some(node) => stack.push(Frame {
                    node,
                    next: 0,
                    used_before: used,
                }),
                None => {
                    bound = used;
                    best = Some(state.colors.clone());
                    debug!(colors = used, explored, "exact search improved");
                    if used <= stop_at {
                        break;
                    }
                }
            }
        }

        let Some(&Frame {
            node,
            next,
            used_before,
        }) = stack.last()
        else {
            break;
        };
        if state.colors[node] != UNCOLORED {
            state.unassign(node);
        }
        used = used_before;

        // A fresh colour is allowed only while it keeps us below the bound.
        let limit = (used_before + 1).min(bound - 1);
        match (next..limit).find(|&c| state.is_free(node, c)) {
            Some(color) => {
                if node_limit.is_some_and(|limit| explored >= limit) {
                    exhaustive = false;
                    break;
                }
                explored += 1;
                if let Some(top) = stack.last_mut() {
                    top.next = color + 1;
                }
                state.assign(node, color);
                used = used.max(color + 1);
                descend = true;
            }
            None => {
                stack.pop();
                descend = false;
            }
        }
    }

    debug!(explored, exhaustive, found = best.is_some(), "exact search finished");
    ExactOutcome {
        colors: best,
        exhaustive,
        explored,
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next: Color,
    used_before: usize,
}

/// Working colouring with incrementally maintained saturation degrees.
struct SearchState<'a> {
    adj: &'a Adjacency,
    palette: usize,
    colors: Vec<Color>,
    /// `counts[u * palette + c]`: neighbours of `u` coloured `c`.
    counts: Vec<u32>,
    saturation: Vec<usize>,
    uncolored_degree: Vec<usize>,
}

impl<'a> SearchState<'a> {
    fn new(adj: &'a Adjacency, palette: usize) -> Self {
        let n = adj.len();
        Self {
            adj,
            palette,
            colors: vec![UNCOLORED; n],
            counts: vec![0; n * palette],
            saturation: vec![0; n],
            uncolored_degree: (0..n).map(|u| adj.degree(u)).collect(),
        }
    }

    fn is_free(&self, node: usize, color: Color) -> bool {
        self.counts[node * self.palette + color] == 0
    }

    fn assign(&mut self, node: usize, color: Color) {
        self.colors[node] = color;
        for &v in self.adj.neighbors(node) {
            let slot = &mut self.counts[v * self.palette + color];
            if *slot == 0 {
                self.saturation[v] += 1;
            }
            *slot += 1;
            self.uncolored_degree[v] -= 1;
        }
    }

    fn unassign(&mut self, node: usize) {
        let color = self.colors[node];
        self.colors[node] = UNCOLORED;
        for &v in self.adj.neighbors(node) {
            let slot = &mut self.counts[v * self.palette + color];
            *slot -= 1;
            if *slot == 0 {
                self.saturation[v] -= 1;
            }
            self.uncolored_degree[v] += 1;
        }
    }

    /// Uncoloured node with maximum saturation, then maximum uncoloured
    /// degree, then minimum index.
    fn select(&self) -> Option<usize> {
        let mut best: Option<(usize, usize, usize)> = None;
        for u in 0..self.colors.len() {
            if self.colors[u] != UNCOLORED {
                continue;
            }
            let key = (self.saturation[u], self.uncolored_degree[u]);
            if best.map_or(true, |(sat, deg, _)| key > (sat, deg)) {
                best = Some((key.0, key.1, u));
            }
        }
        best.map(|(_, _, u)| u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clique::greedy_clique;
    use crate::construct::welsh_powell;

    fn crown(n: usize) -> Adjacency {
        // Crown graph: bipartite, but greedy in index order is poor.
        let mut adj = Adjacency::new(2 * n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    adj.insert_edge(2 * i, 2 * j + 1);
                }
            }
        }
        adj
    }

    #[test]
    fn minimise_reaches_two_on_crown_graph() {
        let adj = crown(5);
        let clique = greedy_clique(&adj);
        let initial = crate::construct::greedy(&adj, &(0..10).collect::<Vec<_>>());
        assert!(colors_used(&initial) > 2);
        let outcome = minimise(&adj, initial, &clique, None);
        assert!(outcome.exhaustive);
        let colors = outcome.colors.unwrap();
        assert_eq!(colors_used(&colors), 2);
        assert!(adj.is_proper(&colors));
    }

    #[test]
    fn k_feasible_proves_odd_cycle_needs_three() {
        let mut adj = Adjacency::new(7);
        for i in 0..7 {
            adj.insert_edge(i, (i + 1) % 7);
        }
        let clique = greedy_clique(&adj);
        let two = k_feasible(&adj, 2, &clique, None);
        assert!(two.colors.is_none());
        assert!(two.exhaustive);
        let three = k_feasible(&adj, 3, &clique, None);
        assert!(adj.is_proper(three.colors.as_ref().unwrap()));
        assert!(colors_used(three.colors.as_ref().unwrap()) <= 3);
    }

    #[test]
    fn node_limit_marks_result_non_exhaustive() {
        let adj = crown(6);
        let clique = greedy_clique(&adj);
        let initial = welsh_powell(&adj);
        let outcome = k_feasible(&adj, 1, &clique, Some(0));
        assert!(outcome.colors.is_none());
        assert!(outcome.exhaustive, "clique already rules out one colour");
        let bounded = minimise(&adj, initial.clone(), &[], Some(1));
        assert!(!bounded.exhaustive);
        assert_eq!(bounded.explored, 1);
        assert_eq!(bounded.colors, Some(initial));
    }
}
