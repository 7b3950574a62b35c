//! PartialCol: tabu search over partial proper colourings.

use gcol_core::rng::RngHandle;
use gcol_core::{Color, ColorableGraph, UNCOLORED};

use crate::adjacency::Adjacency;
use crate::config::TabuConfig;
use crate::local::{tenure, LocalOutcome, MovePicker};

/// Minimises the number of uncoloured nodes with `k` colours.
///
/// The working state is always a proper partial colouring. A move inserts an
/// uncoloured node into a colour class and uncolours its neighbours in that
/// class; the evicted nodes may not return to that class while tabu. Stops
/// when every node is coloured or after `max_iterations` moves.
pub fn partialcol(
    adj: &Adjacency,
    k: usize,
    start: &[Color],
    max_iterations: u64,
    tabu: &TabuConfig,
    rng: &mut RngHandle,
) -> LocalOutcome {
    let mut state = PartialState::new(adj, k);
    for (u, &c) in start.iter().enumerate() {
        if c < k && state.gamma(u, c) == 0 {
            state.place(u, c);
        }
    }
    if k == 0 {
        return LocalOutcome {
            colors: state.colors,
            cost: adj.len(),
            iterations: 0,
        };
    }

    let mut tabu_until = vec![0u64; adj.len() * k];
    let mut best_colors = state.colors.clone();
    let mut best_cost = state.uncolored.len();
    let mut iterations = 0;

    while !state.uncolored.is_empty() && iterations < max_iterations {
        let cost = state.uncolored.len() as i64;
        let mut picker = MovePicker::new();
        for &u in &state.uncolored {
            for c in 0..k {
                let delta = state.gamma(u, c) as i64 - 1;
                let aspires = cost + delta < best_cost as i64;
                if tabu_until[u * k + c] <= iterations || aspires {
                    picker.offer(delta, (u, c), rng);
                }
            }
        }
        let (u, c) = match picker.take() {
            Some((_, found)) => found,
            None => {
                let u = state.uncolored[rng.index(state.uncolored.len())];
                (u, rng.index(k))
            }
        };

        let evicted: Vec<usize> = adj
            .neighbors(u)
            .iter()
            .copied()
            .filter(|&v| state.colors[v] == c)
            .collect();
        for &v in &evicted {
            state.unplace(v);
        }
        state.place(u, c);
        iterations += 1;
        let until = iterations + tenure(tabu, state.uncolored.len(), rng);
        for &v in &evicted {
            tabu_until[v * k + c] = until;
        }

        if state.uncolored.len() < best_cost {
            best_cost = state.uncolored.len();
            best_colors.clone_from(&state.colors);
        }
    }

    LocalOutcome {
        colors: best_colors,
        cost: best_cost,
        iterations,
    }
}

/// Proper partial colouring with O(1) insertion into and removal from the
/// uncoloured set.
struct PartialState<'a> {
    adj: &'a Adjacency,
    k: usize,
    colors: Vec<Color>,
    gamma: Vec<u32>,
    uncolored: Vec<usize>,
    slot: Vec<usize>,
}

impl<'a> PartialState<'a> {
    fn new(adj: &'a Adjacency, k: usize) -> Self {
        let n = adj.len();
        Self {
            adj,
            k,
            colors: vec![UNCOLORED; n],
            gamma: vec![0; n * k],
            uncolored: (0..n).collect(),
            slot: (0..n).collect(),
        }
    }

    fn gamma(&self, node: usize, color: Color) -> u32 {
        self.gamma[node * self.k + color]
    }

    fn place(&mut self, node: usize, color: Color) {
        let at = self.slot[node];
        self.uncolored.swap_remove(at);
        if let Some(&moved) = self.uncolored.get(at) {
            self.slot[moved] = at;
        }
        self.colors[node] = color;
        for &v in self.adj.neighbors(node) {
            self.gamma[v * self.k + color] += 1;
        }
    }

    fn unplace(&mut self, node: usize) {
        let color = self.colors[node];
        self.colors[node] = UNCOLORED;
        self.slot[node] = self.uncolored.len();
        self.uncolored.push(node);
        for &v in self.adj.neighbors(node) {
            self.gamma[v * self.k + color] -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_an_empty_start() {
        let mut adj = Adjacency::new(6);
        for i in 0..6 {
            adj.insert_edge(i, (i + 1) % 6);
            adj.insert_edge(i, (i + 3) % 6);
        }
        let mut rng = RngHandle::from_seed(9);
        let outcome = partialcol(&adj, 2, &[UNCOLORED; 6], 1_000, &TabuConfig::default(), &mut rng);
        assert!(outcome.is_feasible());
        assert!(adj.is_proper(&outcome.colors));
    }

    #[test]
    fn conflicting_start_is_made_partial() {
        let mut adj = Adjacency::new(3);
        for (u, v) in [(0, 1), (1, 2), (2, 0)] {
            adj.insert_edge(u, v);
        }
        let mut rng = RngHandle::from_seed(2);
        let outcome = partialcol(&adj, 2, &[0, 0, 1], 50, &TabuConfig::default(), &mut rng);
        assert_eq!(outcome.cost, 1);
        assert_eq!(gcol_core::count_conflicts(&adj, &outcome.colors), 0);
    }
}
