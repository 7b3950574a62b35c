//! Construction heuristics. Each returns a proper colouring using colours
//! `0..k` for some `k`.

use std::cmp::Reverse;
use std::collections::HashSet;

use gcol_core::rng::RngHandle;
use gcol_core::{Color, ColorableGraph, UNCOLORED};
use rand::seq::SliceRandom;

use crate::adjacency::Adjacency;
use crate::config::Strategy;

/// Runs the heuristic selected by `strategy`.
pub fn construct(adj: &Adjacency, strategy: Strategy, rng: &mut RngHandle) -> Vec<Color> {
    match strategy {
        Strategy::Random => random_order(adj, rng),
        Strategy::WelshPowell => welsh_powell(adj),
        Strategy::Dsatur => dsatur(adj),
        Strategy::Rlf => rlf(adj),
    }
}

/// Visits nodes in `order`, giving each the smallest colour unused by its
/// already coloured neighbours.
pub fn greedy(adj: &Adjacency, order: &[usize]) -> Vec<Color> {
    let n = adj.len();
    let mut colors = vec![UNCOLORED; n];
    let mut stamp = vec![usize::MAX; n + 1];
    for (step, &u) in order.iter().enumerate() {
        for &v in adj.neighbors(u) {
            let c = colors[v];
            if c != UNCOLORED {
                stamp[c] = step;
            }
        }
        let mut c = 0;
        while stamp[c] == step {
            c += 1;
        }
        colors[u] = c;
    }
    colors
}

/// Greedy over a uniformly shuffled order.
pub fn random_order(adj: &Adjacency, rng: &mut RngHandle) -> Vec<Color> {
    let mut order: Vec<usize> = (0..adj.len()).collect();
    order.shuffle(rng);
    greedy(adj, &order)
}

/// Greedy by descending degree; equal degrees keep index order.
pub fn welsh_powell(adj: &Adjacency) -> Vec<Color> {
    let mut order: Vec<usize> = (0..adj.len()).collect();
    order.sort_by_key(|&u| Reverse(adj.degree(u)));
    greedy(adj, &order)
}

/// DSatur: repeatedly colour the node with the most distinct neighbour
/// colours, breaking ties by the most uncoloured neighbours and then by the
/// smallest index.
pub fn dsatur(adj: &Adjacency) -> Vec<Color> {
    let n = adj.len();
    let mut colors = vec![UNCOLORED; n];
    let mut neighbor_colors: Vec<HashSet<Color>> = vec![HashSet::new(); n];
    let mut uncolored_degree: Vec<usize> = (0..n).map(|u| adj.degree(u)).collect();

    for _ in 0..n {
        let mut best: Option<(usize, usize, usize)> = None;
        for u in 0..n {
            if colors[u] != UNCOLORED {
                continue;
            }
            let key = (neighbor_colors[u].len(), uncolored_degree[u]);
            if best.map_or(true, |(sat, deg, _)| key > (sat, deg)) {
                best = Some((key.0, key.1, u));
            }
        }
        let Some((_, _, u)) = best else {
            break;
        };

        let mut color = 0;
        while neighbor_colors[u].contains(&color) {
            color += 1;
        }
        colors[u] = color;

        for &v in adj.neighbors(u) {
            if colors[v] == UNCOLORED {
                neighbor_colors[v].insert(color);
                uncolored_degree[v] -= 1;
            }
        }
    }
    colors
}

/// Recursive largest first.
///
/// Each class starts from the candidate with most candidate neighbours, then
/// repeatedly adds the candidate with most neighbours among the nodes already
/// excluded from the class (fewest candidate neighbours on ties).
pub fn rlf(adj: &Adjacency) -> Vec<Color> {
    let n = adj.len();
    let mut colors = vec![UNCOLORED; n];
    let mut remaining = n;
    let mut class = 0;
    let mut in_x = vec![false; n];
    let mut nbr_x = vec![0usize; n];
    let mut nbr_y = vec![0usize; n];

    while remaining > 0 {
        for u in 0..n {
            in_x[u] = colors[u] == UNCOLORED;
            nbr_y[u] = 0;
        }
        for u in 0..n {
            nbr_x[u] = adj.neighbors(u).iter().filter(|&&v| in_x[v]).count();
        }

        let mut next = (0..n)
            .filter(|&u| in_x[u])
            .max_by_key(|&u| (nbr_x[u], Reverse(u)));
        while let Some(v) = next {
            colors[v] = class;
            in_x[v] = false;
            remaining -= 1;
            for &w in adj.neighbors(v) {
                if !in_x[w] {
                    continue;
                }
                in_x[w] = false;
                for &z in adj.neighbors(w) {
                    if in_x[z] {
                        nbr_y[z] += 1;
                        nbr_x[z] -= 1;
                    }
                }
            }
            next = (0..n)
                .filter(|&u| in_x[u])
                .max_by_key(|&u| (nbr_y[u], Reverse(nbr_x[u]), Reverse(u)));
        }
        class += 1;
    }
    colors
}
