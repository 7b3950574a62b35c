use std::cmp::Reverse;

use gcol_core::ColorableGraph;

use crate::adjacency::Adjacency;

/// Large clique found greedily; its size is a lower bound on the chromatic
/// number.
///
/// Every node seeds one candidate clique, grown by scanning its neighbours in
/// descending degree order. The largest clique wins; ties keep the first
/// seed in descending degree order.
pub fn greedy_clique(adj: &Adjacency) -> Vec<usize> {
    let mut by_degree: Vec<usize> = (0..adj.len()).collect();
    by_degree.sort_by_key(|&u| Reverse(adj.degree(u)));

    let mut best: Vec<usize> = Vec::new();
    for &seed in &by_degree {
        if adj.degree(seed) < best.len() {
            // Sorted by degree: no later seed can beat the incumbent.
            break;
        }
        let mut candidates = adj.neighbors(seed).to_vec();
        candidates.sort_by_key(|&v| Reverse(adj.degree(v)));
        let mut clique = vec![seed];
        for v in candidates {
            if clique.iter().all(|&member| adj.adjacent(member, v)) {
                clique.push(v);
            }
        }
        if clique.len() > best.len() {
            best = clique;
        }
    }
    best.sort_unstable();
    best
}
