use gcol_core::{Color, ColorableGraph};
use tracing::debug;

use crate::adjacency::Adjacency;

const IMPROVEMENT: f64 = 1e-9;

/// Balances the class weights of the proper `k`-colouring `colors` in place.
///
/// Steepest descent on the sum of squared class weights. A move either
/// relocates one node to a class holding none of its neighbours or swaps two
/// nodes of different classes when neither has another neighbour in the
/// other's class. Every move keeps the colouring proper, so the conflict
/// count never rises. Returns the number of moves applied.
pub fn balance(adj: &Adjacency, colors: &mut [Color], k: usize, verbosity: u8) -> usize {
    let n = adj.len();
    if k < 2 || n == 0 {
        return 0;
    }
    let mut gamma = vec![0u32; n * k];
    let mut class_weight = vec![0.0f64; k];
    for u in 0..n {
        class_weight[colors[u]] += adj.weight(u);
        for &v in adj.neighbors(u) {
            gamma[u * k + colors[v]] += 1;
        }
    }

    let mut moves = 0;
    loop {
        let mut best: Option<(f64, Move)> = None;
        let mut consider = |delta: f64, mv: Move| {
            if delta < -IMPROVEMENT && best.as_ref().map_or(true, |(d, _)| delta < *d) {
                best = Some((delta, mv));
            }
        };

        for u in 0..n {
            let from = colors[u];
            let w = adj.weight(u);
            for to in (0..k).filter(|&to| to != from && gamma[u * k + to] == 0) {
                let delta = 2.0 * w * (class_weight[to] - class_weight[from] + w);
                consider(delta, Move::Relocate { node: u, to });
            }
        }

        for u in 0..n {
            let wu = adj.weight(u);
            for v in u + 1..n {
                let (a, b) = (colors[u], colors[v]);
                let wv = adj.weight(v);
                if a == b || (wu - wv).abs() < IMPROVEMENT {
                    continue;
                }
                let linked = u32::from(adj.adjacent(u, v));
                if gamma[u * k + b] != linked || gamma[v * k + a] != linked {
                    continue;
                }
                let (wa, wb) = (class_weight[a], class_weight[b]);
                let after_a = wa - wu + wv;
                let after_b = wb - wv + wu;
                let delta = after_a * after_a + after_b * after_b - wa * wa - wb * wb;
                consider(delta, Move::Swap { first: u, second: v });
            }
        }

        let Some((_, mv)) = best else {
            break;
        };
        match mv {
            Move::Relocate { node, to } => {
                recolor(adj, colors, &mut gamma, &mut class_weight, k, node, to);
            }
            Move::Swap { first, second } => {
                let (a, b) = (colors[first], colors[second]);
                recolor(adj, colors, &mut gamma, &mut class_weight, k, first, b);
                recolor(adj, colors, &mut gamma, &mut class_weight, k, second, a);
            }
        }
        moves += 1;
    }
    if verbosity >= 2 {
        debug!(moves, "equitable balancing finished");
    }
    moves
}

#[derive(Debug, Clone, Copy)]
enum Move {
    Relocate { node: usize, to: Color },
    Swap { first: usize, second: usize },
}

fn recolor(
    adj: &Adjacency,
    colors: &mut [Color],
    gamma: &mut [u32],
    class_weight: &mut [f64],
    k: usize,
    node: usize,
    to: Color,
) {
    let from = colors[node];
    let w = adj.weight(node);
    class_weight[from] -= w;
    class_weight[to] += w;
    colors[node] = to;
    for &v in adj.neighbors(node) {
        gamma[v * k + from] -= 1;
        gamma[v * k + to] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_leaves_spread_over_free_classes() {
        // Star with centre 0: leaves can use any class but the centre's.
        let mut adj = Adjacency::new(7);
        for leaf in 1..7 {
            adj.insert_edge(0, leaf);
        }
        let mut colors = vec![0, 1, 1, 1, 1, 1, 2];
        balance(&adj, &mut colors, 3, 0);
        let mut sizes = [0; 3];
        for &c in &colors {
            sizes[c] += 1;
        }
        assert!(adj.is_proper(&colors));
        assert_eq!(sizes[colors[0]], 1);
        assert_eq!(sizes.iter().filter(|&&s| s == 3).count(), 2);
    }
}
