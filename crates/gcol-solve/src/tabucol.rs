//! TabuCol: conflict-minimising tabu search at a fixed number of colours.

use gcol_core::rng::RngHandle;
use gcol_core::{Color, ColorableGraph};

use crate::adjacency::Adjacency;
use crate::config::TabuConfig;
use crate::local::{tenure, LocalOutcome, MovePicker};

/// Minimises monochromatic edges with `k` colours.
///
/// Each iteration recolours one conflicting node to the non-tabu colour that
/// most reduces the conflict count, accepting worsening moves. A tabu move is
/// still allowed when it would beat the best cost seen so far. Stops at zero
/// conflicts or after `max_iterations` moves.
pub fn tabucol(
    adj: &Adjacency,
    k: usize,
    start: &[Color],
    max_iterations: u64,
    tabu: &TabuConfig,
    rng: &mut RngHandle,
) -> LocalOutcome {
    let n = adj.len();
    if k == 0 {
        return LocalOutcome {
            colors: start.to_vec(),
            cost: adj.edge_count(),
            iterations: 0,
        };
    }

    let mut colors: Vec<Color> = start
        .iter()
        .map(|&c| if c < k { c } else { rng.index(k) })
        .collect();
    // gamma[u * k + c]: neighbours of u coloured c.
    let mut gamma = vec![0i64; n * k];
    for u in 0..n {
        for &v in adj.neighbors(u) {
            gamma[u * k + colors[v]] += 1;
        }
    }
    let mut cost = gcol_core::count_conflicts(adj, &colors);
    let mut tabu_until = vec![0u64; n * k];
    let mut best_colors = colors.clone();
    let mut best_cost = cost;
    let mut iterations = 0;

    while cost > 0 && iterations < max_iterations {
        let mut picker = MovePicker::new();
        for u in 0..n {
            let current = gamma[u * k + colors[u]];
            if current == 0 {
                continue;
            }
            for c in (0..k).filter(|&c| c != colors[u]) {
                let delta = gamma[u * k + c] - current;
                let aspires = (cost as i64 + delta) < best_cost as i64;
                if tabu_until[u * k + c] <= iterations || aspires {
                    picker.offer(delta, (u, c), rng);
                }
            }
        }

        let (delta, (u, c)) = match picker.take() {
            Some(found) => found,
            None if k > 1 => {
                let conflicting: Vec<usize> =
                    (0..n).filter(|&u| gamma[u * k + colors[u]] > 0).collect();
                let u = conflicting[rng.index(conflicting.len())];
                let mut c = rng.index(k - 1);
                if c >= colors[u] {
                    c += 1;
                }
                (gamma[u * k + c] - gamma[u * k + colors[u]], (u, c))
            }
            None => break,
        };

        let old = colors[u];
        colors[u] = c;
        for &v in adj.neighbors(u) {
            gamma[v * k + old] -= 1;
            gamma[v * k + c] += 1;
        }
        cost = (cost as i64 + delta) as usize;
        iterations += 1;
        tabu_until[u * k + old] = iterations + tenure(tabu, cost, rng);

        if cost < best_cost {
            best_cost = cost;
            best_colors.clone_from(&colors);
        }
    }

    LocalOutcome {
        colors: best_colors,
        cost: best_cost,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_a_monochrome_even_cycle() {
        let mut adj = Adjacency::new(8);
        for i in 0..8 {
            adj.insert_edge(i, (i + 1) % 8);
        }
        let mut rng = RngHandle::from_seed(5);
        let outcome = tabucol(&adj, 2, &[0; 8], 1_000, &TabuConfig::default(), &mut rng);
        assert!(outcome.is_feasible());
        assert!(adj.is_proper(&outcome.colors));
    }

    #[test]
    fn cannot_two_colour_a_triangle() {
        let mut adj = Adjacency::new(3);
        for (u, v) in [(0, 1), (1, 2), (2, 0)] {
            adj.insert_edge(u, v);
        }
        let mut rng = RngHandle::from_seed(1);
        let outcome = tabucol(&adj, 2, &[0, 1, 2], 200, &TabuConfig::default(), &mut rng);
        assert_eq!(outcome.cost, 1);
        assert_eq!(outcome.iterations, 200);
    }
}
