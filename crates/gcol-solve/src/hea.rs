//! Hybrid evolutionary algorithm.
//!
//! A small population of distinct local-search optima is recombined with the greedy
//! partition crossover; every offspring is polished by the selected
//! neighbourhood and replaces the worst member when it is no worse and not a
//! relabelling of an existing member.

use gcol_core::rng::{derive_substream_seed, RngHandle};
use gcol_core::{Color, UNCOLORED};
use tracing::debug;

use crate::adjacency::Adjacency;
use crate::config::SolveConfig;
use crate::construct;
use crate::local::{LocalOutcome, Neighborhood};

/// Searches for a `k`-colouring spending at most `budget` local search
/// iterations in total. `start` seeds the first individual; the rest come
/// from shuffled greedy constructions.
pub fn hea(
    adj: &Adjacency,
    k: usize,
    neighborhood: Neighborhood,
    start: &[Color],
    budget: u64,
    config: &SolveConfig,
) -> LocalOutcome {
    let per_child = config.hea.iterations_for(adj.len());
    let run_seed = derive_substream_seed(config.seed, k as u64);
    let (mut population, mut spent) =
        match seed_population(adj, k, neighborhood, start, budget, config, run_seed) {
            Seeded::Solved(outcome) => return outcome,
            Seeded::Population(population, spent) => (population, spent),
        };

    let mut rng = RngHandle::substream(run_seed, 0);
    let mut generation = 0u64;
    while spent < budget && population.len() >= 2 && k > 0 {
        let first = rng.index(population.len());
        let mut second = rng.index(population.len() - 1);
        if second >= first {
            second += 1;
        }
        let child = crossover(&population[first].colors, &population[second].colors, k);
        let outcome = neighborhood.run(
            adj,
            k,
            &child,
            per_child.min(budget - spent),
            &config.tabu,
            &mut rng,
        );
        spent += outcome.iterations;
        generation += 1;
        // A single colour admits no TabuCol move at all.
        let stalled = outcome.iterations == 0;
        if outcome.is_feasible() {
            return LocalOutcome {
                iterations: spent,
                ..outcome
            };
        }

        let worst = population
            .iter()
            .enumerate()
            .max_by_key(|(_, member)| member.cost)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let fresh = relabel(&outcome.colors);
        let duplicate = population
            .iter()
            .any(|member| relabel(&member.colors) == fresh);
        if config.verbosity >= 2 {
            debug!(
                generation,
                k,
                neighborhood = neighborhood.as_str(),
                child_cost = outcome.cost,
                worst_cost = population[worst].cost,
                duplicate,
                "hea generation"
            );
        }
        if outcome.cost <= population[worst].cost && !duplicate {
            population[worst] = outcome;
        }
        if stalled {
            break;
        }
    }

    let best = population
        .into_iter()
        .min_by_key(|member| member.cost)
        .unwrap_or_else(|| LocalOutcome {
            colors: start.to_vec(),
            cost: usize::MAX,
            iterations: 0,
        });
    LocalOutcome {
        iterations: spent,
        ..best
    }
}

/// Candidate seeds tried per population slot before giving up on filling it.
const SEED_ATTEMPTS: usize = 4;

/// Initial population, unless a feasible colouring turned up while building
/// it.
enum Seeded {
    Solved(LocalOutcome),
    Population(Vec<LocalOutcome>, u64),
}

/// Polishes `start` and shuffled greedy constructions into members that are
/// pairwise distinct up to colour names. A candidate that relabels to an
/// existing member is dropped and the next substream is tried instead.
fn seed_population(
    adj: &Adjacency,
    k: usize,
    neighborhood: Neighborhood,
    start: &[Color],
    budget: u64,
    config: &SolveConfig,
    run_seed: u64,
) -> Seeded {
    let per_child = config.hea.iterations_for(adj.len());
    let target = config.hea.population;
    let mut population: Vec<LocalOutcome> = Vec::with_capacity(target);
    let mut members: Vec<Vec<Color>> = Vec::with_capacity(target);
    let mut spent = 0u64;

    for attempt in 0..target.saturating_mul(SEED_ATTEMPTS) {
        if population.len() >= target {
            break;
        }
        let mut rng = RngHandle::substream(run_seed, attempt as u64 + 1);
        let initial = if attempt == 0 {
            start.to_vec()
        } else {
            construct::random_order(adj, &mut rng)
        };
        let outcome = neighborhood.run(
            adj,
            k,
            &initial,
            per_child.min(budget.saturating_sub(spent)),
            &config.tabu,
            &mut rng,
        );
        spent += outcome.iterations;
        if outcome.is_feasible() {
            return Seeded::Solved(LocalOutcome {
                iterations: spent,
                ..outcome
            });
        }
        let key = relabel(&outcome.colors);
        if members.contains(&key) {
            if config.verbosity >= 2 {
                debug!(attempt, k, "hea seed repeats a member");
            }
        } else {
            members.push(key);
            population.push(outcome);
        }
        if spent >= budget {
            break;
        }
    }
    Seeded::Population(population, spent)
}

/// Greedy partition crossover.
///
/// Colour `c` of the child takes the class of parent `c % 2` that holds the
/// most still-unassigned nodes. Nodes left over stay uncoloured for the
/// local search to place.
pub fn crossover(first: &[Color], second: &[Color], k: usize) -> Vec<Color> {
    let n = first.len();
    let parents = [classes(first, k), classes(second, k)];
    let mut child = vec![UNCOLORED; n];
    for color in 0..k {
        let parent = &parents[color % 2];
        let largest = parent
            .iter()
            .max_by_key(|class| {
                (
                    class.iter().filter(|&&u| child[u] == UNCOLORED).count(),
                    std::cmp::Reverse(class.first().copied()),
                )
            })
            .cloned()
            .unwrap_or_default();
        for u in largest {
            if child[u] == UNCOLORED {
                child[u] = color;
            }
        }
    }
    child
}

fn classes(colors: &[Color], k: usize) -> Vec<Vec<usize>> {
    let mut classes = vec![Vec::new(); k];
    for (u, &c) in colors.iter().enumerate() {
        if c < k {
            classes[c].push(u);
        }
    }
    classes
}

/// Relabels colours in order of first appearance, so two colourings with the
/// same partition compare equal.
pub(crate) fn relabel(colors: &[Color]) -> Vec<Color> {
    let mut mapping = std::collections::HashMap::new();
    colors
        .iter()
        .map(|&c| {
            if c == UNCOLORED {
                return UNCOLORED;
            }
            let next = mapping.len();
            *mapping.entry(c).or_insert(next)
        })
        .collect()
}
