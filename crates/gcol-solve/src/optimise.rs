//! Drives the optimisation modes over dense colourings.

use gcol_core::errors::GcolError;
use gcol_core::rng::RngHandle;
use gcol_core::{colors_used, infeasible_error, Color, UNCOLORED};
use tracing::{debug, info};

use crate::adjacency::Adjacency;
use crate::clique::greedy_clique;
use crate::config::{OptMode, SolveConfig};
use crate::exact;
use crate::hea::hea;
use crate::local::{LocalOutcome, Neighborhood};

/// Reduces the number of colours of the proper colouring `initial` with the
/// configured optimisation mode.
///
/// Local search and HEA repeatedly drop the highest colour and try to repair
/// the result, sharing `it_limit` iterations across all attempts; they stop
/// at the first failure or at the clique lower bound.
pub fn minimise_colors(
    adj: &Adjacency,
    initial: Vec<Color>,
    config: &SolveConfig,
    rng: &mut RngHandle,
) -> Vec<Color> {
    if adj.is_empty() {
        return initial;
    }
    match config.opt_mode {
        OptMode::None => initial,
        OptMode::Exact => {
            let clique = greedy_clique(adj);
            let outcome = exact::minimise(adj, initial.clone(), &clique, config.exact.node_limit);
            if config.verbosity >= 1 {
                info!(
                    explored = outcome.explored,
                    exhaustive = outcome.exhaustive,
                    "exact search complete"
                );
            }
            outcome.colors.unwrap_or(initial)
        }
        mode => {
            let lower = greedy_clique(adj).len();
            let mut best = initial;
            let mut k = colors_used(&best);
            let mut remaining = config.it_limit;
            while k > lower && remaining > 0 {
                let target = k - 1;
                let outcome = run_mode(adj, target, &drop_colors(&best, target), remaining, mode, config, rng);
                remaining -= outcome.iterations.min(remaining);
                if !outcome.is_feasible() {
                    if config.verbosity >= 2 {
                        debug!(k = target, cost = outcome.cost, "no colouring found within budget");
                    }
                    break;
                }
                best = outcome.colors;
                k = colors_used(&best);
                if config.verbosity >= 1 {
                    info!(colors = k, remaining, mode = %mode, "improved colouring");
                }
            }
            best
        }
    }
}

/// Turns the proper colouring `initial` into one with at most `k` colours.
///
/// Fails with an infeasibility error when the target is not reached. The
/// error is marked exhaustive only when it is proven: by a clique larger
/// than `k`, or by exact search running to completion.
pub fn reach_k(
    adj: &Adjacency,
    k: usize,
    initial: Vec<Color>,
    config: &SolveConfig,
    rng: &mut RngHandle,
) -> Result<Vec<Color>, GcolError> {
    let found = colors_used(&initial);
    if found <= k {
        return Ok(initial);
    }
    let clique = greedy_clique(adj);
    if clique.len() > k {
        return Err(infeasible_error("k-infeasible", "graph contains a clique larger than k", true)
            .with_context("k", k)
            .with_context("clique", clique.len()));
    }

    let outcome = match config.opt_mode {
        OptMode::None => None,
        OptMode::Exact => {
            let outcome = exact::k_feasible(adj, k, &clique, config.exact.node_limit);
            if outcome.colors.is_none() {
                return Err(infeasible_error("k-infeasible", "no colouring with k colours exists", outcome.exhaustive)
                    .with_context("k", k)
                    .with_context("explored", outcome.explored));
            }
            outcome.colors
        }
        mode => {
            let outcome = run_mode(adj, k, &drop_colors(&initial, k), config.it_limit, mode, config, rng);
            if config.verbosity >= 2 {
                debug!(k, cost = outcome.cost, iterations = outcome.iterations, "k-colouring search finished");
            }
            outcome.is_feasible().then_some(outcome.colors)
        }
    };
    outcome.ok_or_else(|| {
        infeasible_error("k-infeasible", "no colouring with k colours found", false)
            .with_context("k", k)
            .with_context("constructed", found)
            .with_context("opt_mode", config.opt_mode)
    })
}

/// Runs one local-search based mode at a fixed colour budget.
pub fn run_mode(
    adj: &Adjacency,
    k: usize,
    start: &[Color],
    budget: u64,
    mode: OptMode,
    config: &SolveConfig,
    rng: &mut RngHandle,
) -> LocalOutcome {
    let outcome = match mode {
        OptMode::Tabucol => Neighborhood::Conflicts.run(adj, k, start, budget, &config.tabu, rng),
        OptMode::Partialcol => Neighborhood::Uncoloring.run(adj, k, start, budget, &config.tabu, rng),
        OptMode::HeaTabucol => hea(adj, k, Neighborhood::Conflicts, start, budget, config),
        OptMode::HeaPartialcol => hea(adj, k, Neighborhood::Uncoloring, start, budget, config),
        OptMode::None | OptMode::Exact => LocalOutcome {
            cost: usize::from(colors_used(start) > k),
            colors: start.to_vec(),
            iterations: 0,
        },
    };
    if config.verbosity >= 2 {
        debug!(k, mode = %mode, cost = outcome.cost, iterations = outcome.iterations, "local search run");
    }
    outcome
}

/// Uncolours every node whose colour is not below `k`.
fn drop_colors(colors: &[Color], k: usize) -> Vec<Color> {
    colors
        .iter()
        .map(|&c| if c < k { c } else { UNCOLORED })
        .collect()
}
