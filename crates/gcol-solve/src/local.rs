use gcol_core::rng::RngHandle;
use gcol_core::Color;

use crate::adjacency::Adjacency;
use crate::config::TabuConfig;
use crate::{partialcol, tabucol};

/// Result of one local search run at a fixed colour budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOutcome {
    /// Best state seen. Under [`Neighborhood::Uncoloring`] it may contain
    /// [`gcol_core::UNCOLORED`] entries; under [`Neighborhood::Conflicts`] it
    /// may contain monochromatic edges.
    pub colors: Vec<Color>,
    /// Cost of `colors`: conflicting edges or uncoloured nodes.
    pub cost: usize,
    /// Iterations actually spent.
    pub iterations: u64,
}

impl LocalOutcome {
    /// Returns whether the best state is a proper colouring.
    pub fn is_feasible(&self) -> bool {
        self.cost == 0
    }
}

/// Which constraint a local search may violate while it works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// TabuCol: adjacent nodes may share a colour.
    Conflicts,
    /// PartialCol: nodes may be left uncoloured.
    Uncoloring,
}

impl Neighborhood {
    /// Runs the search for at most `iterations` moves with `k` colours,
    /// starting from `start`. Entries of `start` outside `0..k` are reset.
    pub fn run(
        self,
        adj: &Adjacency,
        k: usize,
        start: &[Color],
        iterations: u64,
        tabu: &TabuConfig,
        rng: &mut RngHandle,
    ) -> LocalOutcome {
        match self {
            Neighborhood::Conflicts => tabucol::tabucol(adj, k, start, iterations, tabu, rng),
            Neighborhood::Uncoloring => partialcol::partialcol(adj, k, start, iterations, tabu, rng),
        }
    }

    /// Short name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Neighborhood::Conflicts => "tabucol",
            Neighborhood::Uncoloring => "partialcol",
        }
    }
}

/// Tenure for a move made while the cost is `cost`.
pub(crate) fn tenure(tabu: &TabuConfig, cost: usize, rng: &mut RngHandle) -> u64 {
    let random = if tabu.tenure_base > 0 {
        rng.index(tabu.tenure_base as usize) as u64
    } else {
        0
    };
    random + (tabu.tenure_factor * cost as f64).floor() as u64
}

/// Keeps the best-scoring candidate, breaking ties uniformly at random by
/// reservoir sampling.
pub(crate) struct MovePicker<T> {
    best: Option<(i64, T)>,
    ties: usize,
}

impl<T> MovePicker<T> {
    pub(crate) fn new() -> Self {
        Self { best: None, ties: 0 }
    }

    pub(crate) fn offer(&mut self, score: i64, candidate: T, rng: &mut RngHandle) {
        match &self.best {
            Some((best, _)) if score > *best => {}
            Some((best, _)) if score == *best => {
                self.ties += 1;
                if rng.index(self.ties) == 0 {
                    self.best = Some((score, candidate));
                }
            }
            _ => {
                self.best = Some((score, candidate));
                self.ties = 1;
            }
        }
    }

    pub(crate) fn take(self) -> Option<(i64, T)> {
        self.best
    }
}
