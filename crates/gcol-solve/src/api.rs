use std::collections::{BTreeMap, BTreeSet};

use gcol_core::errors::GcolError;
use gcol_core::rng::RngHandle;
use gcol_core::{colors_used, parameter_error, Color, ColorableGraph};
use gcol_graph::{Graph, NodeLabel};
use tracing::{info, instrument};

use crate::adjacency::Adjacency;
use crate::clique::greedy_clique;
use crate::config::SolveConfig;
use crate::construct::{construct, dsatur};
use crate::equitable::balance;
use crate::exact;
use crate::labels::{compact, normalize, split_to};
use crate::optimise::{minimise_colors, reach_k};
use crate::reduce::{solve_lists, solve_precolored};

/// Colour assigned to every node label.
pub type Coloring<N> = BTreeMap<N, Color>;

/// Dense copy of `graph` indexed by canonical rank, so every tie-break
/// follows label order rather than insertion order.
struct Ranked<'g, N> {
    graph: &'g Graph<N>,
    order: Vec<usize>,
    rank: Vec<usize>,
    adj: Adjacency,
}

impl<'g, N: NodeLabel> Ranked<'g, N> {
    fn new(graph: &'g Graph<N>) -> Self {
        let order = graph.canonical_order();
        let adj = Adjacency::with_order(graph, &order);
        let mut rank = vec![0; order.len()];
        for (r, &idx) in order.iter().enumerate() {
            rank[idx] = r;
        }
        Self {
            graph,
            order,
            rank,
            adj,
        }
    }

    fn rank_of(&self, label: &N) -> Option<usize> {
        self.graph.index_of(label).map(|idx| self.rank[idx])
    }

    fn labelled(&self, colors: &[Color]) -> Coloring<N> {
        self.order
            .iter()
            .zip(colors)
            .map(|(&idx, &c)| (self.graph.label(idx).clone(), c))
            .collect()
    }
}

/// Colours `graph` with as few colours as the configured construction and
/// optimisation find.
///
/// Colours are `0..c`; class 0 is the largest, and classes of equal size are
/// ordered by their smallest label.
#[instrument(skip_all, fields(nodes = graph.len(), strategy = %config.strategy, opt_mode = %config.opt_mode))]
pub fn coloring<N: NodeLabel>(graph: &Graph<N>, config: &SolveConfig) -> Result<Coloring<N>, GcolError> {
    config.validate()?;
    let ranked = Ranked::new(graph);
    let mut rng = RngHandle::from_seed(config.seed);
    let initial = construct(&ranked.adj, config.strategy, &mut rng);
    if config.verbosity >= 1 {
        info!(colors = colors_used(&initial), "constructed colouring");
    }
    let mut colors = minimise_colors(&ranked.adj, initial, config, &mut rng);
    compact(&mut colors);
    normalize(&mut colors);
    Ok(ranked.labelled(&colors))
}

/// Colours `graph` with exactly `min(k, n)` colours.
///
/// Fails with [`GcolError::Infeasible`] when no such colouring is found. The
/// failure is a proof only when [`GcolError::is_proven_infeasible`] holds;
/// heuristic modes report "not found within budget".
#[instrument(skip_all, fields(nodes = graph.len(), k, opt_mode = %config.opt_mode))]
pub fn k_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    k: usize,
    config: &SolveConfig,
) -> Result<Coloring<N>, GcolError> {
    config.validate()?;
    let ranked = Ranked::new(graph);
    let mut colors = dense_k_coloring(&ranked.adj, k, config)?;
    normalize(&mut colors);
    Ok(ranked.labelled(&colors))
}

/// Like [`k_coloring`], then balances class weights (node weights, or one
/// per node) by steepest descent without introducing conflicts.
#[instrument(skip_all, fields(nodes = graph.len(), k, opt_mode = %config.opt_mode))]
pub fn equitable_k_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    k: usize,
    config: &SolveConfig,
) -> Result<Coloring<N>, GcolError> {
    config.validate()?;
    let ranked = Ranked::new(graph);
    let mut colors = dense_k_coloring(&ranked.adj, k, config)?;
    let moves = balance(&ranked.adj, &mut colors, k.min(ranked.adj.len()), config.verbosity);
    if config.verbosity >= 1 {
        info!(moves, "balanced colour classes");
    }
    normalize(&mut colors);
    Ok(ranked.labelled(&colors))
}

fn dense_k_coloring(adj: &Adjacency, k: usize, config: &SolveConfig) -> Result<Vec<Color>, GcolError> {
    let mut rng = RngHandle::from_seed(config.seed);
    let initial = construct(adj, config.strategy, &mut rng);
    let mut colors = reach_k(adj, k, initial, config, &mut rng)?;
    compact(&mut colors);
    split_to(&mut colors, k.min(adj.len()));
    Ok(colors)
}

/// Extends the partial colouring `fixed` to the whole graph.
///
/// Fixed nodes keep their colours; the remaining nodes take the smallest
/// labels the fixed colours leave free. An empty `fixed` is plain
/// [`coloring`].
#[instrument(skip_all, fields(nodes = graph.len(), fixed = fixed.len()))]
pub fn precoloring<N: NodeLabel>(
    graph: &Graph<N>,
    fixed: &BTreeMap<N, Color>,
    config: &SolveConfig,
) -> Result<Coloring<N>, GcolError> {
    if fixed.is_empty() {
        return coloring(graph, config);
    }
    config.validate()?;
    let ranked = Ranked::new(graph);
    let mut dense = BTreeMap::new();
    for (label, &color) in fixed {
        let rank = ranked.rank_of(label).ok_or_else(|| unknown_node(label))?;
        dense.insert(rank, color);
    }
    for (&u, &cu) in &dense {
        for &v in ranked.adj.neighbors(u) {
            if dense.get(&v) == Some(&cu) {
                return Err(parameter_error("precoloring-conflict", "adjacent nodes are precoloured alike")
                    .with_context("first", format!("{:?}", ranked.graph.label(ranked.order[u])))
                    .with_context("second", format!("{:?}", ranked.graph.label(ranked.order[v])))
                    .with_context("color", cu));
            }
        }
    }
    let mut rng = RngHandle::from_seed(config.seed);
    let colors = solve_precolored(&ranked.adj, &dense, config, &mut rng);
    Ok(ranked.labelled(&colors))
}

/// Colours every node from its candidate list.
///
/// Lists are required for every node; an empty map is plain [`coloring`].
/// An empty list is a proven infeasibility; otherwise failure follows the
/// rules of [`k_coloring`] with `k` equal to the number of distinct
/// candidate colours.
#[instrument(skip_all, fields(nodes = graph.len(), lists = lists.len()))]
pub fn list_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    lists: &BTreeMap<N, BTreeSet<Color>>,
    config: &SolveConfig,
) -> Result<Coloring<N>, GcolError> {
    if lists.is_empty() {
        return coloring(graph, config);
    }
    config.validate()?;
    let ranked = Ranked::new(graph);
    if let Some(label) = lists.keys().find(|label| graph.index_of(label).is_none()) {
        return Err(unknown_node(label));
    }
    let mut dense = Vec::with_capacity(ranked.order.len());
    for &idx in &ranked.order {
        let label = graph.label(idx);
        let list = lists.get(label).ok_or_else(|| {
            parameter_error("missing-list", "every node needs a candidate list")
                .with_context("node", format!("{label:?}"))
        })?;
        dense.push(list.clone());
    }
    let mut rng = RngHandle::from_seed(config.seed);
    let colors = solve_lists(&ranked.adj, &dense, config, &mut rng)?;
    Ok(ranked.labelled(&colors))
}

/// Chromatic number by exhaustive branch and bound seeded with DSatur and a
/// greedy clique.
pub fn chromatic_number<N: NodeLabel>(graph: &Graph<N>) -> usize {
    let ranked = Ranked::new(graph);
    dense_chromatic_number(&ranked.adj)
}

pub(crate) fn dense_chromatic_number(adj: &Adjacency) -> usize {
    if adj.is_empty() {
        return 0;
    }
    let clique = greedy_clique(adj);
    let initial = dsatur(adj);
    let outcome = exact::minimise(adj, initial.clone(), &clique, None);
    colors_used(&outcome.colors.unwrap_or(initial))
}

/// Colour classes in colour order, each sorted by label.
pub fn partition<N: NodeLabel>(coloring: &Coloring<N>) -> Vec<Vec<N>> {
    let mut classes: BTreeMap<Color, Vec<N>> = BTreeMap::new();
    for (label, &color) in coloring {
        classes.entry(color).or_default().push(label.clone());
    }
    classes.into_values().collect()
}

/// Number of edges whose endpoints are both coloured alike. Nodes missing
/// from `coloring` never conflict.
pub fn conflicts<N: NodeLabel>(graph: &Graph<N>, coloring: &Coloring<N>) -> usize {
    graph
        .labelled_edges()
        .filter(|(a, b)| match (coloring.get(*a), coloring.get(*b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        })
        .count()
}

/// Returns whether every node is coloured and no edge is monochromatic.
pub fn is_proper<N: NodeLabel>(graph: &Graph<N>, coloring: &Coloring<N>) -> bool {
    graph.labels().iter().all(|label| coloring.contains_key(label)) && conflicts(graph, coloring) == 0
}

fn unknown_node<N: NodeLabel>(label: &N) -> GcolError {
    parameter_error("unknown-node", "label is not a node of the graph").with_context("node", format!("{label:?}"))
}
