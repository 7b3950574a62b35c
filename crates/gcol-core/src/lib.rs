#![deny(missing_docs)]
#![doc = "Core traits and data types shared by the gcol coloring crates."]

pub mod errors;
pub mod rng;

pub use errors::{
    geometry_error, infeasible_error, parameter_error, structure_error, ErrorInfo, GcolError,
};
pub use rng::{derive_substream_seed, RngHandle};

/// Integer colour label. Colours of a `k`-colouring are `0..k`.
pub type Color = usize;

/// Sentinel stored in dense colour arrays for a node that currently has no
/// colour. Only intermediate search states contain it.
pub const UNCOLORED: Color = usize::MAX;

/// Read-only view of a simple undirected graph over dense node indices.
///
/// This is the contract the solver engine consumes. Nodes are `0..node_count()`
/// and adjacency must be symmetric with no self-loops and no repeated
/// neighbours.
pub trait ColorableGraph {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of undirected edges.
    fn edge_count(&self) -> usize;

    /// Neighbours of `node` in insertion order.
    fn neighbors(&self, node: usize) -> &[usize];

    /// Degree of `node`.
    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Optional non-negative weight of `node`, used for tie-breaking and
    /// class balancing. Unweighted graphs report `1.0`.
    fn weight(&self, _node: usize) -> f64 {
        1.0
    }
}

/// Counts edges whose endpoints share a colour. Uncoloured endpoints never
/// conflict.
pub fn count_conflicts(graph: &dyn ColorableGraph, colors: &[Color]) -> usize {
    let mut total = 0;
    for u in 0..graph.node_count() {
        let cu = colors[u];
        if cu == UNCOLORED {
            continue;
        }
        total += graph
            .neighbors(u)
            .iter()
            .filter(|&&v| v > u && colors[v] == cu)
            .count();
    }
    total
}

/// Number of distinct colours in use, ignoring uncoloured nodes.
pub fn colors_used(colors: &[Color]) -> usize {
    let mut seen: Vec<Color> = colors.iter().copied().filter(|&c| c != UNCOLORED).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
