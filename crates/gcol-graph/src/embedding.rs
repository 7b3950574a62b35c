use std::collections::BTreeMap;

use crate::graph::{Graph, NodeLabel};

/// Straight-line coordinates keyed by node label.
pub type Positions<N> = BTreeMap<N, (f64, f64)>;

/// A graph together with a candidate planar straight-line drawing.
#[derive(Debug, Clone)]
pub struct Embedding<N> {
    /// The drawn graph.
    pub graph: Graph<N>,
    /// One coordinate per node.
    pub positions: Positions<N>,
}

impl<N: NodeLabel> Embedding<N> {
    /// Bundles a graph with its coordinates.
    pub fn new(graph: Graph<N>, positions: Positions<N>) -> Self {
        Self { graph, positions }
    }

    /// Number of faces Euler's formula predicts for a connected drawing.
    pub fn expected_faces(&self) -> usize {
        (self.graph.edges().len() + 2).saturating_sub(self.graph.len())
    }
}
