use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use gcol_core::errors::GcolError;
use gcol_core::{parameter_error, structure_error, ColorableGraph};

/// Requirements on node labels.
///
/// Labels need a total order so faces, colour classes and search tie-breaks
/// are canonical. Mixed-type labels are expressed by the caller as an enum
/// with its own `Ord`.
pub trait NodeLabel: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> NodeLabel for T {}

/// Simple undirected graph over ordered labels.
///
/// Nodes are stored densely in insertion order; adjacency lists keep the order
/// in which edges were added, which is the secondary tie-break for bearings in
/// planar embeddings. Self-loops and parallel edges are rejected on insertion.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    labels: Vec<N>,
    index: BTreeMap<N, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
    edge_set: BTreeSet<(usize, usize)>,
    weights: Vec<f64>,
}

impl<N: NodeLabel> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeLabel> Graph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            index: BTreeMap::new(),
            adjacency: Vec::new(),
            edges: Vec::new(),
            edge_set: BTreeSet::new(),
            weights: Vec::new(),
        }
    }

    /// Builds a graph from a node list and an edge list. Endpoints missing
    /// from `nodes` are added in first-seen order.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (N, N)>,
    ) -> Result<Self, GcolError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Adds a node and returns its dense index. Re-adding a label returns the
    /// existing index.
    pub fn add_node(&mut self, label: N) -> usize {
        if let Some(&idx) = self.index.get(&label) {
            return idx;
        }
        let idx = self.labels.len();
        self.index.insert(label.clone(), idx);
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        self.weights.push(1.0);
        idx
    }

    /// Adds the undirected edge `{a, b}`, creating missing endpoints.
    pub fn add_edge(&mut self, a: N, b: N) -> Result<(), GcolError> {
        if a == b {
            return Err(structure_error("self-loop", "self-loops cannot be coloured")
                .with_context("node", format!("{a:?}")));
        }
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.add_edge_by_index(u, v)
    }

    /// Adds the undirected edge between two existing dense indices.
    pub fn add_edge_by_index(&mut self, u: usize, v: usize) -> Result<(), GcolError> {
        let n = self.labels.len();
        if u >= n || v >= n {
            return Err(structure_error("unknown-node", "edge endpoint does not exist")
                .with_context("index", u.max(v)));
        }
        if u == v {
            return Err(structure_error("self-loop", "self-loops cannot be coloured")
                .with_context("node", format!("{:?}", self.labels[u])));
        }
        if !self.edge_set.insert(edge_key(u, v)) {
            return Err(
                structure_error("parallel-edge", "graph already contains this edge")
                    .with_context("u", format!("{:?}", self.labels[u]))
                    .with_context("v", format!("{:?}", self.labels[v])),
            );
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.edges.push((u, v));
        Ok(())
    }

    /// Adds the edge unless it is already present. Returns whether it was new.
    pub fn ensure_edge(&mut self, u: usize, v: usize) -> Result<bool, GcolError> {
        if u != v && self.contains_edge(u, v) {
            return Ok(false);
        }
        self.add_edge_by_index(u, v)?;
        Ok(true)
    }

    /// Sets the weight of `label`.
    pub fn set_weight(&mut self, label: &N, weight: f64) -> Result<(), GcolError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(parameter_error("invalid-weight", "node weights must be finite and non-negative")
                .with_context("node", format!("{label:?}"))
                .with_context("weight", weight));
        }
        let idx = self.index_of(label).ok_or_else(|| {
            parameter_error("unknown-node", "weight given for a node that is not in the graph")
                .with_context("node", format!("{label:?}"))
        })?;
        self.weights[idx] = weight;
        Ok(())
    }

    /// Returns whether any node carries a weight other than `1.0`.
    pub fn is_weighted(&self) -> bool {
        self.weights.iter().any(|&w| w != 1.0)
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label stored at `idx`.
    pub fn label(&self, idx: usize) -> &N {
        &self.labels[idx]
    }

    /// Returns all labels in insertion order.
    pub fn labels(&self) -> &[N] {
        &self.labels
    }

    /// Returns the dense index of `label`.
    pub fn index_of(&self, label: &N) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Returns every edge as a pair of dense indices, in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Returns whether `{u, v}` is an edge.
    pub fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.edge_set.contains(&edge_key(u, v))
    }

    /// Dense indices sorted by label.
    pub fn canonical_order(&self) -> Vec<usize> {
        self.index.values().copied().collect()
    }

    /// Returns the edge list expressed in labels.
    pub fn labelled_edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.edges
            .iter()
            .map(|&(u, v)| (&self.labels[u], &self.labels[v]))
    }
}

impl<N: NodeLabel> ColorableGraph for Graph<N> {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    fn weight(&self, node: usize) -> f64 {
        self.weights[node]
    }
}

fn edge_key(u: usize, v: usize) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}
