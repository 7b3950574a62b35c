use gcol_core::{Color, ColorableGraph};

/// Dense working copy of a graph used by every search routine.
///
/// Neighbour lists are sorted so membership tests are binary searches.
/// Reductions (precolouring contraction, list anchors) build their derived
/// graphs directly on this type.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
    weights: Vec<f64>,
    edges: usize,
}

impl Adjacency {
    /// Creates `n` isolated nodes of weight one.
    pub fn new(n: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); n],
            weights: vec![1.0; n],
            edges: 0,
        }
    }

    /// Copies `graph`, renumbering its node `order[i]` as `i`.
    pub fn with_order(graph: &dyn ColorableGraph, order: &[usize]) -> Self {
        let mut rank = vec![0; graph.node_count()];
        for (i, &node) in order.iter().enumerate() {
            rank[node] = i;
        }
        let mut neighbors: Vec<Vec<usize>> = order
            .iter()
            .map(|&node| graph.neighbors(node).iter().map(|&v| rank[v]).collect())
            .collect();
        for list in &mut neighbors {
            list.sort_unstable();
        }
        Self {
            neighbors,
            weights: order.iter().map(|&node| graph.weight(node)).collect(),
            edges: graph.edge_count(),
        }
    }

    /// Copies `graph` keeping its numbering.
    pub fn from_graph(graph: &dyn ColorableGraph) -> Self {
        let order: Vec<usize> = (0..graph.node_count()).collect();
        Self::with_order(graph, &order)
    }

    /// Appends an isolated node and returns its index.
    pub fn push_node(&mut self, weight: f64) -> usize {
        self.neighbors.push(Vec::new());
        self.weights.push(weight);
        self.neighbors.len() - 1
    }

    /// Adds `u-v` unless it is a loop or already present. Returns whether an
    /// edge was added.
    pub fn insert_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || self.adjacent(u, v) {
            return false;
        }
        for (a, b) in [(u, v), (v, u)] {
            let list = &mut self.neighbors[a];
            let at = list.partition_point(|&x| x < b);
            list.insert(at, b);
        }
        self.edges += 1;
        true
    }

    /// Returns whether `u` and `v` are adjacent.
    pub fn adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors[u].binary_search(&v).is_ok()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns whether there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Returns whether every colour is set and no edge is monochromatic.
    pub fn is_proper(&self, colors: &[Color]) -> bool {
        colors.iter().all(|&c| c != gcol_core::UNCOLORED)
            && gcol_core::count_conflicts(self, colors) == 0
    }
}

impl ColorableGraph for Adjacency {
    fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    fn edge_count(&self) -> usize {
        self.edges
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    fn weight(&self, node: usize) -> f64 {
        self.weights[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_edge_skips_loops_and_duplicates() {
        let mut adj = Adjacency::new(3);
        assert!(adj.insert_edge(0, 2));
        assert!(!adj.insert_edge(2, 0));
        assert!(!adj.insert_edge(1, 1));
        assert!(adj.insert_edge(1, 2));
        assert_eq!(adj.edge_count(), 2);
        assert_eq!(adj.neighbors(2), &[0, 1]);
        assert!(adj.adjacent(0, 2));
        assert!(!adj.adjacent(0, 1));
    }
}
