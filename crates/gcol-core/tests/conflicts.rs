use gcol_core::{colors_used, count_conflicts, ColorableGraph, UNCOLORED};

struct Path {
    adjacency: Vec<Vec<usize>>,
}

impl ColorableGraph for Path {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.len().saturating_sub(1)
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }
}

fn path(n: usize) -> Path {
    let mut adjacency = vec![Vec::new(); n];
    for i in 1..n {
        adjacency[i - 1].push(i);
        adjacency[i].push(i - 1);
    }
    Path { adjacency }
}

#[test]
fn conflicts_ignore_uncoloured_nodes() {
    let graph = path(4);
    assert_eq!(count_conflicts(&graph, &[0, 1, 0, 1]), 0);
    assert_eq!(count_conflicts(&graph, &[0, 0, 0, 1]), 2);
    assert_eq!(count_conflicts(&graph, &[UNCOLORED, UNCOLORED, 0, 0]), 1);
    assert_eq!(graph.degree(1), 2);
    assert_eq!(graph.weight(0), 1.0);
}

#[test]
fn colour_count_skips_sentinel() {
    assert_eq!(colors_used(&[0, 3, 3, UNCOLORED]), 2);
    assert_eq!(colors_used(&[]), 0);
}
