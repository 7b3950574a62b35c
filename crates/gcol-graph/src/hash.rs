use gcol_core::ColorableGraph;
use sha2::{Digest, Sha256};

use crate::graph::{Graph, NodeLabel};

/// Computes a label-aware structural hash that ignores insertion order.
pub fn canonical_hash<N: NodeLabel>(graph: &Graph<N>) -> String {
    let order = graph.canonical_order();
    let mut rank = vec![0u64; graph.len()];
    for (position, &idx) in order.iter().enumerate() {
        rank[idx] = position as u64;
    }

    let mut hasher = Sha256::new();
    hasher.update((order.len() as u64).to_le_bytes());
    for &idx in &order {
        let label = format!("{:?}", graph.label(idx));
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
        hasher.update(graph.weight(idx).to_le_bytes());
    }

    let mut edges: Vec<(u64, u64)> = graph
        .edges()
        .iter()
        .map(|&(u, v)| {
            let (a, b) = (rank[u], rank[v]);
            (a.min(b), a.max(b))
        })
        .collect();
    edges.sort_unstable();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.to_le_bytes());
        hasher.update(b.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
