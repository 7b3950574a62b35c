//! Planarity testing by path embedding (Demoucron, Malgrange and Pertuiset).
//!
//! A graph is planar exactly when each of its biconnected blocks is. A block
//! is embedded starting from one cycle: every round collects the fragments
//! not yet drawn, picks one whose attachments all lie on a single face
//! (preferring fragments with only one such face) and routes one of its paths
//! through that face, splitting it in two. A fragment that fits no face
//! proves the block non-planar.

use std::collections::{BTreeSet, VecDeque};

use gcol_core::ColorableGraph;

use crate::predicates::within_planar_edge_bound;

/// Returns whether the graph admits a crossing-free drawing in the plane.
pub fn is_planar(graph: &dyn ColorableGraph) -> bool {
    let n = graph.node_count();
    if n < 5 {
        return true;
    }
    if !within_planar_edge_bound(graph) {
        return false;
    }
    let adj: Vec<Vec<usize>> = (0..n).map(|u| graph.neighbors(u).to_vec()).collect();
    biconnected_blocks(&adj)
        .iter()
        .all(|block| block_is_planar(block))
}

/// Edge sets of the biconnected blocks, found with an iterative Tarjan
/// search that keeps the tree and back edges on a stack.
fn biconnected_blocks(adj: &[Vec<usize>]) -> Vec<Vec<(usize, usize)>> {
    let n = adj.len();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut time = 0usize;
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let mut blocks = Vec::new();
    // (node, parent, next neighbour slot)
    let mut stack: Vec<(usize, usize, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        stack.push((root, usize::MAX, 0));

        while let Some(&(u, parent, slot)) = stack.last() {
            if let Some(&v) = adj[u].get(slot) {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                if v == parent {
                    continue;
                }
                if disc[v] == usize::MAX {
                    pending.push((u, v));
                    disc[v] = time;
                    low[v] = time;
                    time += 1;
                    stack.push((v, u, 0));
                } else if disc[v] < disc[u] {
                    pending.push((u, v));
                    low[u] = low[u].min(disc[v]);
                }
            } else {
                stack.pop();
                if parent != usize::MAX {
                    low[parent] = low[parent].min(low[u]);
                    if low[u] >= disc[parent] {
                        let mut block = Vec::new();
                        while let Some(edge) = pending.pop() {
                            block.push(edge);
                            if edge == (parent, u) {
                                break;
                            }
                        }
                        blocks.push(block);
                    }
                }
            }
        }
    }
    blocks
}

fn block_is_planar(edges: &[(usize, usize)]) -> bool {
    let nodes: Vec<usize> = edges
        .iter()
        .flat_map(|&(u, v)| [u, v])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let n = nodes.len();
    // Single edges and cycles are planar; so is anything on four nodes.
    if n < 5 || edges.len() <= n {
        return true;
    }
    if edges.len() > 3 * n - 6 {
        return false;
    }
    let local = |label: usize| nodes.binary_search(&label).unwrap_or_default();
    let mut adj = vec![Vec::new(); n];
    for &(u, v) in edges {
        let (a, b) = (local(u), local(v));
        adj[a].push(b);
        adj[b].push(a);
    }
    match Embedder::start(&adj) {
        Some(mut embedder) => embedder.run(edges.len()),
        None => true,
    }
}

/// Part of the block not yet drawn: either a single edge between drawn
/// nodes, or a connected set of undrawn nodes with the edges that reach the
/// drawing.
struct Fragment {
    members: Vec<usize>,
    attachments: Vec<usize>,
}

struct Embedder<'a> {
    adj: &'a [Vec<usize>],
    placed_nodes: Vec<bool>,
    placed_edges: BTreeSet<(usize, usize)>,
    faces: Vec<Vec<usize>>,
}

impl<'a> Embedder<'a> {
    /// Draws a first cycle through node 0, as two faces bounded by it.
    fn start(adj: &'a [Vec<usize>]) -> Option<Self> {
        let cycle = initial_cycle(adj)?;
        let mut embedder = Self {
            adj,
            placed_nodes: vec![false; adj.len()],
            placed_edges: BTreeSet::new(),
            faces: Vec::new(),
        };
        for (i, &u) in cycle.iter().enumerate() {
            embedder.placed_nodes[u] = true;
            embedder.place_edge(u, cycle[(i + 1) % cycle.len()]);
        }
        let mut reversed = cycle.clone();
        reversed.reverse();
        embedder.faces = vec![cycle, reversed];
        Some(embedder)
    }

    fn run(&mut self, edge_count: usize) -> bool {
        while self.placed_edges.len() < edge_count {
            let fragments = self.fragments();
            let node_faces = self.node_faces();
            let mut chosen = None;
            for fragment in &fragments {
                let admissible = admissible_faces(&fragment.attachments, &node_faces);
                match admissible.first() {
                    None => return false,
                    Some(&face) if admissible.len() == 1 => {
                        chosen = Some((fragment, face));
                        break;
                    }
                    Some(&face) => {
                        if chosen.is_none() {
                            chosen = Some((fragment, face));
                        }
                    }
                }
            }
            let Some((fragment, face)) = chosen else {
                return true;
            };
            let Some(path) = self.fragment_path(fragment) else {
                return false;
            };
            if !self.embed(face, &path) {
                return false;
            }
        }
        true
    }

    fn place_edge(&mut self, u: usize, v: usize) {
        self.placed_edges.insert((u.min(v), u.max(v)));
    }

    fn fragments(&self) -> Vec<Fragment> {
        let n = self.adj.len();
        let mut fragments = Vec::new();
        for u in (0..n).filter(|&u| self.placed_nodes[u]) {
            for &v in &self.adj[u] {
                if u < v && self.placed_nodes[v] && !self.placed_edges.contains(&(u, v)) {
                    fragments.push(Fragment {
                        members: Vec::new(),
                        attachments: vec![u, v],
                    });
                }
            }
        }

        let mut seen = vec![false; n];
        for start in 0..n {
            if self.placed_nodes[start] || seen[start] {
                continue;
            }
            seen[start] = true;
            let mut members = Vec::new();
            let mut attachments = BTreeSet::new();
            let mut queue = VecDeque::from([start]);
            while let Some(u) = queue.pop_front() {
                members.push(u);
                for &v in &self.adj[u] {
                    if self.placed_nodes[v] {
                        attachments.insert(v);
                    } else if !seen[v] {
                        seen[v] = true;
                        queue.push_back(v);
                    }
                }
            }
            fragments.push(Fragment {
                members,
                attachments: attachments.into_iter().collect(),
            });
        }
        fragments
    }

    /// Sorted ids of the faces each node lies on.
    fn node_faces(&self) -> Vec<Vec<usize>> {
        let mut node_faces = vec![Vec::new(); self.adj.len()];
        for (id, face) in self.faces.iter().enumerate() {
            for &u in face {
                node_faces[u].push(id);
            }
        }
        node_faces
    }

    /// A path through the fragment joining two distinct attachments.
    fn fragment_path(&self, fragment: &Fragment) -> Option<Vec<usize>> {
        let (&from, &to) = (fragment.attachments.first()?, fragment.attachments.get(1)?);
        if fragment.members.is_empty() {
            return Some(vec![from, to]);
        }
        let mut inside = vec![false; self.adj.len()];
        for &u in &fragment.members {
            inside[u] = true;
        }
        let mut parent = vec![usize::MAX; self.adj.len()];
        let mut queue = VecDeque::new();
        for &v in &self.adj[from] {
            if inside[v] {
                parent[v] = from;
                queue.push_back(v);
            }
        }
        while let Some(u) = queue.pop_front() {
            if self.adj[u].contains(&to) {
                let mut path = vec![to, u];
                let mut cursor = u;
                while parent[cursor] != from {
                    cursor = parent[cursor];
                    path.push(cursor);
                }
                path.push(from);
                path.reverse();
                return Some(path);
            }
            for &v in &self.adj[u] {
                if inside[v] && parent[v] == usize::MAX {
                    parent[v] = u;
                    queue.push_back(v);
                }
            }
        }
        None
    }

    /// Routes `path` through `face`, replacing it with the two faces on
    /// either side of the path.
    fn embed(&mut self, face: usize, path: &[usize]) -> bool {
        let (Some(&from), Some(&to)) = (path.first(), path.last()) else {
            return false;
        };
        let boundary = &self.faces[face];
        let (Some(i), Some(j)) = (
            boundary.iter().position(|&u| u == from),
            boundary.iter().position(|&u| u == to),
        ) else {
            return false;
        };
        let interior = &path[1..path.len() - 1];
        let mut first = arc(boundary, i, j);
        first.extend(interior.iter().rev());
        let mut second = arc(boundary, j, i);
        second.extend(interior);

        self.faces[face] = first;
        self.faces.push(second);
        for &u in path {
            self.placed_nodes[u] = true;
        }
        for pair in path.windows(2) {
            self.place_edge(pair[0], pair[1]);
        }
        true
    }
}

/// Face ids that contain every attachment.
fn admissible_faces(attachments: &[usize], node_faces: &[Vec<usize>]) -> Vec<usize> {
    let Some((&first, rest)) = attachments.split_first() else {
        return Vec::new();
    };
    node_faces[first]
        .iter()
        .copied()
        .filter(|face| {
            rest.iter()
                .all(|&u| node_faces[u].binary_search(face).is_ok())
        })
        .collect()
}

/// Boundary walk from position `from` to position `to`, both inclusive.
fn arc(boundary: &[usize], from: usize, to: usize) -> Vec<usize> {
    let len = boundary.len();
    let steps = (to + len - from) % len;
    (0..=steps).map(|s| boundary[(from + s) % len]).collect()
}

/// Shortest cycle through the first edge at node 0.
fn initial_cycle(adj: &[Vec<usize>]) -> Option<Vec<usize>> {
    let &start = adj.first()?.first()?;
    let mut parent = vec![usize::MAX; adj.len()];
    parent[start] = start;
    let mut queue = VecDeque::from([start]);
    while let Some(u) = queue.pop_front() {
        for &v in &adj[u] {
            if (u == start && v == 0) || parent[v] != usize::MAX {
                continue;
            }
            parent[v] = u;
            if v == 0 {
                let mut cycle = vec![0];
                let mut cursor = u;
                while cursor != start {
                    cycle.push(cursor);
                    cursor = parent[cursor];
                }
                cycle.push(start);
                return Some(cycle);
            }
            queue.push_back(v);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cube, dodecahedron, square_with_diagonal, wheel, Graph};

    fn k33() -> Graph<u32> {
        let mut edges = Vec::new();
        for a in 0..3u32 {
            for b in 3..6u32 {
                edges.push((a, b));
            }
        }
        Graph::from_edges(0..6u32, edges).unwrap()
    }

    fn petersen() -> Graph<u32> {
        let mut edges = Vec::new();
        for i in 0..5u32 {
            edges.push((i, (i + 1) % 5));
            edges.push((i, i + 5));
            edges.push((i + 5, (i + 2) % 5 + 5));
        }
        Graph::from_edges(0..10u32, edges).unwrap()
    }

    #[test]
    fn kuratowski_graphs_are_rejected() {
        assert!(!is_planar(&k33()));
        assert!(!is_planar(&petersen()));

        // K5 with every edge subdivided passes the edge bound.
        let mut edges = Vec::new();
        let mut next = 5u32;
        for a in 0..5u32 {
            for b in a + 1..5 {
                edges.push((a, next));
                edges.push((next, b));
                next += 1;
            }
        }
        let subdivided = Graph::from_edges(0..next, edges).unwrap();
        assert!(within_planar_edge_bound(&subdivided));
        assert!(!is_planar(&subdivided));
    }

    #[test]
    fn drawn_solids_are_planar() {
        assert!(is_planar(&cube().graph));
        assert!(is_planar(&dodecahedron().graph));
        assert!(is_planar(&wheel(7).unwrap().graph));
        assert!(is_planar(&square_with_diagonal().graph));
    }

    #[test]
    fn blocks_are_tested_separately() {
        // Two K4s sharing node 3, plus a pendant edge: planar.
        let graph = Graph::from_edges(
            0..8u32,
            [
                (0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3),
                (3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6),
                (6, 7),
            ],
        )
        .unwrap();
        assert!(is_planar(&graph));
        assert_eq!(biconnected_blocks(&graph_adj(&graph)).len(), 3);

        // A K3,3 hanging off a triangle is still non-planar.
        let mut edges: Vec<(u32, u32)> = k33().labelled_edges().map(|(a, b)| (*a, *b)).collect();
        edges.extend([(0, 6), (6, 7), (7, 0)]);
        let graph = Graph::from_edges(0..8u32, edges).unwrap();
        assert!(!is_planar(&graph));
    }

    fn graph_adj(graph: &Graph<u32>) -> Vec<Vec<usize>> {
        (0..graph.len()).map(|u| graph.neighbors(u).to_vec()).collect()
    }
}
