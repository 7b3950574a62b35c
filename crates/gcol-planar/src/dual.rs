use std::collections::BTreeMap;

use gcol_core::errors::GcolError;
use gcol_core::{geometry_error, parameter_error, structure_error, ColorableGraph};
use gcol_graph::{
    has_bridges, is_connected, is_planar, within_planar_edge_bound, Graph, NodeLabel, Positions,
};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::face::Face;
use crate::geometry::{bearing, is_clockwise, Point};
use crate::sweep::find_crossing;

/// Directed edge `(tail, head)` between dense node indices.
type Arc = (usize, usize);

/// Dual of a planar embedding.
///
/// Dual node `i` is face `faces()[i]`; node `0` is the external face, whose
/// walk runs clockwise. Every other walk runs counterclockwise. Two dual nodes
/// are adjacent when their faces share at least one boundary edge.
#[derive(Debug, Clone)]
pub struct DualGraph<N> {
    graph: Graph<usize>,
    faces: Vec<Face<N>>,
    lookup: BTreeMap<Face<N>, usize>,
}

impl<N: NodeLabel> DualGraph<N> {
    fn new(graph: Graph<usize>, faces: Vec<Face<N>>) -> Self {
        let lookup = faces
            .iter()
            .enumerate()
            .map(|(idx, face)| (face.clone(), idx))
            .collect();
        Self {
            graph,
            faces,
            lookup,
        }
    }

    /// The dual graph; labels equal dense indices equal face positions.
    pub fn graph(&self) -> &Graph<usize> {
        &self.graph
    }

    /// Faces in dual node order.
    pub fn faces(&self) -> &[Face<N>] {
        &self.faces
    }

    /// The single clockwise face, if the embedding has any edges.
    pub fn external_face(&self) -> Option<&Face<N>> {
        self.faces.first()
    }

    /// Dual node of `face`, which must already be canonical.
    pub fn face_index(&self, face: &Face<N>) -> Option<usize> {
        self.lookup.get(face).copied()
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns whether the embedding was empty.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Splits into the dual graph and the face list.
    pub fn into_parts(self) -> (Graph<usize>, Vec<Face<N>>) {
        (self.graph, self.faces)
    }
}

/// Extracts the dual of the straight-line drawing `positions` of `graph`.
///
/// The graph must be connected, bridge-free and have at least two nodes; the
/// drawing must give every node a distinct coordinate and have no crossing
/// edges. The empty graph yields an empty dual.
#[instrument(skip_all, fields(nodes = graph.len(), edges = graph.edges().len()))]
pub fn dual_graph<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
) -> Result<DualGraph<N>, GcolError> {
    if graph.is_empty() {
        return Ok(DualGraph::new(Graph::new(), Vec::new()));
    }
    if graph.len() == 1 {
        return Err(structure_error("singleton-graph", "a single node has no faces to extract"));
    }
    let points = node_points(graph, positions)?;
    validate_structure(graph)?;
    if let Some((i, j)) = find_crossing(&segments(graph, &points)) {
        let (a, b) = graph.edges()[i];
        let (c, d) = graph.edges()[j];
        return Err(geometry_error("crossing-edges", "drawing has crossing edges")
            .with_context("first", format!("{:?}-{:?}", graph.label(a), graph.label(b)))
            .with_context("second", format!("{:?}-{:?}", graph.label(c), graph.label(d))));
    }

    let rotation = rotation_system(graph, &points)?;
    let mut walks = trace_faces(graph, &rotation)?;
    let expected = graph.edges().len() + 2 - graph.len();
    if walks.len() != expected {
        return Err(geometry_error("euler-mismatch", "traced faces disagree with Euler's formula")
            .with_context("traced", walks.len())
            .with_context("expected", expected));
    }

    let external = external_face(&walks, &points)?;
    walks.swap(0, external);
    debug!(faces = walks.len(), "traced faces");

    let dual = dual_edges(graph, &walks)?;
    let faces = walks
        .iter()
        .map(|walk| Face::new(walk.iter().map(|&(u, _)| graph.label(u).clone()).collect()))
        .collect();
    Ok(DualGraph::new(dual, faces))
}

fn node_points<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
) -> Result<Vec<Point>, GcolError> {
    let mut points = Vec::with_capacity(graph.len());
    for label in graph.labels() {
        let &(x, y) = positions.get(label).ok_or_else(|| {
            geometry_error("missing-position", "node has no coordinate")
                .with_context("node", format!("{label:?}"))
        })?;
        if !x.is_finite() || !y.is_finite() {
            return Err(geometry_error("non-finite-position", "coordinates must be finite")
                .with_context("node", format!("{label:?}")));
        }
        points.push((x, y));
    }
    if let Some(extra) = positions.keys().find(|label| graph.index_of(label).is_none()) {
        return Err(parameter_error("unknown-node", "coordinate given for a node that is not in the graph")
            .with_context("node", format!("{extra:?}")));
    }
    let mut sorted = points.clone();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(geometry_error("duplicate-position", "two nodes share a coordinate")
            .with_context("x", pair[0].0)
            .with_context("y", pair[0].1));
    }
    Ok(points)
}

fn validate_structure<N: NodeLabel>(graph: &Graph<N>) -> Result<(), GcolError> {
    if !is_connected(graph) {
        return Err(structure_error("not-connected", "graph must be connected"));
    }
    if !within_planar_edge_bound(graph) {
        return Err(structure_error("not-planar", "graph has more than 3n - 6 edges")
            .with_context("nodes", graph.len())
            .with_context("edges", graph.edges().len()));
    }
    if !is_planar(graph) {
        return Err(structure_error("not-planar", "graph has no crossing-free drawing")
            .with_hint("it contains a subdivision of K5 or K3,3"));
    }
    if has_bridges(graph) {
        return Err(structure_error("has-bridge", "graph must be bridge-free")
            .with_hint("a bridge borders the same face on both sides"));
    }
    Ok(())
}

fn segments<N: NodeLabel>(graph: &Graph<N>, points: &[Point]) -> Vec<(Point, Point)> {
    graph
        .edges()
        .iter()
        .map(|&(u, v)| (points[u], points[v]))
        .collect()
}

/// Neighbours of every node sorted counterclockwise by bearing. Ties in
/// bearing are an ambiguous drawing and rejected.
fn rotation_system<N: NodeLabel>(
    graph: &Graph<N>,
    points: &[Point],
) -> Result<Vec<Vec<usize>>, GcolError> {
    let mut rotation = vec![Vec::new(); graph.len()];
    let mut counter = 0usize;
    for u in graph.canonical_order() {
        let mut around: Vec<(f64, usize, usize)> = graph
            .neighbors(u)
            .iter()
            .map(|&v| {
                counter += 1;
                (bearing(points[u], points[v]), counter, v)
            })
            .collect();
        around.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        if let Some(pair) = around.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(geometry_error("tied-bearing", "two neighbours lie on the same bearing")
                .with_context("node", format!("{:?}", graph.label(u)))
                .with_context("first", format!("{:?}", graph.label(pair[0].2)))
                .with_context("second", format!("{:?}", graph.label(pair[1].2)))
                .with_context("bearing", pair[0].0));
        }
        rotation[u] = around.into_iter().map(|(_, _, v)| v).collect();
    }
    Ok(rotation)
}

/// Follows the successor permutation on arcs until every arc belongs to a
/// closed walk.
fn trace_faces<N: NodeLabel>(
    graph: &Graph<N>,
    rotation: &[Vec<usize>],
) -> Result<Vec<Vec<Arc>>, GcolError> {
    // Entering `u` along `w -> u` leaves along `u -> v`, where `v` precedes
    // `w` in the counterclockwise order around `u`.
    let mut successor: IndexMap<Arc, Arc> = IndexMap::with_capacity(graph.edges().len() * 2);
    for u in graph.canonical_order() {
        let around = &rotation[u];
        for (i, &v) in around.iter().enumerate() {
            let w = around[(i + 1) % around.len()];
            successor.insert((w, u), (u, v));
        }
    }

    let mut visited = vec![false; successor.len()];
    let mut walks = Vec::new();
    for start_pos in 0..successor.len() {
        if visited[start_pos] {
            continue;
        }
        let Some((&start, _)) = successor.get_index(start_pos) else {
            break;
        };
        let mut walk = Vec::new();
        let mut arc = start;
        loop {
            let (pos, _, &next) = successor.get_full(&arc).ok_or_else(|| {
                geometry_error("broken-rotation", "arc has no successor in the rotation system")
            })?;
            if visited[pos] {
                return Err(geometry_error("broken-rotation", "face walk revisited an arc"));
            }
            visited[pos] = true;
            walk.push(arc);
            arc = next;
            if arc == start {
                break;
            }
        }
        walks.push(walk);
    }
    Ok(walks)
}

fn external_face(walks: &[Vec<Arc>], points: &[Point]) -> Result<usize, GcolError> {
    let mut clockwise = Vec::new();
    for (idx, walk) in walks.iter().enumerate() {
        let polygon: Vec<Point> = walk.iter().map(|&(u, _)| points[u]).collect();
        if is_clockwise(&polygon)? {
            clockwise.push(idx);
        }
    }
    match clockwise.as_slice() {
        [only] => Ok(*only),
        _ => Err(geometry_error("no-external-face", "expected exactly one clockwise face")
            .with_context("clockwise_faces", clockwise.len())),
    }
}

fn dual_edges<N: NodeLabel>(graph: &Graph<N>, walks: &[Vec<Arc>]) -> Result<Graph<usize>, GcolError> {
    let mut borders: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for (face, walk) in walks.iter().enumerate() {
        for &(u, v) in walk {
            borders.entry((u.min(v), u.max(v))).or_default().push(face);
        }
    }
    let mut dual = Graph::new();
    for face in 0..walks.len() {
        dual.add_node(face);
    }
    for &(u, v) in graph.edges() {
        match borders.get(&(u.min(v), u.max(v))).map(Vec::as_slice) {
            Some(&[a, b]) if a != b => {
                dual.ensure_edge(a, b)?;
            }
            _ => {
                return Err(structure_error("has-bridge", "edge does not separate two faces")
                    .with_context("u", format!("{:?}", graph.label(u)))
                    .with_context("v", format!("{:?}", graph.label(v))))
            }
        }
    }
    Ok(dual)
}
