use std::collections::{BTreeMap, BTreeSet};

use gcol_core::Color;
use gcol_graph::{canonical_hash, Graph, NodeLabel};
use gcol_planar::{DualGraph, Face};
use gcol_solve::{conflicts, partition, Coloring, FaceColoring, SolveConfig};
use serde::{Deserialize, Serialize};

/// Solver settings echoed into every report.
#[derive(Debug, Serialize)]
pub struct SolverEcho {
    pub strategy: String,
    pub opt_mode: String,
    pub it_limit: u64,
    pub seed: u64,
}

impl SolverEcho {
    fn new(config: &SolveConfig) -> Self {
        Self {
            strategy: config.strategy.to_string(),
            opt_mode: config.opt_mode.to_string(),
            it_limit: config.it_limit,
            seed: config.seed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NodeColor<N> {
    pub node: N,
    pub color: Color,
}

#[derive(Debug, Serialize)]
pub struct NodeReport<N> {
    pub command: &'static str,
    pub graph_hash: String,
    pub nodes: usize,
    pub edges: usize,
    pub solver: SolverEcho,
    pub colors: usize,
    pub conflicts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromatic_number: Option<usize>,
    pub classes: Vec<Vec<N>>,
    pub coloring: Vec<NodeColor<N>>,
}

impl<N: NodeLabel + Serialize> NodeReport<N> {
    pub fn new(command: &'static str, graph: &Graph<N>, coloring: &Coloring<N>, config: &SolveConfig) -> Self {
        Self {
            command,
            graph_hash: canonical_hash(graph),
            nodes: graph.len(),
            edges: graph.edges().len(),
            solver: SolverEcho::new(config),
            colors: distinct(coloring.values()),
            conflicts: conflicts(graph, coloring),
            chromatic_number: None,
            classes: partition(coloring),
            coloring: coloring
                .iter()
                .map(|(node, &color)| NodeColor {
                    node: node.clone(),
                    color,
                })
                .collect(),
        }
    }
}

/// One face with its colour; also the input format for face precolourings.
#[derive(Debug, Serialize, Deserialize)]
pub struct FaceColor<N> {
    pub face: Vec<N>,
    pub color: Color,
}

/// Candidate colours for one face.
#[derive(Debug, Deserialize)]
pub struct FaceList<N> {
    pub face: Vec<N>,
    pub colors: BTreeSet<Color>,
}

#[derive(Debug, Serialize)]
pub struct FaceReport<N> {
    pub command: &'static str,
    pub graph_hash: String,
    pub nodes: usize,
    pub edges: usize,
    pub faces: usize,
    pub external_face: Vec<N>,
    pub solver: SolverEcho,
    pub colors: usize,
    pub conflicts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromatic_number: Option<usize>,
    pub coloring: Vec<FaceColor<N>>,
}

impl<N: NodeLabel + Serialize> FaceReport<N> {
    pub fn new(graph: &Graph<N>, dual: &DualGraph<N>, coloring: &FaceColoring<N>, config: &SolveConfig) -> Self {
        let by_index: Coloring<usize> = coloring
            .iter()
            .filter_map(|(face, &color)| dual.face_index(face).map(|idx| (idx, color)))
            .collect();
        Self {
            command: "faces",
            graph_hash: canonical_hash(graph),
            nodes: graph.len(),
            edges: graph.edges().len(),
            faces: dual.len(),
            external_face: dual.external_face().map(|face| face.nodes().to_vec()).unwrap_or_default(),
            solver: SolverEcho::new(config),
            colors: distinct(coloring.values()),
            conflicts: conflicts(dual.graph(), &by_index),
            chromatic_number: None,
            coloring: dual
                .faces()
                .iter()
                .filter_map(|face| {
                    coloring.get(face).map(|&color| FaceColor {
                        face: face.nodes().to_vec(),
                        color,
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DualReport<N> {
    pub command: &'static str,
    pub graph_hash: String,
    pub nodes: usize,
    pub edges: usize,
    /// Faces in dual index order; index 0 is the external face.
    pub faces: Vec<Vec<N>>,
    pub dual_edges: Vec<(usize, usize)>,
}

impl<N: NodeLabel + Serialize> DualReport<N> {
    pub fn new(graph: &Graph<N>, dual: &DualGraph<N>) -> Self {
        let mut dual_edges: Vec<(usize, usize)> = dual
            .graph()
            .edges()
            .iter()
            .map(|&(u, v)| (u.min(v), u.max(v)))
            .collect();
        dual_edges.sort_unstable();
        Self {
            command: "dual",
            graph_hash: canonical_hash(graph),
            nodes: graph.len(),
            edges: graph.edges().len(),
            faces: dual.faces().iter().map(|face| face.nodes().to_vec()).collect(),
            dual_edges,
        }
    }
}

pub fn face_map<N: NodeLabel>(entries: Vec<FaceColor<N>>) -> BTreeMap<Face<N>, Color> {
    entries
        .into_iter()
        .map(|entry| (Face::new(entry.face), entry.color))
        .collect()
}

pub fn face_lists<N: NodeLabel>(entries: Vec<FaceList<N>>) -> BTreeMap<Face<N>, BTreeSet<Color>> {
    entries
        .into_iter()
        .map(|entry| (Face::new(entry.face), entry.colors))
        .collect()
}

fn distinct<'a>(colors: impl Iterator<Item = &'a Color>) -> usize {
    colors.collect::<BTreeSet<_>>().len()
}
