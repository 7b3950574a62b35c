use std::collections::BTreeMap;

use gcol_core::errors::{ErrorInfo, GcolError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::embedding::Positions;
use crate::graph::{Graph, NodeLabel};

/// On-disk description of a graph, optionally with weights and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize + Ord",
    deserialize = "N: DeserializeOwned + Ord"
))]
pub struct GraphDocument<N> {
    /// Node labels. Isolated nodes must be listed here.
    #[serde(default)]
    pub nodes: Vec<N>,
    /// Undirected edges.
    #[serde(default)]
    pub edges: Vec<(N, N)>,
    /// Optional node weights. Always written, since `bincode` needs every
    /// field present on read.
    #[serde(default)]
    pub weights: BTreeMap<N, f64>,
    /// Optional straight-line coordinates.
    #[serde(default)]
    pub positions: Option<Positions<N>>,
}

impl<N: NodeLabel> GraphDocument<N> {
    /// Captures a graph (and optionally its coordinates) into a document.
    pub fn from_graph(graph: &Graph<N>, positions: Option<&Positions<N>>) -> Self {
        let weights = if graph.is_weighted() {
            graph
                .labels()
                .iter()
                .enumerate()
                .map(|(idx, label)| (label.clone(), gcol_core::ColorableGraph::weight(graph, idx)))
                .collect()
        } else {
            BTreeMap::new()
        };
        Self {
            nodes: graph.labels().to_vec(),
            edges: graph
                .labelled_edges()
                .map(|(a, b)| (a.clone(), b.clone()))
                .collect(),
            weights,
            positions: positions.cloned(),
        }
    }

    /// Rebuilds the graph, validating edges and weights.
    pub fn into_parts(self) -> Result<(Graph<N>, Option<Positions<N>>), GcolError> {
        let mut graph = Graph::from_edges(self.nodes, self.edges)?;
        for (label, weight) in &self.weights {
            graph.set_weight(label, *weight)?;
        }
        Ok((graph, self.positions))
    }
}

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes<N>(graph: &Graph<N>) -> Result<Vec<u8>, GcolError>
where
    N: NodeLabel + Serialize,
{
    bincode::serialize(&GraphDocument::from_graph(graph, None))
        .map_err(|err| GcolError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes<N>(bytes: &[u8]) -> Result<Graph<N>, GcolError>
where
    N: NodeLabel + DeserializeOwned,
{
    let document: GraphDocument<N> = bincode::deserialize(bytes)
        .map_err(|err| GcolError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    Ok(document.into_parts()?.0)
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json<N>(graph: &Graph<N>) -> Result<String, GcolError>
where
    N: NodeLabel + Serialize,
{
    serde_json::to_string_pretty(&GraphDocument::from_graph(graph, None))
        .map_err(|err| GcolError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Parses a JSON document into a graph and optional coordinates.
pub fn document_from_json<N>(json: &str) -> Result<(Graph<N>, Option<Positions<N>>), GcolError>
where
    N: NodeLabel + DeserializeOwned,
{
    let document: GraphDocument<N> = serde_json::from_str(json)
        .map_err(|err| GcolError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    document.into_parts()
}

/// Restores a graph from a JSON string, discarding coordinates.
pub fn graph_from_json<N>(json: &str) -> Result<Graph<N>, GcolError>
where
    N: NodeLabel + DeserializeOwned,
{
    Ok(document_from_json(json)?.0)
}
