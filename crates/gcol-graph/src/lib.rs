#![deny(missing_docs)]

//! Graph model for the gcol coloring engine: a simple undirected graph over
//! ordered labels, structural predicates, deterministic generators and
//! (de)serialization helpers.

mod embedding;
mod generators;
mod graph;
mod hash;
mod planarity;
mod predicates;
mod serialization;

pub use embedding::{Embedding, Positions};
pub use generators::{
    complete_graph, cube, cycle_graph, dodecahedron, gnp_random, jittered_triangulation,
    path_graph, square_with_diagonal, wheel,
};
pub use graph::{Graph, NodeLabel};
pub use hash::canonical_hash;
pub use planarity::is_planar;
pub use predicates::{bridges, has_bridges, is_connected, within_planar_edge_bound};
pub use serialization::{
    document_from_json, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    GraphDocument,
};
