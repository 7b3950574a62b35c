#![deny(missing_docs)]

//! Colouring engine for the nodes and faces of graphs.
//!
//! A solve constructs a proper colouring (random order, Welsh–Powell,
//! DSatur or RLF) and optionally improves it with exact branch and bound,
//! TabuCol, PartialCol or the hybrid evolutionary algorithm. Precolouring
//! and list colouring reduce to plain colouring, so every mode supports
//! them. Face operations colour the planar dual.

mod adjacency;
mod api;
mod clique;
pub mod config;
pub mod construct;
mod equitable;
pub mod exact;
mod face;
pub mod hea;
mod labels;
mod local;
mod optimise;
mod partialcol;
mod reduce;
mod tabucol;

pub use adjacency::Adjacency;
pub use api::{
    chromatic_number, coloring, conflicts, equitable_k_coloring, is_proper, k_coloring,
    list_coloring, partition, precoloring, Coloring,
};
pub use clique::greedy_clique;
pub use config::{ExactConfig, HeaConfig, OptMode, SolveConfig, Strategy, TabuConfig};
pub use equitable::balance;
pub use face::{
    dual_equitable_face_k_coloring, dual_face_chromatic_number, dual_face_coloring,
    dual_face_k_coloring, dual_face_list_coloring, dual_face_precoloring,
    equitable_face_k_coloring, face_chromatic_number, face_coloring, face_k_coloring,
    face_list_coloring, face_precoloring, FaceColoring,
};
pub use local::{LocalOutcome, Neighborhood};
pub use optimise::{minimise_colors, reach_k};
pub use partialcol::partialcol;
pub use tabucol::tabucol;
