#![deny(missing_docs)]

//! Planar dual extraction.
//!
//! Turns a connected, bridge-free graph with a crossing-free straight-line
//! drawing into its dual graph, so that face colouring reduces to node
//! colouring.

mod dual;
mod face;
pub mod geometry;
mod sweep;

pub use dual::{dual_graph, DualGraph};
pub use face::Face;
pub use sweep::find_crossing;
