//! Face colouring: node colouring of the planar dual.
//!
//! Every wrapper extracts the dual of the straight-line drawing, runs the
//! matching node operation on it and keys the result by canonical face.
//! The `dual_*` forms take a dual extracted once by the caller.
//! Two faces sharing an edge always receive different colours.

use std::collections::{BTreeMap, BTreeSet};

use gcol_core::errors::GcolError;
use gcol_core::{parameter_error, Color};
use gcol_graph::{Graph, NodeLabel, Positions};
use gcol_planar::{dual_graph, DualGraph, Face};

use crate::api::{self, Coloring};
use crate::config::SolveConfig;

/// Colour assigned to every face, keyed by canonical boundary walk.
pub type FaceColoring<N> = BTreeMap<Face<N>, Color>;

/// Face colouring with as few colours as the configuration finds.
pub fn face_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    config.validate()?;
    dual_face_coloring(&dual_graph(graph, positions)?, config)
}

/// Face colouring with exactly `min(k, faces)` colours; see
/// [`api::k_coloring`] for the failure rules.
pub fn face_k_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
    k: usize,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    config.validate()?;
    dual_face_k_coloring(&dual_graph(graph, positions)?, k, config)
}

/// Face `k`-colouring with balanced class sizes.
pub fn equitable_face_k_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
    k: usize,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    config.validate()?;
    dual_equitable_face_k_coloring(&dual_graph(graph, positions)?, k, config)
}

/// Extends a colouring of some faces to all of them.
///
/// Keys may be built from any rotation of a boundary walk, since [`Face`]
/// canonicalises on construction. Faces that are not in the drawing are
/// rejected.
pub fn face_precoloring<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
    fixed: &BTreeMap<Face<N>, Color>,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    config.validate()?;
    dual_face_precoloring(&dual_graph(graph, positions)?, fixed, config)
}

/// Colours every face from its candidate list. Lists are required for every
/// face of the drawing; an empty map is plain [`face_coloring`].
pub fn face_list_coloring<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
    lists: &BTreeMap<Face<N>, BTreeSet<Color>>,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    config.validate()?;
    dual_face_list_coloring(&dual_graph(graph, positions)?, lists, config)
}

/// Minimum number of colours in a face colouring of the drawing.
pub fn face_chromatic_number<N: NodeLabel>(
    graph: &Graph<N>,
    positions: &Positions<N>,
) -> Result<usize, GcolError> {
    let dual = dual_graph(graph, positions)?;
    Ok(dual_face_chromatic_number(&dual))
}

/// [`face_coloring`] on an already extracted dual.
pub fn dual_face_coloring<N: NodeLabel>(
    dual: &DualGraph<N>,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    let colors = api::coloring(dual.graph(), config)?;
    Ok(by_face(dual, colors))
}

/// [`face_k_coloring`] on an already extracted dual.
pub fn dual_face_k_coloring<N: NodeLabel>(
    dual: &DualGraph<N>,
    k: usize,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    let colors = api::k_coloring(dual.graph(), k, config)?;
    Ok(by_face(dual, colors))
}

/// [`equitable_face_k_coloring`] on an already extracted dual.
pub fn dual_equitable_face_k_coloring<N: NodeLabel>(
    dual: &DualGraph<N>,
    k: usize,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    let colors = api::equitable_k_coloring(dual.graph(), k, config)?;
    Ok(by_face(dual, colors))
}

/// [`face_precoloring`] on an already extracted dual.
pub fn dual_face_precoloring<N: NodeLabel>(
    dual: &DualGraph<N>,
    fixed: &BTreeMap<Face<N>, Color>,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    if fixed.is_empty() {
        return dual_face_coloring(dual, config);
    }
    let mut dense = BTreeMap::new();
    for (face, &color) in fixed {
        dense.insert(face_index(dual, face)?, color);
    }
    let colors = api::precoloring(dual.graph(), &dense, config)?;
    Ok(by_face(dual, colors))
}

/// [`face_list_coloring`] on an already extracted dual.
pub fn dual_face_list_coloring<N: NodeLabel>(
    dual: &DualGraph<N>,
    lists: &BTreeMap<Face<N>, BTreeSet<Color>>,
    config: &SolveConfig,
) -> Result<FaceColoring<N>, GcolError> {
    if lists.is_empty() {
        return dual_face_coloring(dual, config);
    }
    let mut dense = BTreeMap::new();
    for (face, list) in lists {
        dense.insert(face_index(dual, face)?, list.clone());
    }
    if let Some(face) = dual
        .faces()
        .iter()
        .enumerate()
        .find(|(idx, _)| !dense.contains_key(idx))
        .map(|(_, face)| face)
    {
        return Err(parameter_error("missing-list", "every face needs a candidate list")
            .with_context("face", format!("{face:?}")));
    }
    let colors = api::list_coloring(dual.graph(), &dense, config)?;
    Ok(by_face(dual, colors))
}

/// [`face_chromatic_number`] on an already extracted dual.
pub fn dual_face_chromatic_number<N: NodeLabel>(dual: &DualGraph<N>) -> usize {
    api::chromatic_number(dual.graph())
}

fn face_index<N: NodeLabel>(dual: &DualGraph<N>, face: &Face<N>) -> Result<usize, GcolError> {
    dual.face_index(face).ok_or_else(|| {
        parameter_error("unknown-face", "face is not part of the drawing")
            .with_context("face", format!("{face:?}"))
    })
}

fn by_face<N: NodeLabel>(dual: &DualGraph<N>, colors: Coloring<usize>) -> FaceColoring<N> {
    colors
        .into_iter()
        .filter_map(|(idx, color)| dual.faces().get(idx).map(|face| (face.clone(), color)))
        .collect()
}
