use std::collections::{BTreeMap, BTreeSet};

use gcol_core::rng::RngHandle;
use gcol_graph::{cube, dodecahedron, jittered_triangulation, square_with_diagonal, Graph, Positions};
use gcol_planar::{dual_graph, Face};
use gcol_solve::{
    dual_face_chromatic_number, dual_face_coloring, dual_face_k_coloring, dual_face_precoloring,
    equitable_face_k_coloring, face_chromatic_number, face_coloring, face_k_coloring,
    face_list_coloring, face_precoloring, FaceColoring, OptMode, SolveConfig, Strategy,
};
use proptest::prelude::*;

/// Checks that faces sharing an edge differ and returns the colour count.
fn assert_proper_faces(graph: &Graph<usize>, positions: &Positions<usize>, colors: &FaceColoring<usize>) -> usize {
    let dual = dual_graph(graph, positions).unwrap();
    assert_eq!(colors.len(), dual.len());
    for &(a, b) in dual.graph().edges() {
        let fa = &dual.faces()[a];
        let fb = &dual.faces()[b];
        assert_ne!(colors[fa], colors[fb], "{fa:?} and {fb:?}");
    }
    colors.values().collect::<BTreeSet<_>>().len()
}

#[test]
fn dodecahedron_faces_need_at_most_four_colours() {
    let embedding = dodecahedron();
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Tabucol, 10_000);
    let colors = face_coloring(&embedding.graph, &embedding.positions, &config).unwrap();
    assert_eq!(colors.len(), 12);
    assert!(assert_proper_faces(&embedding.graph, &embedding.positions, &colors) <= 4);
}

#[test]
fn face_chromatic_numbers() {
    let cube = cube();
    assert_eq!(face_chromatic_number(&cube.graph, &cube.positions).unwrap(), 3);
    let dodecahedron = dodecahedron();
    assert_eq!(
        face_chromatic_number(&dodecahedron.graph, &dodecahedron.positions).unwrap(),
        4
    );
    let square = square_with_diagonal();
    assert_eq!(face_chromatic_number(&square.graph, &square.positions).unwrap(), 3);
    assert_eq!(face_chromatic_number(&Graph::<usize>::new(), &Positions::new()).unwrap(), 0);
}

#[test]
fn opposite_cube_faces_keep_their_precolours() {
    let embedding = cube();
    let outside = Face::new(vec![1, 0, 3, 2]);
    let inside = Face::new(vec![6, 7, 4, 5]);
    let fixed: BTreeMap<Face<usize>, usize> = [(outside.clone(), 0), (inside.clone(), 1)].into_iter().collect();
    let colors = face_precoloring(&embedding.graph, &embedding.positions, &fixed, &SolveConfig::default()).unwrap();
    assert_eq!(colors[&outside], 0);
    assert_eq!(colors[&inside], 1);
    // Opposite faces now differ, so the four side faces need two more colours.
    assert_eq!(assert_proper_faces(&embedding.graph, &embedding.positions, &colors), 4);
}

#[test]
fn unknown_faces_are_rejected() {
    let embedding = cube();
    let fixed: BTreeMap<Face<usize>, usize> = [(Face::new(vec![0, 1, 2]), 0)].into_iter().collect();
    let err = face_precoloring(&embedding.graph, &embedding.positions, &fixed, &SolveConfig::default())
        .unwrap_err();
    assert_eq!(err.code(), "unknown-face");
}

#[test]
fn face_k_colourings() {
    let embedding = cube();
    let exact = SolveConfig::new(Strategy::Dsatur, OptMode::Exact, 0);
    let four = face_k_coloring(&embedding.graph, &embedding.positions, 4, &exact).unwrap();
    assert_eq!(assert_proper_faces(&embedding.graph, &embedding.positions, &four), 4);
    let err = face_k_coloring(&embedding.graph, &embedding.positions, 2, &exact).unwrap_err();
    assert!(err.is_proven_infeasible());

    let balanced = equitable_face_k_coloring(&embedding.graph, &embedding.positions, 3, &exact).unwrap();
    assert_eq!(assert_proper_faces(&embedding.graph, &embedding.positions, &balanced), 3);
    let mut sizes = BTreeMap::new();
    for color in balanced.values() {
        *sizes.entry(*color).or_insert(0) += 1;
    }
    assert!(sizes.values().all(|&size| size == 2));
}

#[test]
fn face_lists_are_respected() {
    let embedding = square_with_diagonal();
    let dual = dual_graph(&embedding.graph, &embedding.positions).unwrap();
    let external = dual.external_face().unwrap().clone();
    let lists: BTreeMap<Face<usize>, BTreeSet<usize>> = dual
        .faces()
        .iter()
        .map(|face| {
            let list: BTreeSet<usize> = if *face == external { [5].into() } else { [5, 6, 7].into() };
            (face.clone(), list)
        })
        .collect();
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Exact, 0);
    let colors = face_list_coloring(&embedding.graph, &embedding.positions, &lists, &config).unwrap();
    assert_eq!(colors[&external], 5);
    assert_proper_faces(&embedding.graph, &embedding.positions, &colors);

    let mut missing = lists.clone();
    missing.remove(&external);
    let err = face_list_coloring(&embedding.graph, &embedding.positions, &missing, &config).unwrap_err();
    assert_eq!(err.code(), "missing-list");
}

#[test]
fn one_dual_serves_every_face_operation() {
    let embedding = cube();
    let dual = dual_graph(&embedding.graph, &embedding.positions).unwrap();
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Exact, 0);

    assert_eq!(
        dual_face_coloring(&dual, &config).unwrap(),
        face_coloring(&embedding.graph, &embedding.positions, &config).unwrap()
    );
    assert_eq!(
        dual_face_k_coloring(&dual, 4, &config).unwrap(),
        face_k_coloring(&embedding.graph, &embedding.positions, 4, &config).unwrap()
    );
    assert_eq!(dual_face_chromatic_number(&dual), 3);

    let fixed: BTreeMap<Face<usize>, usize> = [(dual.faces()[0].clone(), 2)].into_iter().collect();
    let colors = dual_face_precoloring(&dual, &fixed, &config).unwrap();
    assert_eq!(colors[&dual.faces()[0]], 2);
    assert_eq!(colors.len(), dual.len());
}

#[test]
fn geometry_errors_surface_from_face_operations() {
    let embedding = square_with_diagonal();
    let mut positions = embedding.positions.clone();
    positions.insert(3, (1.0, 0.0));
    let err = face_coloring(&embedding.graph, &positions, &SolveConfig::default()).unwrap_err();
    assert_eq!(err.code(), "duplicate-position");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn triangulation_face_colourings_are_proper(seed in any::<u64>(), rows in 2usize..6, cols in 2usize..6) {
        let mut rng = RngHandle::from_seed(seed);
        let embedding = jittered_triangulation(rows, cols, 0.15, &mut rng).unwrap();
        let config = SolveConfig::new(Strategy::Dsatur, OptMode::Tabucol, 500);
        let colors = face_coloring(&embedding.graph, &embedding.positions, &config).unwrap();
        prop_assert_eq!(colors.len(), embedding.expected_faces());
        let used = assert_proper_faces(&embedding.graph, &embedding.positions, &colors);
        prop_assert!(used <= 4);
    }
}
