use gcol_core::rng::RngHandle;
use gcol_core::ColorableGraph;
use gcol_graph::{
    complete_graph, cube, cycle_graph, dodecahedron, gnp_random, has_bridges, is_connected,
    is_planar, jittered_triangulation, path_graph, square_with_diagonal, wheel,
    within_planar_edge_bound,
};
use proptest::prelude::*;

#[test]
fn dodecahedron_is_cubic_with_thirty_edges() {
    let embedding = dodecahedron();
    let graph = &embedding.graph;
    assert_eq!(graph.node_count(), 20);
    assert_eq!(graph.edge_count(), 30);
    for u in 0..20 {
        assert_eq!(graph.degree(u), 3);
    }
    assert_eq!(embedding.positions.len(), 20);
    assert_eq!(embedding.expected_faces(), 12);
    assert!(is_connected(graph));
    assert!(!has_bridges(graph));
}

#[test]
fn small_embeddings_have_expected_face_counts() {
    assert_eq!(square_with_diagonal().expected_faces(), 3);
    assert_eq!(cube().expected_faces(), 6);
    assert_eq!(wheel(5).unwrap().expected_faces(), 6);
    assert_eq!(wheel(2).unwrap_err().code(), "rim-too-short");
}

#[test]
fn generators_keep_every_edge_they_draw() {
    assert_eq!(path_graph(6).edge_count(), 5);
    assert_eq!(square_with_diagonal().graph.edge_count(), 5);
    assert_eq!(cube().graph.edge_count(), 12);
    for rim in 3..9 {
        let graph = wheel(rim).unwrap().graph;
        assert_eq!(graph.edge_count(), 2 * rim);
        assert!(is_planar(&graph));
    }
}

#[test]
fn fixed_families_have_expected_sizes() {
    assert_eq!(complete_graph(5).edge_count(), 10);
    assert_eq!(cycle_graph(7).unwrap().edge_count(), 7);
    assert!(cycle_graph(2).is_err());
    let mut rng = RngHandle::from_seed(3);
    assert_eq!(gnp_random(6, 1.0, &mut rng).unwrap().edge_count(), 15);
    assert!(gnp_random(6, 1.5, &mut rng).is_err());
}

proptest! {
    #[test]
    fn triangulations_are_connected_bridge_free_and_sparse(
        seed in any::<u64>(),
        rows in 2usize..7,
        cols in 2usize..7,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let embedding = jittered_triangulation(rows, cols, 0.15, &mut rng).unwrap();
        let graph = &embedding.graph;
        prop_assert_eq!(graph.node_count(), rows * cols);
        prop_assert_eq!(
            graph.edge_count(),
            rows * (cols - 1) + cols * (rows - 1) + (rows - 1) * (cols - 1)
        );
        prop_assert!(is_connected(graph));
        prop_assert!(!has_bridges(graph));
        prop_assert!(within_planar_edge_bound(graph));
        prop_assert!(is_planar(graph));
    }
}
