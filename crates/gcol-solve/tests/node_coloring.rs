use std::collections::{BTreeMap, BTreeSet};

use gcol_core::colors_used;
use gcol_core::errors::GcolError;
use gcol_graph::{complete_graph, cycle_graph, dodecahedron, square_with_diagonal, wheel, Graph};
use gcol_solve::{
    chromatic_number, coloring, conflicts, equitable_k_coloring, is_proper, k_coloring,
    list_coloring, partition, precoloring, Coloring, OptMode, SolveConfig, Strategy,
};

fn crown(n: usize) -> Graph<usize> {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i != j {
                edges.push((2 * i, 2 * j + 1));
            }
        }
    }
    Graph::from_edges(0..2 * n, edges).unwrap()
}

fn used<N: Ord>(coloring: &Coloring<N>) -> usize {
    colors_used(&coloring.values().copied().collect::<Vec<_>>())
}

#[test]
fn dsatur_colours_square_with_diagonal_with_three_colours() {
    let graph = square_with_diagonal().graph;
    let result = coloring(&graph, &SolveConfig::default()).unwrap();
    assert_eq!(used(&result), 3);
    assert_ne!(result[&0], result[&2]);
    for corner in [1, 3] {
        assert_ne!(result[&0], result[&corner]);
        assert_ne!(result[&2], result[&corner]);
    }
    // Class 0 is the largest class.
    assert_eq!(result[&1], 0);
    assert_eq!(result[&3], 0);
}

#[test]
fn every_mode_reduces_a_bad_construction_to_two_colours() {
    let graph = crown(6);
    let base = SolveConfig::new(Strategy::WelshPowell, OptMode::None, 0);
    assert_eq!(used(&coloring(&graph, &base).unwrap()), 6);
    for mode in [
        OptMode::Exact,
        OptMode::Tabucol,
        OptMode::Partialcol,
        OptMode::HeaTabucol,
        OptMode::HeaPartialcol,
    ] {
        let config = SolveConfig::new(Strategy::WelshPowell, mode, 50_000);
        let result = coloring(&graph, &config).unwrap();
        assert!(is_proper(&graph, &result), "{mode}");
        assert_eq!(used(&result), 2, "{mode}");
    }
}

#[test]
fn every_strategy_is_proper_on_the_dodecahedron() {
    let graph = dodecahedron().graph;
    for strategy in [Strategy::Random, Strategy::WelshPowell, Strategy::Dsatur, Strategy::Rlf] {
        let config = SolveConfig::new(strategy, OptMode::Tabucol, 2_000);
        let result = coloring(&graph, &config).unwrap();
        assert!(is_proper(&graph, &result), "{strategy}");
        assert_eq!(used(&result), 3, "{strategy}");
    }
}

#[test]
fn same_seed_same_colouring() {
    let graph = crown(5);
    let mut config = SolveConfig::new(Strategy::Random, OptMode::HeaPartialcol, 5_000);
    config.seed = 42;
    let first = coloring(&graph, &config).unwrap();
    let second = coloring(&graph, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn exact_k_colouring_decides_feasibility() {
    let graph = dodecahedron().graph;
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Exact, 0);
    let three = k_coloring(&graph, 3, &config).unwrap();
    assert!(is_proper(&graph, &three));
    assert_eq!(used(&three), 3);

    let err = k_coloring(&graph, 2, &config).unwrap_err();
    assert!(matches!(err, GcolError::Infeasible(_)));
    assert_eq!(err.code(), "k-infeasible");
    assert!(err.is_proven_infeasible());
}

#[test]
fn heuristic_failure_is_not_a_proof() {
    let graph = cycle_graph(7).unwrap();
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Tabucol, 200);
    let err = k_coloring(&graph, 2, &config).unwrap_err();
    assert_eq!(err.code(), "k-infeasible");
    assert!(!err.is_proven_infeasible());

    let clique = k_coloring(&complete_graph(4), 3, &config).unwrap_err();
    assert!(clique.is_proven_infeasible());
}

#[test]
fn k_colouring_uses_exactly_min_k_n_colours() {
    let graph = cycle_graph(6).unwrap();
    let config = SolveConfig::default();
    assert_eq!(used(&k_coloring(&graph, 4, &config).unwrap()), 4);
    assert_eq!(used(&k_coloring(&graph, 2, &config).unwrap()), 2);
    let path = Graph::from_edges(0..3, [(0, 1), (1, 2)]).unwrap();
    let wide = k_coloring(&path, 10, &config).unwrap();
    assert_eq!(used(&wide), 3);
    assert!(is_proper(&path, &wide));
    assert!(k_coloring(&Graph::<u8>::new(), 0, &config).unwrap().is_empty());
}

#[test]
fn equitable_colouring_balances_without_conflicts() {
    let mut graph = Graph::from_edges(0..7, (1..7).map(|leaf| (0, leaf))).unwrap();
    let config = SolveConfig::default();
    let result = equitable_k_coloring(&graph, 3, &config).unwrap();
    assert_eq!(conflicts(&graph, &result), 0);
    let sizes: Vec<usize> = partition(&result).iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 3, 1]);

    // A heavy leaf is balanced against several light ones.
    graph.set_weight(&1, 3.0).unwrap();
    let weighted = equitable_k_coloring(&graph, 3, &config).unwrap();
    assert_eq!(conflicts(&graph, &weighted), 0);
    let mut class_weight = BTreeMap::new();
    for (node, color) in &weighted {
        *class_weight.entry(*color).or_insert(0.0) += if *node == 1 { 3.0 } else { 1.0 };
    }
    let leaf_classes: Vec<f64> = class_weight
        .iter()
        .filter(|(color, _)| **color != weighted[&0])
        .map(|(_, w)| *w)
        .collect();
    assert_eq!(leaf_classes, vec![4.0, 4.0]);
}

#[test]
fn precoloring_keeps_fixed_colours() {
    let graph = wheel(6).unwrap().graph;
    let fixed: BTreeMap<usize, usize> = [(0, 4), (1, 2), (4, 2)].into_iter().collect();
    let result = precoloring(&graph, &fixed, &SolveConfig::default()).unwrap();
    for (node, color) in &fixed {
        assert_eq!(result[node], *color);
    }
    assert!(is_proper(&graph, &result));
    assert!(result.values().all(|&c| c <= 4));
}

#[test]
fn precoloring_rejects_bad_input() {
    let graph = cycle_graph(4).unwrap();
    let config = SolveConfig::default();
    let adjacent: BTreeMap<usize, usize> = [(0, 1), (1, 1)].into_iter().collect();
    assert_eq!(precoloring(&graph, &adjacent, &config).unwrap_err().code(), "precoloring-conflict");
    let unknown: BTreeMap<usize, usize> = [(9, 0)].into_iter().collect();
    assert_eq!(precoloring(&graph, &unknown, &config).unwrap_err().code(), "unknown-node");
}

#[test]
fn list_colouring_respects_lists() {
    let graph = cycle_graph(5).unwrap();
    let lists: BTreeMap<usize, BTreeSet<usize>> = (0..5)
        .map(|u| (u, [10, 20, 30 + u].into_iter().collect()))
        .collect();
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Exact, 0);
    let result = list_coloring(&graph, &lists, &config).unwrap();
    assert!(is_proper(&graph, &result));
    for (node, color) in &result {
        assert!(lists[node].contains(color));
    }

    let mut partial = lists.clone();
    partial.remove(&3);
    assert_eq!(list_coloring(&graph, &partial, &config).unwrap_err().code(), "missing-list");

    let two: BTreeMap<usize, BTreeSet<usize>> =
        (0..5).map(|u| (u, [1, 2].into_iter().collect())).collect();
    let err = list_coloring(&graph, &two, &config).unwrap_err();
    assert_eq!(err.code(), "list-infeasible");
    assert!(err.is_proven_infeasible());
}

#[test]
fn chromatic_numbers_of_small_families() {
    assert_eq!(chromatic_number(&Graph::<usize>::new()), 0);
    assert_eq!(chromatic_number(&complete_graph(5)), 5);
    assert_eq!(chromatic_number(&cycle_graph(9).unwrap()), 3);
    assert_eq!(chromatic_number(&wheel(5).unwrap().graph), 4);
    assert_eq!(chromatic_number(&wheel(6).unwrap().graph), 3);
    assert_eq!(chromatic_number(&crown(5)), 2);
}

#[test]
fn string_labels_are_supported() {
    let graph = Graph::from_edges(
        ["a", "b", "c"].map(String::from),
        [("a", "b"), ("b", "c")].map(|(x, y)| (x.to_string(), y.to_string())),
    )
    .unwrap();
    let result = coloring(&graph, &SolveConfig::default()).unwrap();
    assert_eq!(result["a"], result["c"]);
    assert_ne!(result["a"], result["b"]);
    assert_eq!(partition(&result), vec![vec!["a".to_string(), "c".to_string()], vec!["b".to_string()]]);
}
