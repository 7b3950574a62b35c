use gcol_core::errors::GcolError;
use gcol_core::ColorableGraph;
use gcol_graph::Graph;

#[test]
fn self_loops_are_rejected() {
    let mut graph: Graph<&str> = Graph::new();
    let err = graph.add_edge("a", "a").unwrap_err();
    match err {
        GcolError::Structure(info) => {
            assert_eq!(info.code, "self-loop");
            assert_eq!(info.context.get("node"), Some(&"\"a\"".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parallel_edges_are_rejected_in_either_direction() {
    let mut graph: Graph<u32> = Graph::new();
    graph.add_edge(1, 2).unwrap();
    let err = graph.add_edge(2, 1).unwrap_err();
    assert_eq!(err.code(), "parallel-edge");
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.ensure_edge(0, 1).unwrap());
}

#[test]
fn adjacency_is_symmetric_and_ordered_by_insertion() {
    let graph = Graph::from_edges([10u32, 20, 30], [(10, 30), (10, 20), (20, 30)]).unwrap();
    let a = graph.index_of(&10).unwrap();
    let b = graph.index_of(&20).unwrap();
    let c = graph.index_of(&30).unwrap();
    assert_eq!(graph.neighbors(a), &[c, b]);
    for u in 0..graph.node_count() {
        for &v in graph.neighbors(u) {
            assert!(graph.neighbors(v).contains(&u));
        }
    }
}

#[test]
fn canonical_order_follows_labels() {
    let graph = Graph::from_edges(["c", "a", "b"], [("a", "c")]).unwrap();
    let labels: Vec<_> = graph
        .canonical_order()
        .into_iter()
        .map(|idx| *graph.label(idx))
        .collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
}

#[test]
fn weights_are_validated() {
    let mut graph = Graph::from_edges([1u8, 2], [(1, 2)]).unwrap();
    assert!(!graph.is_weighted());
    graph.set_weight(&2, 3.5).unwrap();
    assert!(graph.is_weighted());
    assert_eq!(graph.weight(graph.index_of(&2).unwrap()), 3.5);
    assert_eq!(graph.set_weight(&1, -1.0).unwrap_err().code(), "invalid-weight");
    assert_eq!(graph.set_weight(&9, 1.0).unwrap_err().code(), "unknown-node");
}
