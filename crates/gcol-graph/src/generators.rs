use std::f64::consts::{FRAC_PI_2, PI};

use gcol_core::errors::GcolError;
use gcol_core::{parameter_error, RngHandle};

use crate::embedding::{Embedding, Positions};
use crate::graph::Graph;

/// Path on `n` nodes.
pub fn path_graph(n: usize) -> Graph<usize> {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_node(i);
    }
    for i in 1..n {
        push(&mut graph, i - 1, i);
    }
    graph
}

/// Cycle on `n >= 3` nodes.
pub fn cycle_graph(n: usize) -> Result<Graph<usize>, GcolError> {
    if n < 3 {
        return Err(parameter_error("cycle-too-short", "a cycle needs at least three nodes")
            .with_context("n", n));
    }
    let mut graph = path_graph(n);
    push(&mut graph, n - 1, 0);
    Ok(graph)
}

/// Complete graph on `n` nodes.
pub fn complete_graph(n: usize) -> Graph<usize> {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_node(i);
    }
    for a in 0..n {
        for b in a + 1..n {
            push(&mut graph, a, b);
        }
    }
    graph
}

/// Erdős–Rényi `G(n, p)` with deterministic randomness.
pub fn gnp_random(n: usize, p: f64, rng: &mut RngHandle) -> Result<Graph<usize>, GcolError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(parameter_error("invalid-probability", "edge probability must lie in [0, 1]")
            .with_context("p", p));
    }
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_node(i);
    }
    for a in 0..n {
        for b in a + 1..n {
            if rng.unit() < p {
                push(&mut graph, a, b);
            }
        }
    }
    Ok(graph)
}

/// Unit square `0-1-2-3-0` with the diagonal `0-2`.
pub fn square_with_diagonal() -> Embedding<usize> {
    let mut graph = cycle_or_empty(4);
    push(&mut graph, 0, 2);
    let positions: Positions<usize> = [(0, (0.0, 0.0)), (1, (1.0, 0.0)), (2, (1.0, 1.0)), (3, (0.0, 1.0))]
        .into_iter()
        .collect();
    Embedding::new(graph, positions)
}

/// Wheel: hub `0` at the origin joined to a rim cycle `1..=rim`.
pub fn wheel(rim: usize) -> Result<Embedding<usize>, GcolError> {
    if rim < 3 {
        return Err(parameter_error("rim-too-short", "a wheel needs at least three rim nodes")
            .with_context("rim", rim));
    }
    let mut graph = Graph::new();
    let mut positions = Positions::new();
    graph.add_node(0);
    positions.insert(0, (0.0, 0.0));
    for i in 1..=rim {
        graph.add_node(i);
        positions.insert(i, polar(1.0, 2.0 * PI * (i - 1) as f64 / rim as f64));
    }
    for i in 1..=rim {
        push(&mut graph, 0, i);
        push(&mut graph, i, if i == rim { 1 } else { i + 1 });
    }
    Ok(Embedding::new(graph, positions))
}

/// Cube drawn as two nested squares: outer `0..4`, inner `4..8`.
pub fn cube() -> Embedding<usize> {
    let mut graph = Graph::new();
    let mut positions = Positions::new();
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    for (i, &(x, y)) in corners.iter().enumerate() {
        graph.add_node(i);
        positions.insert(i, (2.0 * x, 2.0 * y));
    }
    for (i, &(x, y)) in corners.iter().enumerate() {
        graph.add_node(i + 4);
        positions.insert(i + 4, (x, y));
    }
    for i in 0..4 {
        push(&mut graph, i, (i + 1) % 4);
        push(&mut graph, i + 4, (i + 1) % 4 + 4);
        push(&mut graph, i, i + 4);
    }
    Embedding::new(graph, positions)
}

/// Dodecahedron drawn as three concentric rings.
///
/// Outer pentagon `0..5`, middle decagon `5..15`, inner pentagon `15..20`;
/// all twelve faces are pentagons.
pub fn dodecahedron() -> Embedding<usize> {
    let mut graph = Graph::new();
    let mut positions = Positions::new();
    let step = 2.0 * PI / 5.0;
    for i in 0..5 {
        graph.add_node(i);
        positions.insert(i, polar(3.0, FRAC_PI_2 + step * i as f64));
    }
    for j in 0..10 {
        graph.add_node(5 + j);
        positions.insert(5 + j, polar(2.0, FRAC_PI_2 + step * j as f64 / 2.0));
    }
    for i in 0..5 {
        graph.add_node(15 + i);
        positions.insert(15 + i, polar(1.0, FRAC_PI_2 + step * (i as f64 + 0.5)));
    }
    for i in 0..5 {
        push(&mut graph, i, (i + 1) % 5);
        push(&mut graph, i, 5 + 2 * i);
        push(&mut graph, 5 + 2 * i + 1, 15 + i);
        push(&mut graph, 15 + i, 15 + (i + 1) % 5);
    }
    for j in 0..10 {
        push(&mut graph, 5 + j, 5 + (j + 1) % 10);
    }
    Embedding::new(graph, positions)
}

/// Triangulated `rows x cols` grid with per-node jitter.
///
/// Every cell receives one randomly oriented diagonal. With `jitter <= 0.15`
/// no triangle can flip orientation, so the drawing is always a valid
/// crossing-free, bridge-free planar embedding.
pub fn jittered_triangulation(
    rows: usize,
    cols: usize,
    jitter: f64,
    rng: &mut RngHandle,
) -> Result<Embedding<usize>, GcolError> {
    if rows < 2 || cols < 2 {
        return Err(parameter_error("grid-too-small", "triangulation needs at least a 2x2 grid")
            .with_context("rows", rows)
            .with_context("cols", cols));
    }
    if !(0.0..=0.15).contains(&jitter) {
        return Err(parameter_error("jitter-out-of-range", "jitter must lie in [0, 0.15]")
            .with_context("jitter", jitter));
    }
    let id = |r: usize, c: usize| r * cols + c;
    let mut graph = Graph::new();
    let mut positions = Positions::new();
    for r in 0..rows {
        for c in 0..cols {
            let dx = (rng.unit() * 2.0 - 1.0) * jitter;
            let dy = (rng.unit() * 2.0 - 1.0) * jitter;
            graph.add_node(id(r, c));
            positions.insert(id(r, c), (c as f64 + dx, r as f64 + dy));
        }
    }
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                push(&mut graph, id(r, c), id(r, c + 1));
            }
            if r + 1 < rows {
                push(&mut graph, id(r, c), id(r + 1, c));
            }
            if r + 1 < rows && c + 1 < cols {
                if rng.unit() < 0.5 {
                    push(&mut graph, id(r, c), id(r + 1, c + 1));
                } else {
                    push(&mut graph, id(r, c + 1), id(r + 1, c));
                }
            }
        }
    }
    Ok(Embedding::new(graph, positions))
}

fn cycle_or_empty(n: usize) -> Graph<usize> {
    let mut graph = path_graph(n);
    if n >= 3 {
        push(&mut graph, n - 1, 0);
    }
    graph
}

fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

// Generators only ever add fresh edges between distinct existing labels.
fn push(graph: &mut Graph<usize>, a: usize, b: usize) {
    let added = graph.add_edge(a, b);
    debug_assert!(added.is_ok(), "generator edge {a}-{b} rejected: {added:?}");
}
