//! Random connected weighted graphs for exercising the spanning engine.
//!
//! Vertex `i` is attached to a uniformly chosen earlier vertex, which makes
//! the base graph a random tree (and therefore connected). Extra edges are
//! then attempted between random vertex pairs; self-loops and pairs that are
//! already connected are skipped, so the final edge count can fall short of
//! the target.
//!
//! Weights are drawn from `{0.1, 0.2, ..., 10.0}`.

use rand::Rng;
use tracing::{debug, instrument};

use crate::model::{UndirectedGraph, WeightedGraph};

/// Build a random connected graph on vertices `0..vertex_count`.
///
/// `edge_count` is a target; values below `vertex_count - 1` still produce
/// the spanning base tree.
#[must_use]
#[instrument(skip(rng))]
pub fn connected_graph<R: Rng + ?Sized>(
    vertex_count: usize,
    edge_count: usize,
    rng: &mut R,
) -> UndirectedGraph<usize> {
    let mut graph = UndirectedGraph::with_vertices(0..vertex_count);

    for vertex in 1..vertex_count {
        let parent = rng.gen_range(0..vertex);
        let weight = random_weight(rng);
        let inserted = graph.add_edge(vertex, parent, weight).is_ok();
        debug_assert!(inserted, "base tree edges join a fresh vertex");
    }

    let extra = edge_count.saturating_sub(vertex_count.saturating_sub(1));
    let mut skipped = 0_usize;
    if vertex_count > 1 {
        for _ in 0..extra {
            let source = rng.gen_range(0..vertex_count);
            let target = rng.gen_range(0..vertex_count);
            let weight = random_weight(rng);
            if graph.add_edge(source, target, weight).is_err() {
                skipped += 1;
            }
        }
    }

    debug!(
        edges = graph.edge_count(),
        skipped, "random connected graph generated"
    );
    graph
}

fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(0_u32..100)) / 10.0 + 0.1
}
