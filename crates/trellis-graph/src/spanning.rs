//! Minimum spanning trees and forests via Prim's algorithm.
//!
//! # Overview
//!
//! [`PrimSpanningTree`] borrows any [`WeightedGraph`] and answers two
//! questions:
//!
//! - [`PrimSpanningTree::spanning_tree`]: the minimum spanning *forest* of
//!   the whole graph. Each connected component contributes one tree, so a
//!   graph with `k` components yields `|V| - k` edges.
//! - [`PrimSpanningTree::spanning_tree_from`]: the minimum spanning tree of
//!   the component containing a start vertex.
//!
//! ## Growth
//!
//! ```text
//! Init:     remaining = V, used = {}, frontier = {}
//! Growing:  root → used, incident edges → frontier
//!           pop min edge:
//!             one end used, other remaining → accept, absorb other end
//!             both ends used                → discard (closes a cycle)
//! Done:     frontier empty or remaining empty
//! ```
//!
//! The remaining/used partition lives only for the duration of one call, so
//! an engine can be reused freely and engines over shared borrows of the
//! same graph never interfere.
//!
//! ## Determinism
//!
//! The frontier is ordered by `(weight, low endpoint, high endpoint, edge)`.
//! Distinct edges of equal weight never compare equal, and forest roots are
//! taken in ascending vertex order, so repeated calls on an unchanged graph
//! return identical trees.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument, trace};

use crate::error::SpanningError;
use crate::model::{Vertex, WeightedGraph};

// ---------------------------------------------------------------------------
// SpanningTree
// ---------------------------------------------------------------------------

/// Edges of a spanning tree or forest and their cumulative weight.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree<E> {
    /// Accepted edges, in acceptance order.
    edges: Vec<E>,
    weight: f64,
    /// Number of roots grown to produce this result.
    tree_count: usize,
}

impl<E: Copy> SpanningTree<E> {
    const fn empty() -> Self {
        Self {
            edges: Vec::new(),
            weight: 0.0,
            tree_count: 0,
        }
    }

    fn push(&mut self, edge: E, weight: f64) {
        self.edges.push(edge);
        self.weight += weight;
    }

    fn absorb(&mut self, other: Self) {
        self.edges.extend(other.edges);
        self.weight += other.weight;
        self.tree_count += other.tree_count;
    }

    #[must_use]
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    #[must_use]
    pub fn into_edges(self) -> Vec<E> {
        self.edges
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of the weights of all accepted edges.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of trees in the result.
    ///
    /// One for a rooted tree. For a forest this is the number of connected
    /// components of the graph, isolated vertices included.
    #[must_use]
    pub const fn tree_count(&self) -> usize {
        self.tree_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Vertices that appear as an endpoint of at least one accepted edge.
    ///
    /// Isolated roots are covered by the forest but touch no edge, so they
    /// are not part of this set.
    #[must_use]
    pub fn touched_vertices<G>(&self, graph: &G) -> BTreeSet<G::Vertex>
    where
        G: WeightedGraph<Edge = E>,
    {
        self.edges
            .iter()
            .flat_map(|&edge| {
                let (a, b) = graph.endpoints(edge);
                [a, b]
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PrimSpanningTree
// ---------------------------------------------------------------------------

/// Prim's algorithm over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct PrimSpanningTree<'g, G> {
    graph: &'g G,
}

impl<'g, G: WeightedGraph> PrimSpanningTree<'g, G> {
    #[must_use]
    pub const fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    #[must_use]
    pub const fn graph(&self) -> &'g G {
        self.graph
    }

    /// Compute the minimum spanning forest of the whole graph.
    ///
    /// Unvisited vertices are taken as roots in ascending order until every
    /// vertex has been absorbed by exactly one tree. An empty graph yields
    /// an empty forest with zero trees.
    #[must_use]
    #[instrument(skip_all, fields(vertices = self.graph.vertex_count(), edges = self.graph.edge_count()))]
    pub fn spanning_tree(&self) -> SpanningTree<G::Edge> {
        let mut partition = Partition::of(self.graph);
        let mut forest = SpanningTree::empty();

        while let Some(root) = partition.next_root() {
            let tree = grow(self.graph, &root, &mut partition);
            trace!(
                root = ?root,
                edges = tree.edge_count(),
                weight = tree.weight(),
                "grew component tree"
            );
            forest.absorb(tree);
        }

        debug!(
            trees = forest.tree_count(),
            edges = forest.edge_count(),
            weight = forest.weight(),
            "spanning forest complete"
        );
        forest
    }

    /// Compute the minimum spanning tree of the component containing `start`.
    ///
    /// A start vertex with no incident edges yields a tree with no edges and
    /// zero weight.
    ///
    /// # Errors
    ///
    /// - [`SpanningError::MissingStartVertex`] if `start` is `None`.
    /// - [`SpanningError::UnknownVertex`] if `start` is not in the graph.
    #[instrument(skip_all, fields(start = ?start))]
    pub fn spanning_tree_from(
        &self,
        start: Option<&G::Vertex>,
    ) -> Result<SpanningTree<G::Edge>, SpanningError> {
        let start = start.ok_or(SpanningError::MissingStartVertex)?;
        if !self.graph.contains_vertex(start) {
            return Err(SpanningError::UnknownVertex(format!("{start:?}")));
        }

        let mut partition = Partition::of(self.graph);
        let tree = grow(self.graph, start, &mut partition);

        debug!(
            edges = tree.edge_count(),
            weight = tree.weight(),
            "rooted spanning tree complete"
        );
        Ok(tree)
    }
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Grow one tree from `root`, absorbing vertices out of `partition`.
fn grow<G: WeightedGraph>(
    graph: &G,
    root: &G::Vertex,
    partition: &mut Partition<G::Vertex>,
) -> SpanningTree<G::Edge> {
    let mut tree = SpanningTree::empty();
    tree.tree_count = 1;

    partition.mark_used(root);
    let mut frontier = Frontier::new(graph);
    frontier.extend_from(root);

    while !partition.remaining.is_empty() {
        let Some(candidate) = frontier.pop_min() else {
            break;
        };

        match partition.newly_reached(&candidate.low, &candidate.high) {
            Some(reached) => {
                let reached = reached.clone();
                trace!(edge = ?candidate.edge, weight = candidate.weight, vertex = ?reached, "accept");
                tree.push(candidate.edge, candidate.weight);
                partition.mark_used(&reached);
                frontier.extend_from(&reached);
            }
            None => {
                trace!(edge = ?candidate.edge, "discard, both ends in tree");
            }
        }
    }

    tree
}

/// Call-local split of the vertex set into not-yet-reached and reached.
struct Partition<V> {
    remaining: BTreeSet<V>,
    used: HashSet<V>,
}

impl<V: Vertex> Partition<V> {
    fn of<G: WeightedGraph<Vertex = V>>(graph: &G) -> Self {
        Self {
            remaining: graph.vertices().collect(),
            used: HashSet::with_capacity(graph.vertex_count()),
        }
    }

    fn next_root(&self) -> Option<V> {
        self.remaining.first().cloned()
    }

    fn mark_used(&mut self, vertex: &V) {
        if self.remaining.remove(vertex) {
            self.used.insert(vertex.clone());
        }
    }

    /// If exactly one of `a`, `b` is in the tree and the other is still
    /// remaining, return the remaining one.
    fn newly_reached<'v>(&self, a: &'v V, b: &'v V) -> Option<&'v V> {
        if self.used.contains(a) && self.remaining.contains(b) {
            Some(b)
        } else if self.used.contains(b) && self.remaining.contains(a) {
            Some(a)
        } else {
            None
        }
    }
}

/// Ordered set of candidate edges.
struct Frontier<'g, G: WeightedGraph> {
    graph: &'g G,
    entries: BTreeSet<FrontierEntry<G::Vertex, G::Edge>>,
}

impl<'g, G: WeightedGraph> Frontier<'g, G> {
    const fn new(graph: &'g G) -> Self {
        Self {
            graph,
            entries: BTreeSet::new(),
        }
    }

    fn extend_from(&mut self, vertex: &G::Vertex) {
        let graph = self.graph;
        self.entries.extend(graph.edges_of(vertex).map(|edge| {
            let (a, b) = graph.endpoints(edge);
            FrontierEntry::new(edge, graph.weight(edge), a, b)
        }));
    }

    fn pop_min(&mut self) -> Option<FrontierEntry<G::Vertex, G::Edge>> {
        self.entries.pop_first()
    }
}

/// Composite sort key for the frontier.
///
/// Weight first, then the unordered endpoint pair, then the edge handle, so
/// no two distinct edges are ever treated as the same entry.
#[derive(Debug, Clone)]
struct FrontierEntry<V, E> {
    weight: f64,
    low: V,
    high: V,
    edge: E,
}

impl<V: Ord, E> FrontierEntry<V, E> {
    fn new(edge: E, weight: f64, a: V, b: V) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            weight,
            low,
            high,
            edge,
        }
    }
}

impl<V: Ord, E: Ord> Ord for FrontierEntry<V, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.low.cmp(&other.low))
            .then_with(|| self.high.cmp(&other.high))
            .then_with(|| self.edge.cmp(&other.edge))
    }
}

impl<V: Ord, E: Ord> PartialOrd for FrontierEntry<V, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord, E: Ord> PartialEq for FrontierEntry<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V: Ord, E: Ord> Eq for FrontierEntry<V, E> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
