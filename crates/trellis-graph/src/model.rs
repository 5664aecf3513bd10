//! Undirected weighted graph model.
//!
//! # Overview
//!
//! [`WeightedGraph`] is the capability set the spanning-tree engine needs:
//! vertex and edge enumeration, membership, adjacency, endpoints and
//! weights. Two implementations ship with the crate:
//!
//! - [`UndirectedGraph`]: a simple graph (no self-loops, no parallel edges)
//!   with ordered vertices, used for mazes and tests.
//! - `petgraph::graph::UnGraph<N, f64>`: so existing petgraph graphs can be
//!   handed to the engine without conversion.
//!
//! ## Edge Identity
//!
//! Edges are unordered: `add_edge(a, b)` and `add_edge(b, a)` name the same
//! edge, and the second call is rejected as a duplicate.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// WeightedGraph
// ---------------------------------------------------------------------------

/// Bounds every vertex identifier must satisfy.
///
/// `Ord` gives the engine a deterministic root order and tie-break; `Hash`
/// backs the per-call visited set.
pub trait Vertex: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> Vertex for T {}

/// Read-only view of an undirected weighted graph.
pub trait WeightedGraph {
    type Vertex: Vertex;
    /// Cheap edge handle. `Ord` is only used as the last tie-break between
    /// frontier entries that agree on weight and endpoints.
    type Edge: Copy + Ord + Hash + Debug;

    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Edges incident to `vertex`. Empty for unknown vertices.
    fn edges_of<'a>(&'a self, vertex: &'a Self::Vertex)
    -> impl Iterator<Item = Self::Edge> + 'a;

    /// The two endpoints of `edge`, in insertion order.
    fn endpoints(&self, edge: Self::Edge) -> (Self::Vertex, Self::Vertex);

    fn weight(&self, edge: Self::Edge) -> f64;

    fn degree(&self, vertex: &Self::Vertex) -> usize {
        self.edges_of(vertex).count()
    }
}

// ---------------------------------------------------------------------------
// UndirectedGraph
// ---------------------------------------------------------------------------

/// Handle to an edge of an [`UndirectedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A stored edge: two endpoints and a weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<V> {
    source: V,
    target: V,
    weight: f64,
}

impl<V: Vertex> Edge<V> {
    #[must_use]
    pub const fn source(&self) -> &V {
        &self.source
    }

    #[must_use]
    pub const fn target(&self) -> &V {
        &self.target
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Return `true` if this edge joins `a` and `b`, in either direction.
    #[must_use]
    pub fn connects(&self, a: &V, b: &V) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }

    /// The endpoint across from `vertex`, or `None` if `vertex` is not an
    /// endpoint.
    #[must_use]
    pub fn opposite(&self, vertex: &V) -> Option<&V> {
        if &self.source == vertex {
            Some(&self.target)
        } else if &self.target == vertex {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// A simple undirected weighted graph.
///
/// Vertices are kept ordered so iteration is deterministic. The graph is
/// meant to be built once and then only read.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<V> {
    /// Vertex → incident edge ids, in insertion order.
    adjacency: BTreeMap<V, Vec<EdgeId>>,
    edges: Vec<Edge<V>>,
    /// Normalized `(min, max)` endpoint pair → edge id.
    pairs: HashMap<(V, V), EdgeId>,
}

impl<V: Vertex> Default for UndirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> UndirectedGraph<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            edges: Vec::new(),
            pairs: HashMap::new(),
        }
    }

    /// Build a graph holding `vertices` and no edges.
    #[must_use]
    pub fn with_vertices(vertices: impl IntoIterator<Item = V>) -> Self {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex);
        }
        graph
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    /// Connect `a` and `b` with an edge of the given weight.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownVertex`] if either endpoint was never added.
    /// - [`GraphError::SelfLoop`] if `a == b`.
    /// - [`GraphError::DuplicateEdge`] if `a` and `b` are already connected.
    pub fn add_edge(&mut self, a: V, b: V, weight: f64) -> Result<EdgeId, GraphError> {
        for endpoint in [&a, &b] {
            if !self.adjacency.contains_key(endpoint) {
                return Err(GraphError::UnknownVertex(format!("{endpoint:?}")));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(format!("{a:?}")));
        }

        let key = normalized_pair(&a, &b);
        if self.pairs.contains_key(&key) {
            return Err(GraphError::DuplicateEdge {
                first: format!("{a:?}"),
                second: format!("{b:?}"),
            });
        }

        let id = EdgeId(self.edges.len());
        if let Some(incident) = self.adjacency.get_mut(&a) {
            incident.push(id);
        }
        if let Some(incident) = self.adjacency.get_mut(&b) {
            incident.push(id);
        }
        self.pairs.insert(key, id);
        self.edges.push(Edge {
            source: a,
            target: b,
            weight,
        });
        Ok(id)
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<V>> {
        self.edges.get(id.0)
    }

    /// Look up the edge joining `a` and `b`, in either direction.
    #[must_use]
    pub fn edge_between(&self, a: &V, b: &V) -> Option<EdgeId> {
        self.pairs.get(&normalized_pair(a, b)).copied()
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|edge| edge.weight).sum()
    }
}

impl<V: Vertex> WeightedGraph for UndirectedGraph<V> {
    type Vertex = V;
    type Edge = EdgeId;

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.adjacency.keys().cloned()
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId)
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    fn edges_of<'a>(&'a self, vertex: &'a V) -> impl Iterator<Item = EdgeId> + 'a {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .copied()
    }

    fn endpoints(&self, edge: EdgeId) -> (V, V) {
        let stored = &self.edges[edge.0];
        (stored.source.clone(), stored.target.clone())
    }

    fn weight(&self, edge: EdgeId) -> f64 {
        self.edges[edge.0].weight
    }

    fn degree(&self, vertex: &V) -> usize {
        self.adjacency.get(vertex).map_or(0, Vec::len)
    }
}

fn normalized_pair<V: Vertex>(a: &V, b: &V) -> (V, V) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

// ---------------------------------------------------------------------------
// petgraph adapter
// ---------------------------------------------------------------------------

impl<N> WeightedGraph for UnGraph<N, f64> {
    type Vertex = NodeIndex;
    type Edge = EdgeIndex;

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.node_indices()
    }

    fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edge_indices()
    }

    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn edge_count(&self) -> usize {
        self.raw_edges().len()
    }

    fn contains_vertex(&self, vertex: &NodeIndex) -> bool {
        self.node_weight(*vertex).is_some()
    }

    fn edges_of<'a>(&'a self, vertex: &'a NodeIndex) -> impl Iterator<Item = EdgeIndex> + 'a {
        // Graph::edges on an undirected graph yields every incident edge.
        petgraph::Graph::edges(self, *vertex).map(|edge| edge.id())
    }

    fn endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex) {
        let stored = &self.raw_edges()[edge.index()];
        (stored.source(), stored.target())
    }

    fn weight(&self, edge: EdgeIndex) -> f64 {
        self[edge]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
