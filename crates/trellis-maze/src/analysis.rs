//! Structural predicates over a maze's room graph.
//!
//! All predicates are derived from the minimum spanning forest of the room
//! graph:
//!
//! - **components** = rooms − forest edges
//! - **connected** = at most one component
//! - **cycles** = more passages than forest edges
//! - **perfect** = connected and acyclic (the room graph is a tree)
//!
//! Exit reachability grows a single tree from the entry room and checks
//! whether the exit room is part of it.

use serde::Serialize;
use tracing::{debug, instrument, warn};
use trellis_graph::{EdgeId, PrimSpanningTree, SpanningTree, WeightedGraph};

use crate::builder::{MazeGraph, MazeGraphBuilder};
use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::image::PixelSource;

/// Summary of every predicate for one maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MazeReport {
    pub rooms: usize,
    pub passages: usize,
    pub components: usize,
    pub connected: bool,
    pub has_cycles: bool,
    pub perfect: bool,
    pub connected_with_cycles: bool,
    pub exit_reachable: bool,
}

/// Analysis of one maze. The graph is never modified; every query computes
/// its own spanning structure.
#[derive(Debug, Clone)]
pub struct MazeAnalysis {
    maze: MazeGraph,
}

impl MazeAnalysis {
    #[must_use]
    pub const fn new(maze: MazeGraph) -> Self {
        Self { maze }
    }

    /// Build the room graph of `image` and wrap it for analysis.
    ///
    /// # Errors
    ///
    /// Propagates [`MazeGraphBuilder::build`] failures.
    #[instrument(skip_all)]
    pub fn from_image<I: PixelSource + ?Sized>(
        image: &I,
        config: &MazeConfig,
    ) -> Result<Self, MazeError> {
        let maze = MazeGraphBuilder::new(config.clone()).build(image)?;
        Ok(Self::new(maze))
    }

    #[must_use]
    pub const fn maze(&self) -> &MazeGraph {
        &self.maze
    }

    /// Minimum spanning forest of the room graph.
    #[must_use]
    pub fn spanning_forest(&self) -> SpanningTree<EdgeId> {
        PrimSpanningTree::new(self.maze.graph()).spanning_tree()
    }

    /// Number of disjoint room zones. Zero for a maze without rooms.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.spanning_forest().tree_count()
    }

    /// Every room can reach every other room.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Some pair of rooms is joined by more than one route.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        self.maze.passage_count() > self.spanning_forest().edge_count()
    }

    /// Connected and free of cycles.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.is_connected() && !self.has_cycles()
    }

    /// Connected, with at least one cycle.
    #[must_use]
    pub fn is_connected_with_cycles(&self) -> bool {
        self.is_connected() && self.has_cycles()
    }

    /// The exit room lies in the same zone as the entry room.
    ///
    /// `false` when either room is walled off from the grid.
    #[must_use]
    pub fn is_exit_reachable(&self) -> bool {
        let Some(exit) = self.maze.exit() else {
            return false;
        };
        let graph = self.maze.graph();
        match PrimSpanningTree::new(graph).spanning_tree_from(self.maze.entry().as_ref()) {
            Ok(tree) => {
                Some(exit) == self.maze.entry() || tree.touched_vertices(graph).contains(&exit)
            }
            Err(err) => {
                warn!(%err, "no entry room, exit treated as unreachable");
                false
            }
        }
    }

    /// Evaluate every predicate at once, sharing one forest computation.
    #[must_use]
    #[instrument(skip_all)]
    pub fn report(&self) -> MazeReport {
        let forest = self.spanning_forest();
        let graph = self.maze.graph();
        let components = forest.tree_count();
        let connected = components <= 1;
        let has_cycles = graph.edge_count() > forest.edge_count();

        let report = MazeReport {
            rooms: graph.vertex_count(),
            passages: graph.edge_count(),
            components,
            connected,
            has_cycles,
            perfect: connected && !has_cycles,
            connected_with_cycles: connected && has_cycles,
            exit_reachable: self.is_exit_reachable(),
        };
        debug!(?report, "maze analysed");
        report
    }
}
