//! Room graph construction from a maze bitmap.
//!
//! # Grid
//!
//! The image is read as a grid of square cells whose side equals the wall
//! thickness. The thickness is found by walking down the left border column
//! from the top until the first open pixel: that pixel marks the entrance,
//! which sits one cell below the top wall.
//!
//! ```text
//!   col  0 1 2 3 4
//! row 0  # # # # #
//!     1  . R . R #     R = room (odd column, odd row)
//!     2  # . # # #     . between two rooms = passage
//!     3  # R . R .
//!     4  # # # # #
//! ```
//!
//! A cell is open when the pixel at its centre has the configured open
//! colour. Open cells at odd/odd positions are rooms. Two rooms two cells
//! apart on one axis are joined by an edge when the cell between them is
//! open.
//!
//! ## Room Ids
//!
//! Ids are assigned from 0 in column-major order (columns left to right,
//! rows top to bottom within a column). The entry is the room at grid
//! `(1, 1)`; the exit is the room at the bottom-right odd position.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument, trace};
use trellis_graph::{UndirectedGraph, WeightedGraph};

use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::image::{PixelSource, RGB_MASK};

/// Vertex id of a room.
pub type RoomId = usize;

/// A room and its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub column: usize,
    pub row: usize,
}

// ---------------------------------------------------------------------------
// MazeGraph
// ---------------------------------------------------------------------------

/// The room adjacency graph of one maze image.
#[derive(Debug, Clone)]
pub struct MazeGraph {
    graph: UndirectedGraph<RoomId>,
    /// Indexed by [`RoomId`].
    rooms: Vec<Room>,
    cell_size: usize,
    entry: Option<RoomId>,
    exit: Option<RoomId>,
}

impl MazeGraph {
    #[must_use]
    pub const fn graph(&self) -> &UndirectedGraph<RoomId> {
        &self.graph
    }

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Side length of one grid cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// The top-left room, if it is open.
    #[must_use]
    pub const fn entry(&self) -> Option<RoomId> {
        self.entry
    }

    /// The bottom-right room, if it is open.
    #[must_use]
    pub const fn exit(&self) -> Option<RoomId> {
        self.exit
    }
}

// ---------------------------------------------------------------------------
// MazeGraphBuilder
// ---------------------------------------------------------------------------

/// Scans maze images into [`MazeGraph`]s.
#[derive(Debug, Clone, Default)]
pub struct MazeGraphBuilder {
    config: MazeConfig,
}

impl MazeGraphBuilder {
    #[must_use]
    pub const fn new(config: MazeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Derive the cell size from the entrance on the left border.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::MissingEntrance`] if the left column has no open
    /// pixel, or if the top-left pixel itself is open (no top wall).
    pub fn cell_size<I: PixelSource + ?Sized>(&self, image: &I) -> Result<usize, MazeError> {
        let entrance = (0..image.height()).find(|&y| self.is_open_pixel(image, 0, y));
        match entrance {
            Some(y) if y > 0 => Ok(y),
            _ => Err(MazeError::MissingEntrance),
        }
    }

    /// Build the room graph of `image`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::MissingEntrance`] if the cell size cannot be
    /// derived.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn build<I: PixelSource + ?Sized>(&self, image: &I) -> Result<MazeGraph, MazeError> {
        let cell_size = self.cell_size(image)?;
        let grid = Grid {
            builder: self,
            image,
            cell_size,
            columns: image.width() / cell_size,
            rows: image.height() / cell_size,
        };
        debug!(
            cell_size,
            columns = grid.columns,
            rows = grid.rows,
            "maze grid measured"
        );

        // Build-phase lookup from grid position to room id.
        let mut positions: HashMap<(usize, usize), RoomId> = HashMap::new();
        let mut rooms = Vec::new();
        let mut graph = UndirectedGraph::new();

        for column in (1..grid.columns).step_by(2) {
            for row in (1..grid.rows).step_by(2) {
                if grid.is_open(column, row) {
                    let id = rooms.len();
                    graph.add_vertex(id);
                    positions.insert((column, row), id);
                    rooms.push(Room { id, column, row });
                }
            }
        }

        // East and south neighbours only, so each passage is seen once.
        for room in &rooms {
            let east = positions
                .get(&(room.column + 2, room.row))
                .filter(|_| grid.is_open(room.column + 1, room.row));
            if let Some(&neighbour) = east {
                trace!(from = room.id, to = neighbour, "horizontal passage");
                graph.add_edge(room.id, neighbour, self.config.passage_weight)?;
            }
        }
        for room in &rooms {
            let south = positions
                .get(&(room.column, room.row + 2))
                .filter(|_| grid.is_open(room.column, room.row + 1));
            if let Some(&neighbour) = south {
                trace!(from = room.id, to = neighbour, "vertical passage");
                graph.add_edge(room.id, neighbour, self.config.passage_weight)?;
            }
        }

        let entry = positions.get(&(1, 1)).copied();
        let exit = last_odd(grid.columns)
            .zip(last_odd(grid.rows))
            .and_then(|corner| positions.get(&corner).copied());

        debug!(
            rooms = rooms.len(),
            passages = graph.edge_count(),
            ?entry,
            ?exit,
            "maze graph built"
        );

        Ok(MazeGraph {
            graph,
            rooms,
            cell_size,
            entry,
            exit,
        })
    }

    fn is_open_pixel<I: PixelSource + ?Sized>(&self, image: &I, x: usize, y: usize) -> bool {
        image
            .pixel(x, y)
            .is_some_and(|color| color & RGB_MASK == self.config.open_color & RGB_MASK)
    }
}

/// Image viewed as square cells.
struct Grid<'a, I: ?Sized> {
    builder: &'a MazeGraphBuilder,
    image: &'a I,
    cell_size: usize,
    columns: usize,
    rows: usize,
}

impl<I: PixelSource + ?Sized> Grid<'_, I> {
    fn is_open(&self, column: usize, row: usize) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        let centre = self.cell_size / 2;
        self.builder.is_open_pixel(
            self.image,
            column * self.cell_size + centre,
            row * self.cell_size + centre,
        )
    }
}

/// Largest odd index below `count`.
const fn last_odd(count: usize) -> Option<usize> {
    if count < 2 {
        None
    } else if (count - 1) % 2 == 1 {
        Some(count - 1)
    } else {
        Some(count - 2)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{BLACK, Bitmap, WHITE};

    const TWO_ROOMS: &str = "
        #####
        ....#
        #####
    ";

    #[test]
    fn cell_size_matches_scale() {
        let builder = MazeGraphBuilder::default();
        for scale in [1, 2, 5] {
            let image = Bitmap::from_ascii(TWO_ROOMS, scale).expect("art");
            assert_eq!(builder.cell_size(&image), Ok(scale));
        }
    }

    #[test]
    fn no_entrance_is_rejected() {
        let image = Bitmap::filled(9, 9, BLACK);
        let builder = MazeGraphBuilder::default();
        assert_eq!(builder.cell_size(&image), Err(MazeError::MissingEntrance));
        assert!(matches!(
            builder.build(&image),
            Err(MazeError::MissingEntrance)
        ));
    }

    #[test]
    fn open_top_corner_is_rejected() {
        let image = Bitmap::filled(4, 4, WHITE);
        let builder = MazeGraphBuilder::default();
        assert_eq!(builder.cell_size(&image), Err(MazeError::MissingEntrance));
    }

    #[test]
    fn two_rooms_one_passage() {
        let image = Bitmap::from_ascii(TWO_ROOMS, 3).expect("art");
        let maze = MazeGraphBuilder::default().build(&image).expect("build");
        assert_eq!(maze.cell_size(), 3);
        assert_eq!(maze.room_count(), 2);
        assert_eq!(maze.passage_count(), 1);
        assert_eq!(maze.entry(), Some(0));
        assert_eq!(maze.exit(), Some(1));
        assert_eq!(
            maze.room(1),
            Some(&Room {
                id: 1,
                column: 3,
                row: 1
            })
        );
    }

    #[test]
    fn ids_follow_column_major_order() {
        let image = Bitmap::from_ascii(
            "
            #####
            ....#
            #.#.#
            #...#
            #####
            ",
            1,
        )
        .expect("art");
        let maze = MazeGraphBuilder::default().build(&image).expect("build");
        let positions: Vec<(usize, usize)> =
            maze.rooms().iter().map(|r| (r.column, r.row)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 3), (3, 1), (3, 3)]);
        assert_eq!(maze.exit(), Some(3));
        // Square: four passages, each found once.
        assert_eq!(maze.passage_count(), 4);
        assert!(maze.graph().edge_between(&0, &1).is_some());
        assert!(maze.graph().edge_between(&0, &2).is_some());
        assert!(maze.graph().edge_between(&1, &3).is_some());
        assert!(maze.graph().edge_between(&2, &3).is_some());
    }

    #[test]
    fn closed_rooms_are_not_vertices() {
        let image = Bitmap::from_ascii(
            "
            #####
            ..#.#
            #####
            ",
            2,
        )
        .expect("art");
        let maze = MazeGraphBuilder::default().build(&image).expect("build");
        assert_eq!(maze.room_count(), 2);
        assert_eq!(maze.passage_count(), 0);

        let image = Bitmap::from_ascii(
            "
            #####
            ..###
            #####
            ",
            2,
        )
        .expect("art");
        let maze = MazeGraphBuilder::default().build(&image).expect("build");
        assert_eq!(maze.room_count(), 1);
        assert_eq!(maze.exit(), None);
    }

    #[test]
    fn custom_open_colour_and_weight() {
        let mut image = Bitmap::filled(5, 3, WHITE);
        for x in 0..5 {
            image.set(x, 1, 0x0012_3456);
        }
        image.set(4, 1, WHITE);

        let config = MazeConfig {
            open_color: 0x0012_3456,
            passage_weight: 2.5,
        };
        let maze = MazeGraphBuilder::new(config).build(&image).expect("build");
        assert_eq!(maze.room_count(), 2);
        assert_eq!(maze.passage_count(), 1);
        assert!((maze.graph().total_weight() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let mut image = Bitmap::from_ascii(TWO_ROOMS, 1).expect("art");
        image.set(0, 1, 0xFF00_0000 | WHITE);
        let builder = MazeGraphBuilder::default();
        assert_eq!(builder.cell_size(&image), Ok(1));
    }

    #[test]
    fn last_odd_index() {
        assert_eq!(last_odd(0), None);
        assert_eq!(last_odd(1), None);
        assert_eq!(last_odd(2), Some(1));
        assert_eq!(last_odd(7), Some(5));
        assert_eq!(last_odd(8), Some(7));
    }
}
