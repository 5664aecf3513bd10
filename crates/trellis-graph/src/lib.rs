#![forbid(unsafe_code)]
//! trellis-graph library.
//!
//! An undirected weighted graph model and a Prim-based minimum spanning
//! tree/forest engine that works over any [`model::WeightedGraph`].
//!
//! # Conventions
//!
//! - **Errors**: Typed `thiserror` enums per concern, each mapping to an
//!   [`error::ErrorKind`].
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`). The library never
//!   installs a subscriber.

pub mod error;
pub mod model;
pub mod random;
pub mod spanning;

pub use error::{ErrorKind, GraphError, SpanningError};
pub use model::{Edge, EdgeId, UndirectedGraph, Vertex, WeightedGraph};
pub use spanning::{PrimSpanningTree, SpanningTree};
