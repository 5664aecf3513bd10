#![forbid(unsafe_code)]
//! trellis-maze library.
//!
//! Turns a bitmap maze into a room graph and answers structural questions
//! about it using the spanning forest from `trellis-graph`.
//!
//! ```text
//! PixelSource ─► MazeGraphBuilder ─► MazeGraph ─► MazeAnalysis ─► MazeReport
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`MazeError`] for analysis failures, `anyhow::Result` for
//!   config file loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod analysis;
pub mod builder;
pub mod config;
pub mod error;
pub mod image;

pub use analysis::{MazeAnalysis, MazeReport};
pub use builder::{MazeGraph, MazeGraphBuilder, Room, RoomId};
pub use config::{MazeConfig, load_config};
pub use error::MazeError;
pub use image::{Bitmap, PixelSource};
