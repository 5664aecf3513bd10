use trellis_graph::{ErrorKind, GraphError, SpanningError};

/// Errors from maze construction and analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// The left border column has no usable open pixel, so the cell size
    /// cannot be derived.
    #[error("maze image has no entrance on its left border")]
    MissingEntrance,

    /// Pixel buffer length does not match the declared dimensions.
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Spanning(#[from] SpanningError),
}

impl MazeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingEntrance | Self::SizeMismatch { .. } => ErrorKind::InvalidArgument,
            Self::Graph(err) => err.kind(),
            Self::Spanning(err) => err.kind(),
        }
    }
}
