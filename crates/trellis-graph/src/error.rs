use std::fmt;

/// Coarse error classification shared by every trellis error type.
///
/// Callers that only care whether an argument was missing or malformed can
/// match on this instead of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was absent.
    MissingArgument,
    /// An argument was present but not acceptable.
    InvalidArgument,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingArgument => "E1001",
            Self::InvalidArgument => "E1002",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingArgument => "Required argument missing",
            Self::InvalidArgument => "Invalid argument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while constructing an [`UndirectedGraph`](crate::UndirectedGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint has not been added as a vertex.
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(String),

    /// Both endpoints of the edge are the same vertex.
    #[error("self-loop on vertex {0} is not allowed in a simple graph")]
    SelfLoop(String),

    /// The unordered pair is already connected.
    #[error("edge {first} -- {second} already exists")]
    DuplicateEdge { first: String, second: String },
}

impl GraphError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// Errors from [`PrimSpanningTree`](crate::PrimSpanningTree) rooted growth.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanningError {
    /// No start vertex was supplied.
    #[error("no start vertex supplied")]
    MissingStartVertex,

    /// The start vertex is not a member of the graph.
    #[error("start vertex {0} is not in the graph")]
    UnknownVertex(String),
}

impl SpanningError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingStartVertex => ErrorKind::MissingArgument,
            Self::UnknownVertex(_) => ErrorKind::InvalidArgument,
        }
    }
}
