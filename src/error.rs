//! Errors raised while building paths or driving a traversal.
//!
//! Only construction and configuration problems are errors. Per-tick
//! conditions such as a blocked step or a missing hand-off target degrade to
//! "no change this tick" and never surface here.

use thiserror::Error;

use crate::path::PathId;

/// Failure building a path graph or starting a traversal.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// A path was authored without any curve.
    #[error("path {0} owns no curve")]
    MissingCurve(PathId),
    /// A curve needs at least two knots to define a segment.
    #[error("curve needs at least two knots, found {found}")]
    TooFewKnots {
        /// Number of knots supplied.
        found: usize,
    },
    /// A knot position was NaN or infinite.
    #[error("curve knot {index} is not finite")]
    NonFiniteKnot {
        /// Index of the offending knot.
        index: usize,
    },
    /// The requested path is not registered.
    #[error("unknown path {0}")]
    UnknownPath(PathId),
    /// Two paths share an identifier.
    #[error("duplicate path id {0}")]
    DuplicatePath(PathId),
    /// A connection targets a path that is not registered.
    #[error("connection from path {from} targets unknown path {to}")]
    DanglingConnection {
        /// Path owning the connection.
        from: PathId,
        /// Missing target.
        to: PathId,
    },
    /// A connection position lies outside `[0, 1]` or its capture distance
    /// is negative.
    #[error("connection from path {from} to path {to} is out of range")]
    InvalidConnection {
        /// Path owning the connection.
        from: PathId,
        /// Target of the connection.
        to: PathId,
    },
    /// A curve index does not address one of the path's curves.
    #[error("curve index {index} out of range for path {path} ({count} curves)")]
    CurveIndexOutOfRange {
        /// Path whose curve was requested.
        path: PathId,
        /// Requested index.
        index: usize,
        /// Number of curves the path owns.
        count: usize,
    },
    /// `enter` was called while a traversal is already running.
    #[error("a traversal on path {0} is already active")]
    AlreadyTraversing(PathId),
    /// The level configuration could not be parsed.
    #[error("failed to parse level configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The level configuration could not be read.
    #[error("failed to read level configuration: {0}")]
    Io(#[from] std::io::Error),
}
