//! Error types.
//!
//! Nothing here ever crosses a polling-loop boundary: watchdogs absorb these
//! into a conservative no-op for the cycle. They exist so library callers get
//! a defined failure instead of a silent clamp or a panic.

use thiserror::Error;

/// Grid access failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside `[0, width) x [0, height)`.
    ///
    /// Never silently clamped; validators that want "off-grid means no path"
    /// use the optional accessor instead.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },
}

/// Path reconstruction failure. Aborts the cycle; the next attempt starts
/// from a fresh backup reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Origin-origin segment or a negative endpoint id.
    #[error("trace contains an origin-origin or negative segment")]
    Malformed,

    /// A symmetric panel reported an endpoint with no mirror mapping.
    #[error("node {0} has no symmetry mapping")]
    MissingSymmetry(i32),

    /// A panel styled symmetric was configured without a symmetry table.
    #[error("symmetric panel has no symmetry table")]
    NoSymmetryTable,

    /// An endpoint mapped outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GridError::OutOfBounds { x: 9, y: -1, width: 5, height: 5 };
        assert_eq!(err.to_string(), "cell (9, -1) is outside the 5x5 grid");

        let err: TraceError = err.into();
        assert!(matches!(err, TraceError::Grid(_)));
        assert_eq!(err.to_string(), "cell (9, -1) is outside the 5x5 grid");
    }
}
