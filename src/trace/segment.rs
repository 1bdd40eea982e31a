//! Traced path segments as the host reports them.

use serde::{Deserialize, Serialize};

/// One traced edge: a pair of abstract node identifiers.
///
/// Node ids index the panel's intersection lattice bottom-left to top-right;
/// ids at or above the panel's exit threshold are exit nodes, not grid
/// positions. The host appends segments in trace order, which reconstruction
/// depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TracedSegment {
    pub point_a: i32,
    pub point_b: i32,
}

impl TracedSegment {
    /// Create a segment from two node ids.
    #[must_use]
    pub const fn new(point_a: i32, point_b: i32) -> Self {
        Self { point_a, point_b }
    }

    /// A degenerate origin-origin segment, the malformed-trace marker.
    #[must_use]
    pub const fn is_origin_pair(self) -> bool {
        self.point_a == 0 && self.point_b == 0
    }

    /// True when either endpoint id is negative.
    #[must_use]
    pub const fn has_negative_endpoint(self) -> bool {
        self.point_a < 0 || self.point_b < 0
    }
}
