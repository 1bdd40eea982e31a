//! Grid coordinates and direction tables.
//!
//! Every algorithm in this crate walks the same `width x height` lattice, so
//! `Point` is deliberately minimal: component-wise addition and scalar
//! multiplication, nothing else. Cylindrical (pillar) wrapping is a property
//! of a particular grid, not of coordinates in general, so it lives in
//! [`Grid::step`](crate::grid::Grid::step) rather than here.
//!
//! ## Parity partition
//!
//! The lattice is partitioned by coordinate parity:
//! - odd/odd cells hold decorations,
//! - cells with exactly one odd coordinate hold path edges (and gaps),
//! - even/even cells are grid-line intersections.

use serde::{Deserialize, Serialize};

/// An integer coordinate on the puzzle lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are odd (a decoration cell).
    #[must_use]
    pub const fn is_decoration_cell(self) -> bool {
        self.x % 2 != 0 && self.y % 2 != 0
    }

    /// True when exactly one coordinate is odd (a path-edge cell).
    #[must_use]
    pub const fn is_edge_cell(self) -> bool {
        (self.x % 2 != 0) != (self.y % 2 != 0)
    }

    /// True when both coordinates are even (an intersection cell).
    #[must_use]
    pub const fn is_intersection(self) -> bool {
        self.x % 2 == 0 && self.y % 2 == 0
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight scan directions in encoded-index order.
///
/// Directional symbols (Arrow, Dart, Head) store an index into this table.
/// Entries step two cells at a time so a full step always lands on the same
/// parity class; scans that need the in-between edge cell take a half step
/// first. An encoded index outside the table (9 is conventional) marks an
/// inert symbol.
pub const DIRECTIONS: [Point; 8] = [
    Point::new(0, 2),
    Point::new(0, -2),
    Point::new(2, 0),
    Point::new(-2, 0),
    Point::new(2, 2),
    Point::new(2, -2),
    Point::new(-2, -2),
    Point::new(-2, 2),
];

/// The four axis directions, stepping two cells (decoration to decoration).
pub const AXIS_DIRECTIONS: [Point; 4] = [
    Point::new(0, 2),
    Point::new(0, -2),
    Point::new(2, 0),
    Point::new(-2, 0),
];

/// The four unit axis directions (decoration to adjacent edge cell).
pub const EDGE_DIRECTIONS: [Point; 4] = [
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(-1, 0),
];
