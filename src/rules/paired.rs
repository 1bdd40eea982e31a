//! Corner and partner-scan rules.

use crate::core::{Cell, Decoration, Point, SymbolKind};
use crate::rules::checker::SymbolChecker;
use crate::rules::{PROBE_DIRECTIONS, WALL_PATTERNS};

/// Unit neighbor order shared by Bell and Tent patterns.
const NEIGHBOR_DIRECTIONS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
];

impl SymbolChecker<'_> {
    /// Antitriangle: exactly `count` of the four diagonal intersections are
    /// path corners.
    pub(crate) fn check_antitriangle(&self, p: Point, deco: Decoration) -> bool {
        const DIAGONALS: [Point; 4] = [
            Point::new(1, 1),
            Point::new(1, -1),
            Point::new(-1, -1),
            Point::new(-1, 1),
        ];
        let corners = DIAGONALS
            .iter()
            .filter(|&&d| self.is_path_corner(self.grid.step(p, d)))
            .count();
        corners == usize::from(deco.count)
    }

    /// An intersection is a corner when its path adjacency matches one of
    /// the nine wall patterns (at least two path edges meeting).
    fn is_path_corner(&self, pos: Point) -> bool {
        let mut paths = [false; 4];
        for (i, &d) in PROBE_DIRECTIONS.iter().enumerate() {
            paths[i] = self.grid.path_at(self.grid.step(pos, d));
        }
        WALL_PATTERNS.iter().any(|pattern| paths == *pattern)
    }

    /// Bell: the next bell in row-major order must agree on all four
    /// path-neighbor bits after each cell's own orientation rotation. A
    /// bell with no partner rings free.
    pub(crate) fn check_bell(&self, p: Point, deco: Decoration) -> bool {
        let pattern = self.neighbor_paths(p);
        let orient = usize::from(deco.dir);
        let Some((partner, partner_deco)) = self.next_symbol_after(p, SymbolKind::Bell) else {
            return true;
        };
        let partner_pattern = self.neighbor_paths(partner);
        let partner_orient = usize::from(partner_deco.dir);
        (0..4).all(|i| pattern[(i + orient) % 4] == partner_pattern[(i + partner_orient) % 4])
    }

    /// Tent: must touch the path at all, and the next tent in row-major
    /// order must touch it on the same number of edges.
    pub(crate) fn check_tent(&self, p: Point) -> bool {
        let edges = self.neighbor_paths(p).iter().filter(|&&b| b).count();
        if edges == 0 {
            return false;
        }
        let Some((partner, _)) = self.next_symbol_after(p, SymbolKind::Tent) else {
            return true;
        };
        let partner_edges = self.neighbor_paths(partner).iter().filter(|&&b| b).count();
        edges == partner_edges
    }

    /// Circle: over all circles on the panel, each unit direction may carry
    /// a path neighbor at most once and all four must be claimed. Only the
    /// first circle in scan order runs the check; the others defer to it.
    pub(crate) fn check_circle(&self, p: Point) -> bool {
        const CIRCLE_DIRECTIONS: [Point; 4] = [
            Point::new(1, 0),
            Point::new(-1, 0),
            Point::new(0, 1),
            Point::new(0, -1),
        ];
        let mut claimed = [false; 4];
        let mut first_found = false;
        for y in (1..self.grid.height()).step_by(2) {
            for x in (1..self.grid.width()).step_by(2) {
                let pos = Point::new(x, y);
                if self.grid.try_cell_at(pos).and_then(Cell::kind) != Some(SymbolKind::Circle) {
                    continue;
                }
                if !first_found && pos != p {
                    return true;
                }
                first_found = true;
                for (i, &d) in CIRCLE_DIRECTIONS.iter().enumerate() {
                    if self.grid.path_at(self.grid.step(pos, d)) {
                        if claimed[i] {
                            return false;
                        }
                        claimed[i] = true;
                    }
                }
            }
        }
        claimed.iter().filter(|&&b| b).count() == 4
    }

    /// Path-ness of the four unit neighbors in [`NEIGHBOR_DIRECTIONS`] order.
    fn neighbor_paths(&self, p: Point) -> [bool; 4] {
        let mut paths = [false; 4];
        for (i, &d) in NEIGHBOR_DIRECTIONS.iter().enumerate() {
            paths[i] = self.grid.path_at(self.grid.step(p, d));
        }
        paths
    }

    /// The next decoration of `kind` strictly after `p` in row-major order
    /// over odd/odd cells.
    fn next_symbol_after(&self, p: Point, kind: SymbolKind) -> Option<(Point, Decoration)> {
        let mut x = p.x + 2;
        let mut y = p.y;
        while y < self.grid.height() {
            while x < self.grid.width() {
                let pos = Point::new(x, y);
                if let Some(d) = self.grid.try_cell_at(pos).and_then(Cell::decoration) {
                    if d.kind == kind {
                        return Some((pos, d));
                    }
                }
                x += 2;
            }
            x = 1;
            y += 2;
        }
        None
    }
}
