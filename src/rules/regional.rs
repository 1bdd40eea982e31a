//! Rules that quantify over a resolved region.

use rustc_hash::FxHashSet;

use crate::core::{Cell, Decoration, Point, SymbolKind, DIRECTIONS};
use crate::grid::resolve_region;
use crate::rules::checker::SymbolChecker;
use crate::rules::{PROBE_DIRECTIONS, WALL_PATTERNS};

impl SymbolChecker<'_> {
    /// Mine: of the eight cells two steps away, count those sharing the
    /// mine's region; the encoded count is what's missing from a full ring
    /// (8 interior, 5 on an edge, 3 in a corner).
    pub(crate) fn check_mine(&self, p: Point, deco: Decoration) -> bool {
        const NEARBY: [Point; 8] = [
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(0, -2),
            Point::new(-2, 0),
            Point::new(2, 2),
            Point::new(-2, 2),
            Point::new(-2, -2),
            Point::new(2, -2),
        ];
        let region = resolve_region(self.grid, p);
        let near = NEARBY
            .iter()
            .filter(|&&d| region.contains(&self.grid.step(p, d)))
            .count() as i32;

        let on_x_edge = p.x == 1 || p.x == self.grid.width() - 2;
        let on_y_edge = p.y == 1 || p.y == self.grid.height() - 2;
        let expected = if on_x_edge && on_y_edge {
            3 - near
        } else if on_x_edge || on_y_edge {
            5 - near
        } else {
            8 - near
        };
        expected == i32::from(deco.count)
    }

    /// Head: everything in the region strictly forward of the encoded
    /// direction (the quadrant, for diagonals) must be open, blocked out of
    /// the panel, or the inert arrow sentinel. Direction 9 is the inert
    /// head and always passes.
    pub(crate) fn check_head(&self, p: Point, deco: Decoration) -> bool {
        let Some(&dir) = DIRECTIONS.get(deco.dir as usize) else {
            return true;
        };
        for q in resolve_region(self.grid, p) {
            let forward = (dir.x == 0 || (q.x - p.x) * dir.x > 0)
                && (dir.y == 0 || (q.y - p.y) * dir.y > 0);
            if !forward {
                continue;
            }
            match self.grid.try_cell_at(q) {
                Some(Cell::Open | Cell::Blocked) => {}
                Some(Cell::Decoration(d)) if d.is_inert_arrow() => {}
                _ => return false,
            }
        }
        true
    }

    /// Ghost: every compartment of the panel must hold exactly one ghost.
    ///
    /// Compartments are visited in random order; the verdict is
    /// order-independent because each compartment is judged on its own
    /// membership only.
    pub(crate) fn check_ghost(&mut self) -> bool {
        let mut open: FxHashSet<Point> = self.grid.odd_cells().collect();
        while !open.is_empty() {
            let pick = self.rng.gen_range_usize(0..open.len());
            let Some(&origin) = open.iter().nth(pick) else {
                break;
            };
            let region = resolve_region(self.grid, origin);
            let mut ghosts = 0;
            for &q in &region {
                if self.grid.try_cell_at(q).and_then(Cell::kind) == Some(SymbolKind::Ghost) {
                    ghosts += 1;
                    if ghosts > 1 {
                        return false;
                    }
                }
                open.remove(&q);
            }
            if ghosts == 0 {
                return false;
            }
        }
        true
    }

    /// Bar: the encoded bucket of the region's wall-pattern histogram must
    /// be exactly claimed by the matching bars in the region.
    pub(crate) fn check_bar(&self, p: Point, deco: Decoration) -> bool {
        let region = resolve_region(self.grid, p);
        let mut histogram = self.wall_histogram(&region);
        for &q in &region {
            if let Some(d) = self.grid.try_cell_at(q).and_then(Cell::decoration) {
                if d.same_kind_count(deco) {
                    histogram[d.count as usize] -= 1;
                }
            }
        }
        histogram[deco.count as usize] == 0
    }

    /// Histogram of local wall patterns over the region's crossing points
    /// (the 8-neighborhood of every region cell).
    ///
    /// Buckets: 1-9 the nine intersection patterns, 0xA/0xB plain
    /// column/row walls, 0xC/0xD column/row gaps. Bucket 0 is reserved and
    /// the 4-bit tail stays empty, so a malformed encoding reads zero.
    fn wall_histogram(&self, region: &FxHashSet<Point>) -> [i32; 16] {
        const AROUND: [Point; 8] = [
            Point::new(0, 1),
            Point::new(0, -1),
            Point::new(1, 0),
            Point::new(-1, 0),
            Point::new(1, 1),
            Point::new(1, -1),
            Point::new(-1, -1),
            Point::new(-1, 1),
        ];
        let mut points = FxHashSet::default();
        for &cell in region {
            for d in AROUND {
                points.insert(self.grid.step(cell, d));
            }
        }

        let mut histogram = [0i32; 16];
        for &q in &points {
            let Some(cell) = self.grid.try_cell_at(q) else {
                continue;
            };
            if q.is_edge_cell() && !cell.is_path() {
                let row_edge = q.x % 2 != 0;
                let bucket = match (cell, row_edge) {
                    (Cell::Gap, true) => 0xD,
                    (Cell::Gap, false) => 0xC,
                    (_, true) => 0xB,
                    (_, false) => 0xA,
                };
                histogram[bucket] += 1;
                continue;
            }

            // Intersections; a path cell matches no pattern.
            let mut walls = [false; 4];
            if !cell.is_path() {
                for (i, &d) in PROBE_DIRECTIONS.iter().enumerate() {
                    let side = self.grid.step(q, d);
                    walls[i] = self.grid.in_bounds(side) && !self.grid.path_at(side);
                }
            }
            for (i, pattern) in WALL_PATTERNS.iter().enumerate() {
                if walls == *pattern {
                    histogram[i + 1] += 1;
                }
            }
        }
        histogram
    }

    /// Diamond: the region must hold exactly `count` decorated cells.
    pub(crate) fn check_diamond(&self, p: Point, deco: Decoration) -> bool {
        let region = resolve_region(self.grid, p);
        let decorated = region
            .iter()
            .filter(|&&q| matches!(self.grid.try_cell_at(q), Some(Cell::Decoration(_))))
            .count();
        decorated == usize::from(deco.count)
    }

    /// Dice: the counts of all dice in the region must sum to the region's
    /// total cell count.
    pub(crate) fn check_dice(&self, p: Point) -> bool {
        let region = resolve_region(self.grid, p);
        let target: usize = region
            .iter()
            .filter_map(|&q| self.grid.try_cell_at(q).and_then(Cell::decoration))
            .filter(|d| d.kind == SymbolKind::Dice)
            .map(|d| usize::from(d.count))
            .sum();
        region.len() == target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WatchRng;
    use crate::grid::Grid;

    fn grid_with(cells: &[(i32, i32, Cell)]) -> Grid {
        let mut grid = Grid::open(5, 5);
        for &(x, y, cell) in cells {
            grid.set_cell(Point::new(x, y), cell).unwrap();
        }
        grid
    }

    fn check_at(grid: &Grid, x: i32, y: i32) -> bool {
        let mut rng = WatchRng::new(7);
        SymbolChecker::new(grid, &mut rng).check(Point::new(x, y))
    }

    fn deco(kind: SymbolKind, count: u8) -> Cell {
        Cell::Decoration(Decoration::counted(kind, count))
    }

    // A vertical wall between columns 1 and 3 on the 5x5 grid.
    const WALL: [(i32, i32, Cell); 2] = [(2, 1, Cell::Path), (2, 3, Cell::Path)];

    #[test]
    fn test_mine_corner_counts_missing_neighbors() {
        // Open grid: (3,1), (1,3) and (3,3) all share the corner's region,
        // so nothing is missing.
        let grid = grid_with(&[(1, 1, deco(SymbolKind::Mine, 0))]);
        assert!(check_at(&grid, 1, 1));

        // Wall off the right half: two of the three ring cells leave the
        // region.
        let mut cells = vec![(1, 1, deco(SymbolKind::Mine, 2))];
        cells.extend(WALL);
        let grid = grid_with(&cells);
        assert!(check_at(&grid, 1, 1));

        let mut cells = vec![(1, 1, deco(SymbolKind::Mine, 1))];
        cells.extend(WALL);
        let grid = grid_with(&cells);
        assert!(!check_at(&grid, 1, 1));
    }

    #[test]
    fn test_head_forward_half_plane() {
        const EAST: u8 = 2;
        let head = Cell::Decoration(Decoration::directed(SymbolKind::Head, EAST));

        // Nothing east of the head: fine.
        let grid = grid_with(&[(1, 1, head)]);
        assert!(check_at(&grid, 1, 1));

        // A decoration east of it invalidates.
        let grid = grid_with(&[(1, 1, head), (3, 1, deco(SymbolKind::Diamond, 1))]);
        assert!(!check_at(&grid, 1, 1));

        // A decoration west of it is outside the half-plane.
        let grid = grid_with(&[(3, 1, head), (1, 1, deco(SymbolKind::Diamond, 1))]);
        assert!(check_at(&grid, 3, 1));

        // The inert arrow sentinel is tolerated.
        let inert = Cell::Decoration(Decoration::directed(SymbolKind::Arrow, 9));
        let grid = grid_with(&[(1, 1, head), (3, 1, inert)]);
        assert!(check_at(&grid, 1, 1));

        // Walling the offender out of the region also clears it.
        let mut cells = vec![(1, 1, head), (3, 1, deco(SymbolKind::Diamond, 1))];
        cells.extend(WALL);
        let grid = grid_with(&cells);
        assert!(check_at(&grid, 1, 1));
    }

    #[test]
    fn test_head_inert_direction() {
        let head = Cell::Decoration(Decoration::directed(SymbolKind::Head, 9));
        let grid = grid_with(&[(1, 1, head), (3, 1, deco(SymbolKind::Diamond, 1))]);
        assert!(check_at(&grid, 1, 1));
    }

    #[test]
    fn test_ghost_one_per_region() {
        let ghost = deco(SymbolKind::Ghost, 0);

        // One region, one ghost.
        let grid = grid_with(&[(1, 1, ghost)]);
        assert!(check_at(&grid, 1, 1));

        // Two ghosts in the same region.
        let grid = grid_with(&[(1, 1, ghost), (3, 3, ghost)]);
        assert!(!check_at(&grid, 1, 1));

        // Split the panel: one ghost each side passes.
        let mut cells = vec![(1, 1, ghost), (3, 1, ghost)];
        cells.extend(WALL);
        let grid = grid_with(&cells);
        assert!(check_at(&grid, 1, 1));

        // A ghostless region fails even when the ghost's own region is fine.
        let mut cells = vec![(1, 1, ghost)];
        cells.extend(WALL);
        let grid = grid_with(&cells);
        assert!(!check_at(&grid, 1, 1));
    }

    #[test]
    fn test_ghost_order_independent_across_seeds() {
        let ghost = deco(SymbolKind::Ghost, 0);
        let mut cells = vec![(1, 1, ghost), (3, 1, ghost)];
        cells.extend(WALL);
        let split = grid_with(&cells);
        let merged = grid_with(&[(1, 1, ghost), (3, 1, ghost)]);

        for seed in 0..64 {
            let mut rng = WatchRng::new(seed);
            assert!(SymbolChecker::new(&split, &mut rng).check(Point::new(1, 1)));
            let mut rng = WatchRng::new(seed);
            assert!(!SymbolChecker::new(&merged, &mut rng).check(Point::new(1, 1)));
        }
    }

    #[test]
    fn test_bar_open_grid_buckets() {
        // On an open 5x5 the region's crossing points produce exactly one
        // all-open intersection (the center), so bucket 9 holds one entry
        // and the bar claims it.
        let grid = grid_with(&[(1, 1, deco(SymbolKind::Bar, 9))]);
        assert!(check_at(&grid, 1, 1));

        // Bucket 0 is reserved and always empty: subtracting the bar itself
        // leaves -1.
        let grid = grid_with(&[(1, 1, deco(SymbolKind::Bar, 0))]);
        assert!(!check_at(&grid, 1, 1));

        // Two bars claiming the single bucket-9 pattern overdraw it.
        let grid = grid_with(&[
            (1, 1, deco(SymbolKind::Bar, 9)),
            (3, 3, deco(SymbolKind::Bar, 9)),
        ]);
        assert!(!check_at(&grid, 1, 1));
    }

    #[test]
    fn test_bar_gap_buckets() {
        // A row gap at (1,0) swaps that edge from bucket 0xB to 0xD.
        let grid = grid_with(&[(1, 1, deco(SymbolKind::Bar, 13)), (1, 0, Cell::Gap)]);
        assert!(check_at(&grid, 1, 1));

        let grid = grid_with(&[(1, 1, deco(SymbolKind::Bar, 13))]);
        assert!(!check_at(&grid, 1, 1));
    }

    #[test]
    fn test_diamond_counts_decorated_cells() {
        // The diamond itself plus two others: count 3.
        let cells = [
            (1, 1, deco(SymbolKind::Diamond, 3)),
            (3, 1, deco(SymbolKind::Dice, 0)),
            (3, 3, deco(SymbolKind::Dice, 0)),
        ];
        let grid = grid_with(&cells);
        assert!(check_at(&grid, 1, 1));

        let grid = grid_with(&cells[..2]);
        assert!(!check_at(&grid, 1, 1));

        let more = [
            cells[0],
            cells[1],
            cells[2],
            (1, 3, deco(SymbolKind::Dice, 0)),
        ];
        let grid = grid_with(&more);
        assert!(!check_at(&grid, 1, 1));
    }

    #[test]
    fn test_dice_sum_equals_region_size() {
        // Open 5x5: the region holds 4 cells.
        let grid = grid_with(&[(1, 1, deco(SymbolKind::Dice, 4))]);
        assert!(check_at(&grid, 1, 1));

        let grid = grid_with(&[
            (1, 1, deco(SymbolKind::Dice, 2)),
            (3, 3, deco(SymbolKind::Dice, 2)),
        ]);
        assert!(check_at(&grid, 1, 1));

        let grid = grid_with(&[(1, 1, deco(SymbolKind::Dice, 3))]);
        assert!(!check_at(&grid, 1, 1));
    }
}
