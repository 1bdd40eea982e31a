//! Validator dispatch and the directional scan rules.

use crate::core::{Cell, Decoration, Point, SymbolKind, WatchRng, AXIS_DIRECTIONS, DIRECTIONS};
use crate::grid::Grid;

/// Evaluates symbol constraints against a painted grid.
///
/// Borrows the grid for one validation sweep; the RNG drives the Ghost
/// rule's compartment traversal order (which must not affect its verdict).
pub struct SymbolChecker<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) rng: &'a mut WatchRng,
}

impl<'a> SymbolChecker<'a> {
    pub fn new(grid: &'a Grid, rng: &'a mut WatchRng) -> Self {
        Self { grid, rng }
    }

    /// Check the cell at `p`.
    ///
    /// Non-decorations pass trivially; an `Extension` tag passes so unknown
    /// symbols on newer panels degrade to "no constraint" instead of
    /// rejecting every trace.
    pub fn check(&mut self, p: Point) -> bool {
        let Some(deco) = self.grid.try_cell_at(p).and_then(Cell::decoration) else {
            return true;
        };
        match deco.kind {
            SymbolKind::Arrow => self.check_arrow(p, deco),
            SymbolKind::Mine => self.check_mine(p, deco),
            SymbolKind::Head => self.check_head(p, deco),
            SymbolKind::Mushroom => self.check_mushroom(p),
            SymbolKind::Ghost => self.check_ghost(),
            SymbolKind::Bar => self.check_bar(p, deco),
            SymbolKind::Antitriangle => self.check_antitriangle(p, deco),
            SymbolKind::Dart => self.check_dart(p, deco),
            SymbolKind::Rain => self.check_rain(p, deco),
            SymbolKind::Pointer => self.check_pointer(p, deco),
            SymbolKind::Diamond => self.check_diamond(p, deco),
            SymbolKind::Dice => self.check_dice(p),
            SymbolKind::Bell => self.check_bell(p, deco),
            SymbolKind::Tent => self.check_tent(p),
            SymbolKind::Circle => self.check_circle(p),
            SymbolKind::Extension => true,
        }
    }

    /// Sweep every interior cell; the first violated symbol, if any.
    pub fn first_failure(&mut self) -> Option<Point> {
        for x in 1..self.grid.width() {
            for y in 1..self.grid.height() {
                let p = Point::new(x, y);
                if !self.check(p) {
                    return Some(p);
                }
            }
        }
        None
    }

    // === Directional scans ===

    /// Arrow: exactly `count` path cells along the ray, short-circuiting as
    /// soon as one too many is seen.
    fn check_arrow(&self, p: Point, deco: Decoration) -> bool {
        if self.grid.is_pillar() {
            return self.check_arrow_pillar(p, deco);
        }
        let Some(&dir) = DIRECTIONS.get(deco.dir as usize) else {
            return true; // inert sentinel
        };
        let target = i32::from(deco.count);
        let mut pos = p + Point::new(dir.x / 2, dir.y / 2);
        let mut count = 0;
        while self.grid.in_bounds(pos) {
            if self.grid.path_at(pos) {
                count += 1;
                if count > target {
                    return false;
                }
            }
            pos = pos + dir;
        }
        count == target
    }

    /// Arrow on a cylinder: the x axis wraps, so a horizontal scan stops
    /// after one full turn of the row and everything else exits on y.
    fn check_arrow_pillar(&self, p: Point, deco: Decoration) -> bool {
        let Some(&dir) = DIRECTIONS.get(deco.dir as usize) else {
            return true;
        };
        let target = i32::from(deco.count);
        let mut pos = self.grid.step(p, Point::new(dir.x / 2, dir.y / 2));
        let start_x = pos.x;
        let mut count = 0;
        while pos.y >= 0 && pos.y < self.grid.height() {
            if self.grid.path_at(pos) {
                count += 1;
                if count > target {
                    return false;
                }
            }
            pos = self.grid.step(pos, dir);
            if dir.y == 0 && pos.x == start_x {
                break;
            }
        }
        count == target
    }

    /// Dart: exactly `count` path cells along the ray. Unlike Arrow the scan
    /// never wraps (the grid border always terminates it) and the full ray
    /// is walked before comparing.
    fn check_dart(&self, p: Point, deco: Decoration) -> bool {
        let Some(&dir) = DIRECTIONS.get(deco.dir as usize) else {
            return true;
        };
        let target = i32::from(deco.count);
        let mut pos = p + Point::new(dir.x / 2, dir.y / 2);
        let mut count = 0;
        while self.grid.in_bounds(pos) {
            if self.grid.path_at(pos) {
                count += 1;
            }
            pos = pos + dir;
        }
        count == target
    }

    /// Mushroom: all four axis scans must reach a path cell before leaving
    /// the grid.
    fn check_mushroom(&self, p: Point) -> bool {
        AXIS_DIRECTIONS.iter().all(|&dir| {
            let mut pos = p + Point::new(dir.x / 2, dir.y / 2);
            while self.grid.in_bounds(pos) {
                if self.grid.path_at(pos) {
                    return true;
                }
                pos = pos + dir;
            }
            false
        })
    }

    /// Pointer: the encoded value is a 4-bit mask of which directions tie
    /// for the nearest path cell, in E/W/S/N order with weights 8/4/2/1.
    /// No path in any direction fails; an all-zero mask reads as 15.
    fn check_pointer(&self, p: Point, deco: Decoration) -> bool {
        const POINTER_DIRECTIONS: [Point; 4] = [
            Point::new(2, 0),
            Point::new(-2, 0),
            Point::new(0, 2),
            Point::new(0, -2),
        ];
        let mut distances = [None::<i32>; 4];
        for (slot, &dir) in distances.iter_mut().zip(POINTER_DIRECTIONS.iter()) {
            let mut pos = p + Point::new(dir.x / 2, dir.y / 2);
            let mut steps = 0;
            while self.grid.in_bounds(pos) {
                if self.grid.path_at(pos) {
                    *slot = Some(steps);
                    break;
                }
                pos = pos + dir;
                steps += 1;
            }
        }

        let Some(min) = distances.iter().filter_map(|d| *d).min() else {
            return false;
        };
        let mut mask = 0u8;
        for (i, d) in distances.iter().enumerate() {
            if *d == Some(min) {
                mask |= 8 >> i;
            }
        }
        if mask == 0 {
            mask = 15;
        }
        mask == deco.count
    }

    /// Rain: recursive surround check. The adjacent cell in the scan
    /// direction and both perpendicular spread cells must each be path, or
    /// the same requirement must hold two cells further out in the matching
    /// sub-direction. Leaving the grid fails.
    fn check_rain(&self, p: Point, deco: Decoration) -> bool {
        const RAIN_DIRECTIONS: [Point; 8] = [
            Point::new(0, 1),
            Point::new(0, -1),
            Point::new(1, 0),
            Point::new(-1, 0),
            Point::new(1, 1),
            Point::new(1, -1),
            Point::new(-1, -1),
            Point::new(-1, 1),
        ];
        let Some(&dir) = RAIN_DIRECTIONS.get(deco.dir as usize) else {
            return true;
        };
        self.surrounded(p, dir, None)
    }

    /// `arm` restricts spreading to one perpendicular side once the check
    /// has branched; the initial call spreads both ways.
    fn surrounded(&self, pos: Point, dir: Point, arm: Option<usize>) -> bool {
        if !self.grid.in_bounds(pos) {
            return false;
        }
        let spread = if dir.x == 0 {
            [Point::new(-1, 0), Point::new(1, 0)]
        } else {
            [Point::new(0, -1), Point::new(0, 1)]
        };
        for (i, &side) in spread.iter().enumerate() {
            if arm.map_or(true, |a| a == i) && !self.grid.path_at(self.grid.step(pos, side)) {
                if !self.surrounded(self.grid.step(pos, side * 2), dir, Some(i)) {
                    return false;
                }
            }
        }
        if !self.grid.path_at(self.grid.step(pos, dir))
            && !self.surrounded(self.grid.step(pos, dir * 2), dir, None)
        {
            return false;
        }
        true
    }
}
