//! The panel grid.
//!
//! A `Grid` is this crate's private copy of one panel's board: a
//! `width x height` matrix of typed cells plus a backup snapshot of the
//! untraced layout. Path reconstruction resets to the backup and repaints on
//! every change, so the cells live in an `im::Vector`: resetting is an O(1)
//! structural clone, not a buffer copy.
//!
//! Bounds are enforced, not clamped: [`Grid::cell`] returns a
//! [`GridError::OutOfBounds`] for a bad coordinate. Validators that want
//! "off-grid means no path" use [`Grid::try_cell_at`] / [`Grid::path_at`].

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, Decoration, GridError, Point};

/// One panel's cell matrix with pillar-aware coordinate stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Wrap modulus for the x axis; 0 on flat panels, equal to `width` on
    /// cylindrical ones.
    pillar_width: i32,
    cells: Vector<Cell>,
    backup: Vector<Cell>,
}

impl Grid {
    /// Create a grid from a row-major cell layout.
    ///
    /// The layout becomes both the live cells and the backup snapshot.
    #[must_use]
    pub fn new(width: i32, height: i32, pillar_width: i32, layout: Vec<Cell>) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        assert!(height % 2 == 1, "grid height must be odd (2n+1 lattice)");
        if pillar_width == 0 {
            assert!(width % 2 == 1, "flat grid width must be odd (2n+1 lattice)");
        } else {
            // A cylinder has no duplicated seam column: even width, with the
            // seam edges living in column `width - 1`.
            assert!(width % 2 == 0, "pillar grid width must be even");
            assert!(
                pillar_width == width,
                "pillar wrap modulus must match the grid width"
            );
        }
        assert_eq!(
            layout.len(),
            (width * height) as usize,
            "layout must cover every cell"
        );
        let cells: Vector<Cell> = layout.into_iter().collect();
        Self {
            width,
            height,
            pillar_width,
            backup: cells.clone(),
            cells,
        }
    }

    /// An all-open grid, mostly useful for tests.
    #[must_use]
    pub fn open(width: i32, height: i32) -> Self {
        Self::new(width, height, 0, vec![Cell::Open; (width * height) as usize])
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn pillar_width(&self) -> i32 {
        self.pillar_width
    }

    /// True when the horizontal axis wraps cylindrically.
    #[must_use]
    pub fn is_pillar(&self) -> bool {
        self.pillar_width > 0
    }

    #[must_use]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    fn index(&self, p: Point) -> Result<usize, GridError> {
        if self.in_bounds(p) {
            Ok((p.y * self.width + p.x) as usize)
        } else {
            Err(GridError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Bounds-checked cell read.
    pub fn cell(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        self.cell_at(Point::new(x, y))
    }

    /// Bounds-checked cell read by point.
    pub fn cell_at(&self, p: Point) -> Result<Cell, GridError> {
        self.index(p).map(|idx| self.cells[idx])
    }

    /// Cell read where out-of-bounds is an expected absence, not an error.
    #[must_use]
    pub fn try_cell_at(&self, p: Point) -> Option<Cell> {
        self.index(p).ok().map(|idx| self.cells[idx])
    }

    /// True when the cell at `p` exists and is painted path.
    ///
    /// Off-grid reads as "no path" here; directional scans rely on that to
    /// terminate at the border.
    #[must_use]
    pub fn path_at(&self, p: Point) -> bool {
        self.try_cell_at(p) == Some(Cell::Path)
    }

    /// Bounds-checked cell write.
    pub fn set_cell(&mut self, p: Point, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(p)?;
        self.cells.set(idx, cell);
        Ok(())
    }

    /// Discard the live cells and restore the backup snapshot.
    pub fn reset_to_backup(&mut self) {
        self.cells = self.backup.clone();
    }

    /// Make the current cells the new backup snapshot.
    pub fn snapshot_backup(&mut self) {
        self.backup = self.cells.clone();
    }

    /// Step from `p` by `d`, wrapping x on pillar grids.
    ///
    /// The y component is a plain addition; only the horizontal axis is
    /// cylindrical.
    #[must_use]
    pub fn step(&self, p: Point, d: Point) -> Point {
        let mut x = p.x + d.x;
        if self.pillar_width > 0 {
            x = x.rem_euclid(self.pillar_width);
        }
        Point::new(x, p.y + d.y)
    }

    /// All odd/odd lattice points in row-major order.
    pub fn odd_cells(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        (1..self.height)
            .step_by(2)
            .flat_map(move |y| (1..width).step_by(2).map(move |x| Point::new(x, y)))
    }

    /// All decorations on the grid with their positions, row-major.
    pub fn decorations(&self) -> impl Iterator<Item = (Point, Decoration)> + '_ {
        self.odd_cells().filter_map(|p| {
            self.try_cell_at(p).and_then(Cell::decoration).map(|d| (p, d))
        })
    }
}
