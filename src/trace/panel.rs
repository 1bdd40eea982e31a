//! Per-panel configuration.
//!
//! Everything the watchdogs need to know about one monitored panel is fixed
//! at construction time and collected here: dimensions, topology, exit
//! nodes, the symmetry table, style flags, and the untraced cell layout.
//! Watchdogs never discover panel structure at runtime; the embedder hands
//! them a `PanelConfig` per panel, the way the host's own tables describe it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::access::PanelId;
use crate::core::{Cell, Point};
use crate::grid::Grid;

/// Panel style bit flags, mirrored into the host's style field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    /// Every traced segment must have a mirrored counterpart.
    pub const SYMMETRICAL: StyleFlags = StyleFlags(1 << 1);
    /// The panel renders its decorative dots.
    pub const HAS_DOTS: StyleFlags = StyleFlags(1 << 2);

    /// No flags set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The raw bit value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// True when every bit of `flag` is set.
    #[must_use]
    pub const fn contains(self, flag: StyleFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// This value with `flag` set.
    #[must_use]
    pub const fn with(self, flag: StyleFlags) -> Self {
        Self(self.0 | flag.0)
    }

    /// This value with `flag` cleared.
    #[must_use]
    pub const fn without(self, flag: StyleFlags) -> Self {
        Self(self.0 & !flag.0)
    }
}

/// Construction-time description of one monitored panel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PanelConfig {
    /// The host entity this panel lives on.
    pub panel: PanelId,
    /// Grid width in cells (odd on flat panels, even on pillars).
    pub width: i32,
    /// Grid height in cells (odd).
    pub height: i32,
    /// Horizontal wrap modulus; 0 for flat panels, `width` for pillars.
    pub pillar_width: i32,
    /// Node ids at or above this threshold are exits, not grid positions.
    pub exit_point: i32,
    /// The exit nodes that complete this panel.
    pub exits: SmallVec<[i32; 4]>,
    /// Mirror mapping for symmetric panels: node id to its counterpart.
    pub symmetry: Option<FxHashMap<i32, i32>>,
    /// Style flags the panel was configured with.
    pub style: StyleFlags,
    /// Untraced cell layout, row-major; becomes the grid's backup snapshot.
    pub layout: Vec<Cell>,
}

impl PanelConfig {
    /// A flat panel with an all-open layout; callers fill in decorations.
    #[must_use]
    pub fn open(panel: PanelId, width: i32, height: i32) -> Self {
        Self {
            panel,
            width,
            height,
            pillar_width: 0,
            exit_point: i32::MAX,
            exits: SmallVec::new(),
            symmetry: None,
            style: StyleFlags::empty(),
            layout: vec![Cell::Open; (width * height) as usize],
        }
    }

    /// Build the working grid from the layout.
    #[must_use]
    pub fn build_grid(&self) -> Grid {
        Grid::new(self.width, self.height, self.pillar_width, self.layout.clone())
    }

    /// True when the panel runs in symmetry mode.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.style.contains(StyleFlags::SYMMETRICAL)
    }

    /// True when `node` is one of this panel's completing exits.
    #[must_use]
    pub fn is_exit(&self, node: i32) -> bool {
        self.exits.contains(&node)
    }

    /// Map a node id to its grid coordinate.
    ///
    /// Nodes number the intersection lattice from the bottom row upward;
    /// a row holds `width / 2 + 1` nodes on flat panels and `width / 2` on
    /// pillars (the seam column has no node of its own).
    #[must_use]
    pub fn node_point(&self, node: i32) -> Point {
        let stride = if self.pillar_width > 0 {
            self.width / 2
        } else {
            self.width / 2 + 1
        };
        Point::new(
            (node % stride) * 2,
            self.height - 1 - (node / stride) * 2,
        )
    }

    /// Place a decoration into the layout at an odd/odd cell.
    pub fn set_layout_cell(&mut self, p: Point, cell: Cell) {
        assert!(p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height);
        self.layout[(p.y * self.width + p.x) as usize] = cell;
    }
}
