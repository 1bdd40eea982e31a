//! Typed cell values.
//!
//! The host application packs a cell into 32 bits: a type flag for "nothing
//! can occupy this cell", a decoration-kind tag, a 4-bit count, a 4-bit
//! direction, and a sentinel for painted path cells. This crate keeps its own
//! copy of the board, so the packed form is replaced by an explicit tagged
//! value with typed accessors; the fifteen validators never touch a mask
//! literal.
//!
//! ## Cell kinds
//!
//! - `Open`: nothing on the cell (packed encoding zero).
//! - `Blocked`: the cell does not exist on this panel; excluded from regions.
//! - `Path`: painted by the player's trace; distinct from every decoration.
//! - `Gap`: a broken edge; only meaningful on edge cells.
//! - `Decoration`: a symbol with its 4-bit count and direction parameters.

use serde::{Deserialize, Serialize};

/// The symbol alphabet.
///
/// `Extension` stands for any tag this crate does not know; its validator is
/// a permissive pass so newer panels do not crash older logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Arrow,
    Mine,
    Head,
    Mushroom,
    Ghost,
    Bar,
    Antitriangle,
    Dart,
    Rain,
    Pointer,
    Diamond,
    Dice,
    Bell,
    Tent,
    Circle,
    Extension,
}

/// A decorated cell: symbol kind plus its two 4-bit parameters.
///
/// Which parameter a rule reads is the rule's business: Arrow uses both,
/// Mine only `count`, Head and Rain only `dir`, Mushroom neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: SymbolKind,
    /// Count / value parameter (4 bits).
    pub count: u8,
    /// Direction / orientation index (4 bits).
    pub dir: u8,
}

impl Decoration {
    /// Create a decoration. Both parameters are 4-bit fields.
    #[must_use]
    pub fn new(kind: SymbolKind, count: u8, dir: u8) -> Self {
        assert!(count < 16, "count is a 4-bit field");
        assert!(dir < 16, "dir is a 4-bit field");
        Self { kind, count, dir }
    }

    /// A decoration carrying only a count.
    #[must_use]
    pub fn counted(kind: SymbolKind, count: u8) -> Self {
        Self::new(kind, count, 0)
    }

    /// A decoration carrying only a direction index.
    #[must_use]
    pub fn directed(kind: SymbolKind, dir: u8) -> Self {
        Self::new(kind, 0, dir)
    }

    /// A decoration with no parameters.
    #[must_use]
    pub fn plain(kind: SymbolKind) -> Self {
        Self::new(kind, 0, 0)
    }

    /// Same kind and count, direction ignored.
    ///
    /// The Bar validator matches region partners this way.
    #[must_use]
    pub fn same_kind_count(self, other: Decoration) -> bool {
        self.kind == other.kind && self.count == other.count
    }

    /// Same kind and direction, count ignored.
    #[must_use]
    pub fn same_kind_dir(self, other: Decoration) -> bool {
        self.kind == other.kind && self.dir == other.dir
    }

    /// The inert sentinel: an Arrow whose direction index points outside the
    /// direction table. Head symbols tolerate it in their forward half-plane.
    #[must_use]
    pub fn is_inert_arrow(self) -> bool {
        self.kind == SymbolKind::Arrow && self.dir as usize >= crate::core::DIRECTIONS.len()
    }
}

/// One cell of the puzzle lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing occupies the cell.
    #[default]
    Open,
    /// The cell does not exist on this panel.
    Blocked,
    /// Painted by the player's traced path.
    Path,
    /// A broken edge (row or column gap).
    Gap,
    /// A puzzle symbol.
    Decoration(Decoration),
}

impl Cell {
    /// True for the path sentinel.
    #[must_use]
    pub fn is_path(self) -> bool {
        self == Cell::Path
    }

    /// True for cells excluded from regions.
    #[must_use]
    pub fn is_blocked(self) -> bool {
        self == Cell::Blocked
    }

    /// The decoration, if this cell holds one.
    #[must_use]
    pub fn decoration(self) -> Option<Decoration> {
        match self {
            Cell::Decoration(deco) => Some(deco),
            _ => None,
        }
    }

    /// The decoration kind, if this cell holds one.
    #[must_use]
    pub fn kind(self) -> Option<SymbolKind> {
        self.decoration().map(|deco| deco.kind)
    }
}
