//! Symbol validation.
//!
//! [`SymbolChecker`] dispatches every decorated cell to exactly one predicate
//! per symbol kind. Dispatch is an exhaustive `match` over [`SymbolKind`], so
//! adding a symbol without a rule is a compile error; the `Extension` kind is
//! the deliberate escape hatch and always passes.
//!
//! The predicates are split by shape:
//! - `checker`: dispatch plus the directional scans (Arrow, Dart, Mushroom,
//!   Pointer, Rain);
//! - `regional`: rules quantifying over a resolved region (Mine, Head,
//!   Ghost, Bar, Diamond, Dice);
//! - `paired`: local-geometry and partner-scan rules (Antitriangle, Bell,
//!   Tent, Circle).

pub mod checker;
mod paired;
mod regional;

pub use checker::SymbolChecker;

use crate::core::Point;

/// Probe order for 4-direction wall/corner patterns.
pub(crate) const PROBE_DIRECTIONS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// The nine local wall patterns, in bucket order (pattern `i` is histogram
/// bucket `i + 1`).
///
/// Each entry is a 4-direction truth vector in [`PROBE_DIRECTIONS`] order.
/// The Bar histogram reads `true` as "open side"; the Antitriangle corner
/// test reads `true` as "path side". Both consume the same table.
pub(crate) const WALL_PATTERNS: [[bool; 4]; 9] = [
    [true, true, false, false],
    [false, true, true, false],
    [false, false, true, true],
    [true, false, false, true],
    [false, true, true, true],
    [true, false, true, true],
    [true, true, false, true],
    [true, true, true, false],
    [true, true, true, true],
];
