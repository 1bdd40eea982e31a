//! Core value types: coordinates, cells, RNG, errors.
//!
//! Everything above this module (grids, traces, rules, watchdogs) is built
//! out of these pieces.

pub mod cell;
pub mod error;
pub mod point;
pub mod rng;

pub use cell::{Cell, Decoration, SymbolKind};
pub use error::{GridError, TraceError};
pub use point::{Point, AXIS_DIRECTIONS, DIRECTIONS, EDGE_DIRECTIONS};
pub use rng::WatchRng;
