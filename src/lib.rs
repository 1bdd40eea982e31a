//! # panelwatch
//!
//! A grid-puzzle rule engine with background panel watchdogs.
//!
//! The host application renders puzzles and traces the player's line, but it
//! does not understand the extended symbol alphabet drawn on some panels.
//! This crate watches those panels from the outside: it polls traced-edge
//! state through a narrow [`StateAccess`] boundary, repaints a private copy
//! of the board, and judges the finished trace against fifteen independent
//! symbol rules, accepting or rejecting it through the same boundary.
//!
//! ## Design Principles
//!
//! 1. **Typed cells**: the host's bit-packed cell encoding becomes a tagged
//!    [`Cell`] value; no validator touches a mask literal.
//!
//! 2. **Private grids**: every watchdog rebuilds its own grid from external
//!    data when the trace changes. Nothing is shared between instances but
//!    the `StateAccess` collaborator.
//!
//! 3. **Nothing escapes a poll**: validators and reconstruction degrade to
//!    conservative booleans and no-ops; a polling loop never crashes.
//!
//! 4. **Owned lifecycles**: loops run under a cancellation token and are
//!    joined on shutdown, never detached and forgotten.
//!
//! ## Modules
//!
//! - `core`: points, direction tables, typed cells, RNG, errors
//! - `grid`: the cell matrix and region flood fill
//! - `trace`: traced segments, panel configuration, path reconstruction
//! - `rules`: the symbol validator engine
//! - `access`: the external state boundary and its in-memory double
//! - `watch`: the polling supervisor and the watchdog state machines

pub mod access;
pub mod core;
pub mod grid;
pub mod rules;
pub mod trace;
pub mod watch;

// Re-export commonly used types
pub use crate::core::{
    Cell, Decoration, GridError, Point, SymbolKind, TraceError, WatchRng,
};

pub use crate::grid::{resolve_region, Grid};

pub use crate::trace::{reconstruct, PanelConfig, StyleFlags, TraceOutcome, TracedSegment};

pub use crate::rules::SymbolChecker;

pub use crate::access::{Field, FieldValue, MemoryAccess, PanelId, StateAccess};

pub use crate::watch::{
    spawn_watchdog, BridgeWatchdog, CancelToken, JungleWatchdog, PowerCondition, PowerWatchdog,
    SymbolWatchdog, Tick, Watchdog, WatchdogHandle, WatchdogPool, REJECT_NODE,
};
