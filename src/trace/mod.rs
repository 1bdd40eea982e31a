//! Traced segments, panel configuration, and path reconstruction.

pub mod panel;
pub mod reconstruct;
pub mod segment;

pub use panel::{PanelConfig, StyleFlags};
pub use reconstruct::{reconstruct, TraceOutcome};
pub use segment::TracedSegment;
