//! Path reconstruction.
//!
//! The host reports a trace as an ordered list of node-id pairs. Painting
//! that onto the grid is where most of the fiddly behavior of the whole
//! system lives: symmetry duplication, exit-node repair, the malformed-trace
//! abort, and the pillar wrap seam.

use crate::core::{Cell, Point, TraceError};
use crate::grid::Grid;
use crate::trace::{PanelConfig, TracedSegment};

/// What a reconstruction produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceOutcome {
    /// A traced segment reached one of the panel's exit nodes.
    pub complete: bool,
    /// Segments consumed from the host (mirror copies not counted); cached
    /// by the caller for change detection.
    pub consumed: usize,
}

/// Reset `grid` to its backup and paint the traced path onto it.
///
/// Segment handling, in order:
/// - a second endpoint in the exit set marks the trace complete;
/// - a first endpoint at or past `exit_point` is repaired to the last valid
///   first endpoint (the chain breaks at a door node);
/// - a second endpoint at or past `exit_point` is not painted (exit edges
///   are not grid cells);
/// - an origin-origin pair or a negative id aborts: the trace is malformed
///   and nothing should be validated this cycle;
/// - everything else paints both endpoints and their midpoint as path. On a
///   pillar, a midpoint that would leave the grid is the wrap seam and is
///   painted in the rightmost column instead.
pub fn reconstruct(
    grid: &mut Grid,
    segments: &[TracedSegment],
    config: &PanelConfig,
) -> Result<TraceOutcome, TraceError> {
    let mut all: Vec<TracedSegment> = segments.to_vec();
    if config.is_symmetric() && !segments.is_empty() {
        let table = config.symmetry.as_ref().ok_or(TraceError::NoSymmetryTable)?;
        for seg in segments {
            let mirror_a = *table
                .get(&seg.point_a)
                .ok_or(TraceError::MissingSymmetry(seg.point_a))?;
            let mirror_b = *table
                .get(&seg.point_b)
                .ok_or(TraceError::MissingSymmetry(seg.point_b))?;
            all.push(TracedSegment::new(mirror_a, mirror_b));
        }
    }

    grid.reset_to_backup();
    let mut outcome = TraceOutcome { complete: false, consumed: segments.len() };
    if all.is_empty() {
        return Ok(outcome);
    }

    let mut last_first = 0;
    for seg in &all {
        let mut a = seg.point_a;
        let b = seg.point_b;
        if config.is_exit(b) {
            outcome.complete = true;
        }
        if a >= config.exit_point {
            a = last_first;
        }
        last_first = a;
        if b >= config.exit_point {
            continue;
        }
        let effective = TracedSegment::new(a, b);
        if effective.is_origin_pair() || effective.has_negative_endpoint() {
            return Err(TraceError::Malformed);
        }

        let pa = config.node_point(a);
        let pb = config.node_point(b);
        grid.set_cell(pa, Cell::Path)?;
        grid.set_cell(pb, Cell::Path)?;

        let adjacent = pa.x == pb.x || (pa.x - pb.x).abs() == 2;
        let mid = if config.pillar_width > 0 && !adjacent {
            // The segment crosses the cylinder seam; its edge cell is the
            // rightmost column.
            Point::new(config.width - 1, (pa.y + pb.y) / 2)
        } else {
            Point::new((pa.x + pb.x) / 2, (pa.y + pb.y) / 2)
        };
        grid.set_cell(mid, Cell::Path)?;
    }

    Ok(outcome)
}
