//! Region resolution.
//!
//! A region is the maximal set of odd/odd cells mutually reachable without
//! crossing a painted path edge. It is the unit most symbol rules quantify
//! over, recomputed per validation call and never cached; the grid changes
//! under every poll.

use rustc_hash::FxHashSet;

use crate::core::{Cell, Point, EDGE_DIRECTIONS};
use crate::grid::Grid;

/// Flood-fill the region containing `origin`.
///
/// A step from `p` in an axis direction `d` is blocked when the edge cell
/// `p + d` is path; otherwise the far cell `p + 2d` joins the region unless
/// its cell is blocked out of the panel. The outer border is never crossed,
/// except that on pillar grids the horizontal border wraps instead of
/// stopping. The origin itself is always part of the region.
///
/// Calling this twice on an unchanged grid yields identical sets.
#[must_use]
pub fn resolve_region(grid: &Grid, origin: Point) -> FxHashSet<Point> {
    let mut region = FxHashSet::default();
    let mut pending = vec![origin];
    region.insert(origin);

    while let Some(p) = pending.pop() {
        for dir in EDGE_DIRECTIONS {
            let edge = grid.step(p, dir);
            let on_x_border = edge.x == 0 || edge.x + 1 == grid.width();
            if (!grid.is_pillar() && on_x_border) || edge.y == 0 || edge.y + 1 == grid.height() {
                continue;
            }
            if grid.path_at(edge) {
                continue;
            }
            let far = grid.step(p, dir * 2);
            match grid.try_cell_at(far) {
                None | Some(Cell::Blocked) => continue,
                Some(_) => {}
            }
            if region.insert(far) {
                pending.push(far);
            }
        }
    }

    region
}
