//! The symbol watchdog.
//!
//! One instance per custom-symbol panel. Each cycle it samples the traced
//! edge count; on a change it repaints its private grid from the host's
//! traced-edge data, and once the trace reaches an exit it sweeps every
//! decorated cell through the validator engine. A clean sweep clears the
//! panel's solution-sequence override (the host accepts the trace); any
//! violation writes the reject sequence instead.
//!
//! The polling interval self-tunes: fast while the player is tracing, slow
//! while the panel is idle or already judged.

use std::sync::Arc;
use std::time::Duration;

use crate::access::{Field, PanelId, StateAccess};
use crate::core::{Point, WatchRng};
use crate::grid::Grid;
use crate::rules::SymbolChecker;
use crate::trace::{reconstruct, PanelConfig, TracedSegment};
use crate::watch::{Tick, Watchdog};

/// Polling interval while the panel is idle or already judged.
const IDLE_INTERVAL: Duration = Duration::from_millis(100);
/// Polling interval while a trace is actively growing.
const ACTIVE_INTERVAL: Duration = Duration::from_millis(10);

/// A node id no panel owns; writing it as the solution sequence makes the
/// host discard the player's trace.
pub const REJECT_NODE: i32 = 69;

/// Watches one panel and enforces its symbol constraints.
pub struct SymbolWatchdog<A: StateAccess> {
    access: Arc<A>,
    config: PanelConfig,
    grid: Grid,
    rng: WatchRng,
    interval: Duration,
    traced_length: i32,
    complete: bool,
}

impl<A: StateAccess> SymbolWatchdog<A> {
    #[must_use]
    pub fn new(access: Arc<A>, config: PanelConfig) -> Self {
        let grid = config.build_grid();
        Self {
            access,
            config,
            grid,
            rng: WatchRng::from_entropy(),
            interval: IDLE_INTERVAL,
            traced_length: 0,
            complete: false,
        }
    }

    /// Replace the RNG (tests pin a seed here).
    #[must_use]
    pub fn with_rng(mut self, rng: WatchRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn panel(&self) -> PanelId {
        self.config.panel
    }

    /// The first violated cell on the painted grid, if any.
    fn first_failure(&mut self) -> Option<Point> {
        SymbolChecker::new(&self.grid, &mut self.rng).first_failure()
    }

    fn write_reject(&self) {
        self.access
            .write_array::<i32>(self.config.panel, Field::Sequence, &[REJECT_NODE], true);
        self.access
            .write_field::<i32>(self.config.panel, Field::SequenceLen, &[1]);
    }

    fn write_accept(&self) {
        self.access
            .write_field::<u64>(self.config.panel, Field::Sequence, &[0]);
        self.access
            .write_field::<i32>(self.config.panel, Field::SequenceLen, &[0]);
    }
}

impl<A: StateAccess + 'static> Watchdog for SymbolWatchdog<A> {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> Tick {
        let length = self
            .access
            .read_field::<i32>(self.config.panel, Field::TracedEdgeCount)
            .unwrap_or(0);
        if length != self.traced_length {
            self.complete = false;
        }
        if length == 0 || self.complete {
            self.interval = IDLE_INTERVAL;
            return Tick::Continue;
        }
        self.interval = ACTIVE_INTERVAL;
        if length == self.traced_length {
            return Tick::Continue;
        }

        let traced = self.access.read_array::<TracedSegment>(
            self.config.panel,
            Field::TracedEdgeData,
            length as usize,
        );
        if traced.is_empty() {
            // Edge data not available this cycle; try again next poll.
            return Tick::Continue;
        }

        self.traced_length = length;
        self.complete = false;
        match reconstruct(&mut self.grid, &traced, &self.config) {
            Ok(outcome) => self.complete = outcome.complete,
            Err(err) => {
                tracing::debug!(panel = %self.config.panel, %err, "discarding unusable trace");
                return Tick::Continue;
            }
        }

        if self.complete {
            match self.first_failure() {
                Some(cell) => {
                    tracing::info!(panel = %self.config.panel, %cell, "trace rejected");
                    self.write_reject();
                }
                None => {
                    tracing::info!(panel = %self.config.panel, "trace accepted");
                    self.write_accept();
                }
            }
        }
        Tick::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemoryAccess;
    use crate::core::{Cell, Decoration, SymbolKind};

    const PANEL: PanelId = PanelId(0x99);

    fn open_config() -> PanelConfig {
        let mut config = PanelConfig::open(PANEL, 5, 5);
        config.exit_point = 9;
        config.exits.push(9);
        config
    }

    fn watchdog(config: PanelConfig, access: &Arc<MemoryAccess>) -> SymbolWatchdog<MemoryAccess> {
        SymbolWatchdog::new(Arc::clone(access), config).with_rng(WatchRng::new(1))
    }

    fn seed_trace(access: &MemoryAccess, segments: &[TracedSegment]) {
        access.write_field::<i32>(PANEL, Field::TracedEdgeCount, &[segments.len() as i32]);
        access.seed(PANEL, Field::TracedEdgeData, segments);
    }

    #[test]
    fn test_idle_when_nothing_traced() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(open_config(), &access);

        assert_eq!(dog.poll(), Tick::Continue);
        assert_eq!(dog.interval(), IDLE_INTERVAL);
        assert!(access.words(PANEL, Field::Sequence).is_empty());
    }

    #[test]
    fn test_accepts_clean_complete_trace() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(open_config(), &access);

        seed_trace(&access, &[TracedSegment::new(0, 1), TracedSegment::new(1, 9)]);
        dog.poll();

        assert_eq!(access.read_field::<u64>(PANEL, Field::Sequence), Some(0));
        assert_eq!(access.read_field::<i32>(PANEL, Field::SequenceLen), Some(0));
    }

    #[test]
    fn test_rejects_violated_symbol() {
        let mut config = open_config();
        // A diamond demanding three decorated cells in a region that holds
        // one: every complete trace gets rejected.
        config.set_layout_cell(
            Point::new(1, 1),
            Cell::Decoration(Decoration::counted(SymbolKind::Diamond, 3)),
        );
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(config, &access);

        seed_trace(&access, &[TracedSegment::new(0, 1), TracedSegment::new(1, 9)]);
        dog.poll();

        assert_eq!(access.read_array::<i32>(PANEL, Field::Sequence, 4), vec![REJECT_NODE]);
        assert_eq!(access.read_field::<i32>(PANEL, Field::SequenceLen), Some(1));
    }

    #[test]
    fn test_incomplete_trace_is_not_judged() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(open_config(), &access);

        seed_trace(&access, &[TracedSegment::new(0, 1)]);
        dog.poll();

        assert_eq!(dog.interval(), ACTIVE_INTERVAL);
        assert!(access.words(PANEL, Field::Sequence).is_empty());
    }

    #[test]
    fn test_unchanged_trace_not_revalidated() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(open_config(), &access);

        seed_trace(&access, &[TracedSegment::new(0, 1), TracedSegment::new(1, 9)]);
        dog.poll();
        assert_eq!(access.read_field::<i32>(PANEL, Field::SequenceLen), Some(0));

        // Scribble over the decision; an unchanged trace must not rewrite it.
        access.write_field::<i32>(PANEL, Field::SequenceLen, &[7]);
        dog.poll();
        assert_eq!(access.read_field::<i32>(PANEL, Field::SequenceLen), Some(7));
    }

    #[test]
    fn test_malformed_trace_skips_validation() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(open_config(), &access);

        seed_trace(&access, &[TracedSegment::new(8, 9), TracedSegment::new(-1, 2)]);
        dog.poll();

        assert!(access.words(PANEL, Field::Sequence).is_empty());
        assert!(access.words(PANEL, Field::SequenceLen).is_empty());
    }

    #[test]
    fn test_missing_edge_data_is_noop() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = watchdog(open_config(), &access);

        access.write_field::<i32>(PANEL, Field::TracedEdgeCount, &[2]);
        dog.poll();

        assert!(access.words(PANEL, Field::Sequence).is_empty());
        // The cycle was a no-op: the next poll with data present validates.
        access.seed(
            PANEL,
            Field::TracedEdgeData,
            &[TracedSegment::new(0, 1), TracedSegment::new(1, 9)],
        );
        dog.poll();
        assert_eq!(access.read_field::<i32>(PANEL, Field::SequenceLen), Some(0));
    }
}
