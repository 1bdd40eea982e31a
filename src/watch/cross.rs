//! Cross-panel watchdogs.
//!
//! Small state machines that watch one panel and push effects onto another:
//! powering a target when a source condition fires, committing a discovered
//! waypoint ordering as a solution sequence, or toggling a neighbor's dots
//! while its sibling is being traced.

use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;

use crate::access::{Field, PanelId, StateAccess};
use crate::trace::{StyleFlags, TracedSegment};
use crate::watch::{Tick, Watchdog};

/// Node-flag bit marking a dot-bearing intersection.
pub const NODE_DOT: u32 = 0x1;

/// Dot-flag value marking an intersection dot (Bridge touch test).
pub const DOT_INTERSECTION: u32 = 0x20;

/// Node-flag bit for a waypoint class (Jungle orderings).
#[must_use]
pub const fn waypoint_bit(class: u8) -> u32 {
    0x1000u32 << class
}

/// What flips a [`PowerWatchdog`] on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerCondition {
    /// The source panel's solved flag is set.
    Solved,
    /// The source panel's orientation z component is positive (a door or
    /// lid has swung open).
    TiltedUp,
}

/// Powers a target panel once a source panel meets its condition, then
/// stops. With `hold_off` the target is actively kept dark until then.
pub struct PowerWatchdog<A: StateAccess> {
    access: Arc<A>,
    source: PanelId,
    target: PanelId,
    condition: PowerCondition,
    hold_off: bool,
    interval: Duration,
}

impl<A: StateAccess> PowerWatchdog<A> {
    #[must_use]
    pub fn new(access: Arc<A>, source: PanelId, target: PanelId, condition: PowerCondition) -> Self {
        Self {
            access,
            source,
            target,
            condition,
            hold_off: false,
            interval: Duration::from_secs(1),
        }
    }

    /// Keep the target powered down on every cycle the condition is unmet.
    #[must_use]
    pub fn with_hold_off(mut self) -> Self {
        self.hold_off = true;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn triggered(&self) -> bool {
        match self.condition {
            PowerCondition::Solved => self
                .access
                .read_field::<i32>(self.source, Field::Solved)
                .unwrap_or(0)
                != 0,
            PowerCondition::TiltedUp => self
                .access
                .read_array::<f32>(self.source, Field::Orientation, 4)
                .get(2)
                .is_some_and(|&z| z > 0.0),
        }
    }

    fn write_power(&self, on: bool) {
        let level = if on { 1.0f32 } else { 0.0 };
        self.access
            .write_field::<f32>(self.target, Field::Power, &[level, level]);
        self.access
            .write_field::<i32>(self.target, Field::NeedsRedraw, &[1]);
    }
}

impl<A: StateAccess + 'static> Watchdog for PowerWatchdog<A> {
    fn name(&self) -> &'static str {
        "power"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> Tick {
        if self.triggered() {
            tracing::info!(source = %self.source, target = %self.target, "powering target");
            self.write_power(true);
            Tick::Stop
        } else {
            if self.hold_off {
                self.write_power(false);
            }
            Tick::Continue
        }
    }
}

/// Tracks a panel's dot waypoints against two alternative correct orderings
/// and commits the completed one (plus its mirror) as the panel's solution
/// sequence, alternating which ordering is live.
pub struct JungleWatchdog<A: StateAccess> {
    access: Arc<A>,
    panel: PanelId,
    /// Per-node intersection flags: dot bit plus waypoint-class bits.
    node_flags: Vec<u32>,
    seq_a: SmallVec<[u8; 8]>,
    seq_b: SmallVec<[u8; 8]>,
    /// Opaque solution-sequence handles committed on completion.
    handle_a: u64,
    handle_b: u64,
    active_first: bool,
    traced_length: i32,
    interval: Duration,
}

impl<A: StateAccess> JungleWatchdog<A> {
    #[must_use]
    pub fn new(
        access: Arc<A>,
        panel: PanelId,
        node_flags: Vec<u32>,
        seq_a: SmallVec<[u8; 8]>,
        seq_b: SmallVec<[u8; 8]>,
        handle_a: u64,
        handle_b: u64,
    ) -> Self {
        assert!(!seq_a.is_empty() && !seq_b.is_empty(), "orderings must be non-empty");
        Self {
            access,
            panel,
            node_flags,
            seq_a,
            seq_b,
            handle_a,
            handle_b,
            active_first: true,
            traced_length: 0,
            interval: Duration::from_millis(100),
        }
    }

    fn commit(&mut self) {
        let (handle, mirror, len, mirror_len) = if self.active_first {
            (self.handle_a, self.handle_b, self.seq_a.len(), self.seq_b.len())
        } else {
            (self.handle_b, self.handle_a, self.seq_b.len(), self.seq_a.len())
        };
        self.access
            .write_field::<u64>(self.panel, Field::DotSequence, &[handle]);
        self.access
            .write_field::<u64>(self.panel, Field::DotSequenceReflection, &[mirror]);
        self.access
            .write_field::<i32>(self.panel, Field::DotSequenceLen, &[len as i32]);
        self.access
            .write_field::<i32>(self.panel, Field::DotSequenceLenReflection, &[mirror_len as i32]);
        tracing::debug!(panel = %self.panel, first = self.active_first, "committed waypoint ordering");
        self.active_first = !self.active_first;
    }
}

impl<A: StateAccess + 'static> Watchdog for JungleWatchdog<A> {
    fn name(&self) -> &'static str {
        "jungle"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> Tick {
        let length = self
            .access
            .read_field::<i32>(self.panel, Field::TracedEdgeCount)
            .unwrap_or(0);
        if length == self.traced_length {
            return Tick::Continue;
        }
        self.traced_length = length;

        let traced =
            self.access
                .read_array::<TracedSegment>(self.panel, Field::TracedEdgeData, length as usize);
        if traced.is_empty() {
            return Tick::Continue;
        }

        let active = if self.active_first {
            self.seq_a.clone()
        } else {
            self.seq_b.clone()
        };
        let mut progress = 0;
        for seg in &traced {
            let flags = usize::try_from(seg.point_a)
                .ok()
                .and_then(|idx| self.node_flags.get(idx).copied())
                .unwrap_or(0);
            if flags & NODE_DOT == 0 {
                continue;
            }
            if flags & waypoint_bit(active[progress]) != 0 {
                progress += 1;
            } else {
                // Wrong waypoint: this trace cannot complete the active
                // ordering.
                return Tick::Continue;
            }
            if progress >= active.len() {
                self.commit();
                return Tick::Continue;
            }
        }
        Tick::Continue
    }
}

/// Keeps two sibling panels' dots in sync with their traces: a reset trace
/// re-arms the other panel's dots; a live trace that does not touch a dot
/// intersection on the sibling clears them.
pub struct BridgeWatchdog<A: StateAccess> {
    access: Arc<A>,
    panel_a: PanelId,
    panel_b: PanelId,
    length_a: i32,
    length_b: i32,
    interval: Duration,
}

impl<A: StateAccess> BridgeWatchdog<A> {
    #[must_use]
    pub fn new(access: Arc<A>, panel_a: PanelId, panel_b: PanelId) -> Self {
        Self {
            access,
            panel_a,
            panel_b,
            length_a: 0,
            length_b: 0,
            interval: Duration::from_millis(100),
        }
    }

    fn set_dots(&self, panel: PanelId, on: bool) {
        let style = StyleFlags(
            self.access
                .read_field::<u32>(panel, Field::StyleFlags)
                .unwrap_or(0),
        );
        let style = if on {
            style.with(StyleFlags::HAS_DOTS)
        } else {
            style.without(StyleFlags::HAS_DOTS)
        };
        self.access
            .write_field::<u32>(panel, Field::StyleFlags, &[style.raw()]);
    }

    /// True when `panel`'s current trace touches a dot intersection.
    fn touches_dot(&self, panel: PanelId) -> bool {
        let length = self
            .access
            .read_field::<i32>(panel, Field::TracedEdgeCount)
            .unwrap_or(0);
        if length == 0 {
            return false;
        }
        let dot_count = self
            .access
            .read_field::<i32>(panel, Field::DotCount)
            .unwrap_or(0);
        let flags = self
            .access
            .read_array::<u32>(panel, Field::DotFlags, dot_count as usize);
        let edges =
            self.access
                .read_array::<TracedSegment>(panel, Field::TracedEdgeData, length as usize);

        let flag_of = |node: i32| {
            usize::try_from(node)
                .ok()
                .and_then(|idx| flags.get(idx).copied())
                .unwrap_or(0)
        };
        edges
            .iter()
            .any(|seg| flag_of(seg.point_a) == DOT_INTERSECTION || flag_of(seg.point_b) == DOT_INTERSECTION)
    }
}

impl<A: StateAccess + 'static> Watchdog for BridgeWatchdog<A> {
    fn name(&self) -> &'static str {
        "bridge"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> Tick {
        let length_a = self
            .access
            .read_field::<i32>(self.panel_a, Field::TracedEdgeCount)
            .unwrap_or(0);
        let length_b = self
            .access
            .read_field::<i32>(self.panel_b, Field::TracedEdgeCount)
            .unwrap_or(0);

        if self.length_a > 0 && length_a == 0 {
            self.set_dots(self.panel_b, true);
        }
        if self.length_b > 0 && length_b == 0 {
            self.set_dots(self.panel_a, true);
        }
        if length_a != self.length_a && length_a > 0 && !self.touches_dot(self.panel_b) {
            self.set_dots(self.panel_b, false);
        }
        if length_b != self.length_b && length_b > 0 && !self.touches_dot(self.panel_a) {
            self.set_dots(self.panel_a, false);
        }

        self.length_a = length_a;
        self.length_b = length_b;
        Tick::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemoryAccess;
    use smallvec::smallvec;

    const SOURCE: PanelId = PanelId(0x1);
    const TARGET: PanelId = PanelId(0x2);

    #[test]
    fn test_power_waits_for_solved() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = PowerWatchdog::new(Arc::clone(&access), SOURCE, TARGET, PowerCondition::Solved);

        assert_eq!(dog.poll(), Tick::Continue);
        assert!(access.words(TARGET, Field::Power).is_empty());

        access.write_field::<i32>(SOURCE, Field::Solved, &[1]);
        assert_eq!(dog.poll(), Tick::Stop);
        assert_eq!(access.read_array::<f32>(TARGET, Field::Power, 2), vec![1.0, 1.0]);
        assert_eq!(access.read_field::<i32>(TARGET, Field::NeedsRedraw), Some(1));
    }

    #[test]
    fn test_power_hold_off_keeps_target_dark() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = PowerWatchdog::new(Arc::clone(&access), SOURCE, TARGET, PowerCondition::Solved)
            .with_hold_off();

        assert_eq!(dog.poll(), Tick::Continue);
        assert_eq!(access.read_array::<f32>(TARGET, Field::Power, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_power_tilt_condition() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog =
            PowerWatchdog::new(Arc::clone(&access), SOURCE, TARGET, PowerCondition::TiltedUp);

        access.seed::<f32>(SOURCE, Field::Orientation, &[0.0, 0.0, -0.4, 0.9]);
        assert_eq!(dog.poll(), Tick::Continue);

        access.seed::<f32>(SOURCE, Field::Orientation, &[0.0, 0.0, 0.4, 0.9]);
        assert_eq!(dog.poll(), Tick::Stop);
        assert_eq!(access.read_array::<f32>(TARGET, Field::Power, 2), vec![1.0, 1.0]);
    }

    fn jungle_fixture(access: &Arc<MemoryAccess>) -> JungleWatchdog<MemoryAccess> {
        // Nodes 1 and 2 are dot waypoints of classes 0 and 1.
        let node_flags = vec![
            0,
            NODE_DOT | waypoint_bit(0),
            NODE_DOT | waypoint_bit(1),
            0,
        ];
        JungleWatchdog::new(
            Arc::clone(access),
            SOURCE,
            node_flags,
            smallvec![0, 1],
            smallvec![1, 0],
            0xAAAA,
            0xBBBB,
        )
    }

    fn seed_jungle_trace(access: &MemoryAccess, count: i32, segments: &[TracedSegment]) {
        access.write_field::<i32>(SOURCE, Field::TracedEdgeCount, &[count]);
        access.seed(SOURCE, Field::TracedEdgeData, segments);
    }

    #[test]
    fn test_jungle_commits_completed_ordering_and_alternates() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = jungle_fixture(&access);

        seed_jungle_trace(
            &access,
            2,
            &[TracedSegment::new(1, 2), TracedSegment::new(2, 3)],
        );
        dog.poll();

        assert_eq!(access.read_field::<u64>(SOURCE, Field::DotSequence), Some(0xAAAA));
        assert_eq!(
            access.read_field::<u64>(SOURCE, Field::DotSequenceReflection),
            Some(0xBBBB)
        );
        assert_eq!(access.read_field::<i32>(SOURCE, Field::DotSequenceLen), Some(2));

        // The other ordering is live now: class 1 first.
        seed_jungle_trace(
            &access,
            3,
            &[TracedSegment::new(2, 1), TracedSegment::new(1, 3)],
        );
        dog.poll();
        assert_eq!(access.read_field::<u64>(SOURCE, Field::DotSequence), Some(0xBBBB));
        assert_eq!(
            access.read_field::<u64>(SOURCE, Field::DotSequenceReflection),
            Some(0xAAAA)
        );
    }

    #[test]
    fn test_jungle_wrong_waypoint_abandons_cycle() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = jungle_fixture(&access);

        // Class 1 first while ordering A (0 then 1) is live.
        seed_jungle_trace(&access, 1, &[TracedSegment::new(2, 3)]);
        dog.poll();
        assert!(access.words(SOURCE, Field::DotSequence).is_empty());

        // Unchanged length: nothing re-examined.
        dog.poll();
        assert!(access.words(SOURCE, Field::DotSequence).is_empty());
    }

    #[test]
    fn test_jungle_non_dot_nodes_are_skipped() {
        let access = Arc::new(MemoryAccess::new());
        let mut dog = jungle_fixture(&access);

        seed_jungle_trace(
            &access,
            3,
            &[
                TracedSegment::new(0, 1),
                TracedSegment::new(1, 2),
                TracedSegment::new(2, 3),
            ],
        );
        dog.poll();
        assert_eq!(access.read_field::<u64>(SOURCE, Field::DotSequence), Some(0xAAAA));
    }

    #[test]
    fn test_bridge_toggles_sibling_dots() {
        let access = Arc::new(MemoryAccess::new());
        access.write_field::<u32>(TARGET, Field::StyleFlags, &[StyleFlags::HAS_DOTS.raw()]);
        let mut dog = BridgeWatchdog::new(Arc::clone(&access), SOURCE, TARGET);

        // A live trace on A that does not touch a dot on B clears B's dots.
        access.write_field::<i32>(SOURCE, Field::TracedEdgeCount, &[2]);
        dog.poll();
        let style = StyleFlags(access.read_field::<u32>(TARGET, Field::StyleFlags).unwrap());
        assert!(!style.contains(StyleFlags::HAS_DOTS));

        // Resetting A's trace re-arms B's dots.
        access.write_field::<i32>(SOURCE, Field::TracedEdgeCount, &[0]);
        dog.poll();
        let style = StyleFlags(access.read_field::<u32>(TARGET, Field::StyleFlags).unwrap());
        assert!(style.contains(StyleFlags::HAS_DOTS));
    }

    #[test]
    fn test_bridge_touch_preserves_dots() {
        let access = Arc::new(MemoryAccess::new());
        access.write_field::<u32>(TARGET, Field::StyleFlags, &[StyleFlags::HAS_DOTS.raw()]);
        let mut dog = BridgeWatchdog::new(Arc::clone(&access), SOURCE, TARGET);

        // B's own trace touches one of its dot intersections.
        access.write_field::<i32>(TARGET, Field::TracedEdgeCount, &[1]);
        access.write_field::<i32>(TARGET, Field::DotCount, &[3]);
        access.seed::<u32>(TARGET, Field::DotFlags, &[0, DOT_INTERSECTION, 0]);
        access.seed(TARGET, Field::TracedEdgeData, &[TracedSegment::new(0, 1)]);

        // A is being traced; B's dots survive because B touches a dot.
        access.write_field::<i32>(SOURCE, Field::TracedEdgeCount, &[2]);
        dog.poll();
        let style = StyleFlags(access.read_field::<u32>(TARGET, Field::StyleFlags).unwrap());
        assert!(style.contains(StyleFlags::HAS_DOTS));
    }
}
