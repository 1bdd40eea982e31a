//! Field tags and the word codec.
//!
//! The host exposes panel state as typed fields addressed by an entity id
//! and a field tag. This crate never sees addresses; it speaks the tag enum
//! and lets the `StateAccess` implementation do the locating.
//!
//! Values cross the boundary as single 64-bit words so one store can hold
//! every field type an implementation needs (the in-memory double keeps a
//! `Vec<u64>` per field). `FieldValue` is the per-type codec.

use serde::{Deserialize, Serialize};

use crate::trace::TracedSegment;

/// Identifier of a host entity carrying panel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(pub u32);

impl PanelId {
    /// Create a new panel id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Panel({:#x})", self.0)
    }
}

/// The panel fields the watchdogs read and write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Number of traced edges in the current player trace.
    TracedEdgeCount,
    /// The traced edge array.
    TracedEdgeData,
    /// Non-zero once the host considers the panel solved.
    Solved,
    /// Two power floats; `{1, 1}` turns the panel on.
    Power,
    /// Host redraw request flag.
    NeedsRedraw,
    /// Solution sequence override.
    Sequence,
    /// Length of the solution sequence override.
    SequenceLen,
    /// Panel style bits.
    StyleFlags,
    /// Number of intersection dots on the panel.
    DotCount,
    /// Per-intersection dot flag array.
    DotFlags,
    /// Dot solution sequence handle.
    DotSequence,
    /// Length of the dot solution sequence.
    DotSequenceLen,
    /// Mirrored dot solution sequence handle.
    DotSequenceReflection,
    /// Length of the mirrored dot solution sequence.
    DotSequenceLenReflection,
    /// Panel orientation, four floats.
    Orientation,
}

/// A value that fits one 64-bit field word.
pub trait FieldValue: Copy {
    fn from_word(word: u64) -> Self;
    fn to_word(self) -> u64;
}

impl FieldValue for u64 {
    fn from_word(word: u64) -> Self {
        word
    }

    fn to_word(self) -> u64 {
        self
    }
}

impl FieldValue for i32 {
    fn from_word(word: u64) -> Self {
        word as i64 as i32
    }

    fn to_word(self) -> u64 {
        self as i64 as u64
    }
}

impl FieldValue for u32 {
    fn from_word(word: u64) -> Self {
        word as u32
    }

    fn to_word(self) -> u64 {
        u64::from(self)
    }
}

impl FieldValue for f32 {
    fn from_word(word: u64) -> Self {
        f32::from_bits(word as u32)
    }

    fn to_word(self) -> u64 {
        u64::from(self.to_bits())
    }
}

/// A segment packs its endpoints into the low and high halves of a word.
impl FieldValue for TracedSegment {
    fn from_word(word: u64) -> Self {
        TracedSegment::new(word as u32 as i32, (word >> 32) as u32 as i32)
    }

    fn to_word(self) -> u64 {
        u64::from(self.point_a as u32) | (u64::from(self.point_b as u32) << 32)
    }
}

/// Narrow contract to the host application's state.
///
/// Implementations must tolerate concurrent calls from multiple watchdog
/// threads; each call is one bounded field access. A `None` read is an
/// absent field; watchdogs treat it as "nothing to do this cycle", never as
/// an error.
pub trait StateAccess: Send + Sync {
    /// Read one value (the field's first word).
    fn read_field<T: FieldValue>(&self, panel: PanelId, field: Field) -> Option<T>;

    /// Overwrite a field's leading words with `values`.
    fn write_field<T: FieldValue>(&self, panel: PanelId, field: Field, values: &[T]);

    /// Read up to `count` values; shorter (or empty) when the field holds
    /// fewer.
    fn read_array<T: FieldValue>(&self, panel: PanelId, field: Field, count: usize) -> Vec<T>;

    /// Write an array. With `expand` the field is resized to exactly
    /// `values`; without it only the leading words are overwritten.
    fn write_array<T: FieldValue>(&self, panel: PanelId, field: Field, values: &[T], expand: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_words_round_trip() {
        for value in [0i32, 1, -1, i32::MAX, i32::MIN, 69] {
            assert_eq!(i32::from_word(value.to_word()), value);
        }
        for value in [0u32, 1, u32::MAX] {
            assert_eq!(u32::from_word(value.to_word()), value);
        }
        assert_eq!(u64::from_word(u64::MAX.to_word()), u64::MAX);
    }

    #[test]
    fn test_float_word_round_trip() {
        for value in [0.0f32, 1.0, -1.5, f32::MIN_POSITIVE] {
            assert_eq!(f32::from_word(value.to_word()), value);
        }
    }

    #[test]
    fn test_segment_word_round_trip() {
        for (a, b) in [(0, 0), (3, 4), (-1, 7), (i32::MAX, i32::MIN)] {
            let seg = TracedSegment::new(a, b);
            assert_eq!(TracedSegment::from_word(seg.to_word()), seg);
        }
    }

    #[test]
    fn test_panel_id_display() {
        assert_eq!(format!("{}", PanelId::new(0x1BE9)), "Panel(0x1be9)");
    }
}
