//! In-memory `StateAccess` implementation.
//!
//! The reference backend for the trait: a mutexed map of `(panel, field)` to
//! word arrays. Integration tests drive watchdogs against it, and embedders
//! can use it as a test double for their own bindings.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use super::field::{Field, FieldValue, PanelId, StateAccess};

type FieldMap = FxHashMap<(PanelId, Field), Vec<u64>>;

/// Mutexed word store keyed by panel and field.
#[derive(Debug, Default)]
pub struct MemoryAccess {
    fields: Mutex<FieldMap>,
}

impl MemoryAccess {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means some writer panicked mid-store; the word
    /// map itself is always valid, so keep serving it.
    fn lock(&self) -> MutexGuard<'_, FieldMap> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a field, replacing any previous content.
    pub fn seed<T: FieldValue>(&self, panel: PanelId, field: Field, values: &[T]) {
        self.write_array(panel, field, values, true);
    }

    /// Raw words currently stored for a field; empty when absent.
    #[must_use]
    pub fn words(&self, panel: PanelId, field: Field) -> Vec<u64> {
        self.lock().get(&(panel, field)).cloned().unwrap_or_default()
    }
}

impl StateAccess for MemoryAccess {
    fn read_field<T: FieldValue>(&self, panel: PanelId, field: Field) -> Option<T> {
        self.lock()
            .get(&(panel, field))
            .and_then(|words| words.first())
            .map(|&word| T::from_word(word))
    }

    fn write_field<T: FieldValue>(&self, panel: PanelId, field: Field, values: &[T]) {
        self.write_array(panel, field, values, false);
    }

    fn read_array<T: FieldValue>(&self, panel: PanelId, field: Field, count: usize) -> Vec<T> {
        self.lock()
            .get(&(panel, field))
            .map(|words| {
                words
                    .iter()
                    .take(count)
                    .map(|&word| T::from_word(word))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn write_array<T: FieldValue>(&self, panel: PanelId, field: Field, values: &[T], expand: bool) {
        let mut fields = self.lock();
        let words = fields.entry((panel, field)).or_default();
        if expand {
            words.clear();
            words.extend(values.iter().map(|v| v.to_word()));
        } else {
            if words.len() < values.len() {
                words.resize(values.len(), 0);
            }
            for (slot, value) in words.iter_mut().zip(values.iter()) {
                *slot = value.to_word();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TracedSegment;

    const PANEL: PanelId = PanelId(7);

    #[test]
    fn test_absent_field_reads_none() {
        let access = MemoryAccess::new();
        assert_eq!(access.read_field::<i32>(PANEL, Field::Solved), None);
        assert!(access
            .read_array::<TracedSegment>(PANEL, Field::TracedEdgeData, 8)
            .is_empty());
    }

    #[test]
    fn test_field_round_trip() {
        let access = MemoryAccess::new();
        access.write_field::<i32>(PANEL, Field::TracedEdgeCount, &[3]);
        assert_eq!(access.read_field::<i32>(PANEL, Field::TracedEdgeCount), Some(3));

        access.write_field::<f32>(PANEL, Field::Power, &[1.0, 1.0]);
        assert_eq!(access.read_array::<f32>(PANEL, Field::Power, 2), vec![1.0, 1.0]);
    }

    #[test]
    fn test_array_truncated_to_stored_length() {
        let access = MemoryAccess::new();
        let segments = [TracedSegment::new(0, 1), TracedSegment::new(1, 2)];
        access.seed(PANEL, Field::TracedEdgeData, &segments);

        let read = access.read_array::<TracedSegment>(PANEL, Field::TracedEdgeData, 10);
        assert_eq!(read, segments.to_vec());
    }

    #[test]
    fn test_expand_replaces_in_place_overwrites() {
        let access = MemoryAccess::new();
        access.seed::<i32>(PANEL, Field::Sequence, &[1, 2, 3, 4]);

        // In-place write keeps the tail.
        access.write_array::<i32>(PANEL, Field::Sequence, &[9], false);
        assert_eq!(access.read_array::<i32>(PANEL, Field::Sequence, 4), vec![9, 2, 3, 4]);

        // Expanding write resizes to the new content.
        access.write_array::<i32>(PANEL, Field::Sequence, &[69], true);
        assert_eq!(access.read_array::<i32>(PANEL, Field::Sequence, 4), vec![69]);
    }

    #[test]
    fn test_concurrent_writes_do_not_tear() {
        use std::sync::Arc;

        let access = Arc::new(MemoryAccess::new());
        let mut handles = Vec::new();
        for value in 0..8i32 {
            let access = Arc::clone(&access);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    access.write_field::<i32>(PANEL, Field::SequenceLen, &[value]);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let final_value = access.read_field::<i32>(PANEL, Field::SequenceLen);
        assert!(matches!(final_value, Some(v) if (0..8).contains(&v)));
    }
}
