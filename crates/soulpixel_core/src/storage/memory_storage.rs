//! In-memory snapshot storage.
//!
//! Holds the snapshot as JSON text so every save and load goes through the
//! same codec as the durable backends.

use crate::model::raw_thought::RawThought;
use crate::model::thought::Thought;
use crate::storage::snapshot::{decode_snapshot, encode_snapshot};
use crate::storage::{StorageResult, ThoughtStorage};

/// Snapshot slot kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryThoughtStorage {
    slot: Option<String>,
    save_count: usize,
}

impl MemoryThoughtStorage {
    /// Creates an empty (absent) slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw snapshot text.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: Some(text.into()),
            save_count: 0,
        }
    }

    /// Raw snapshot text currently stored, if any.
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ThoughtStorage for MemoryThoughtStorage {
    fn load(&self) -> StorageResult<Vec<RawThought>> {
        match self.slot.as_deref() {
            Some(text) => decode_snapshot(text),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, thoughts: &[Thought]) -> StorageResult<()> {
        self.slot = Some(encode_snapshot(thoughts)?);
        self.save_count += 1;
        Ok(())
    }
}
