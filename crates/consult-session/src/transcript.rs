//! Bounded transcript display buffer.

use std::collections::VecDeque;

/// Maximum number of transcript entries kept for display.
pub const TRANSCRIPT_CAPACITY: usize = 100;

/// Insertion-ordered buffer of transcript fragments, capped at the most
/// recent [`TRANSCRIPT_CAPACITY`] entries. Oldest entries are evicted first.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    entries: VecDeque<String>,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment, evicting the oldest entry when full.
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.entries.len() == TRANSCRIPT_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current entries in arrival order.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
