//! Linear undo/redo history of page snapshots.
//!
//! The history always holds at least one entry: the state the store started
//! from. Each recorded mutation appends the resulting pages and moves the
//! cursor to it; recording after an undo discards the redo tail first.
//! Snapshots share unchanged pages through `Arc`, so an entry costs one
//! pointer per page plus a copy of every page that actually changed.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::Page;

/// Default maximum number of history entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A full copy of the page list.
pub type Snapshot = Vec<Arc<Page>>;

/// Bounded snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    index: usize,
    limit: usize,
}

impl History {
    /// Create a history whose first entry is `initial`. A `limit` of zero is
    /// treated as one.
    #[must_use]
    pub fn new(initial: Snapshot, limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record the state after a mutation.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        tracing::debug!(
            depth = self.entries.len(),
            index = self.index,
            "History entry recorded"
        );
    }

    /// Step back and return the snapshot to restore.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        tracing::debug!(index = self.index, "Undo");
        self.entries.get(self.index)
    }

    /// Step forward and return the snapshot to restore.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        tracing::debug!(index = self.index, "Redo");
        self.entries.get(self.index)
    }

    /// Check if there is an earlier entry.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if there is a later entry.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Position of the cursor.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the initial entry is never dropped except by newer
    /// entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored entries.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
