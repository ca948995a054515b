//! Bounded linear undo/redo log of full document snapshots.
//!
//! DESIGN
//! ======
//! Each entry is an owned deep copy of the document, so live edits after a
//! commit can never reach back into a stored entry. The cursor points at the
//! entry matching the current document. Committing after an undo drops the
//! redo tail (no branching). When the log exceeds its limit the oldest entry
//! is evicted and the cursor shifts down with it.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

/// Snapshot log with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    index: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Start a log whose only entry is `initial` (cursor 0, nothing to undo).
    ///
    /// `limit` is raised to 1 if zero.
    #[must_use]
    pub fn new(initial: T, limit: usize) -> Self {
        let mut entries = VecDeque::with_capacity(limit.min(64));
        entries.push_back(initial);
        Self { entries, index: 0, limit: limit.max(1) }
    }

    /// Discard every entry and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.index = 0;
    }

    /// Record `snapshot` as the newest entry.
    pub fn commit(&mut self, snapshot: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry. Returns the entry now current, or `None` at the start.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one entry. Returns the entry now current, or `None` at the end.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.index)
    }

    /// Cursor position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
