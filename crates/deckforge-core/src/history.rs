//! Snapshot-based undo/redo.

use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Whether mutations are currently being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Committed mutations append a snapshot.
    #[default]
    Recording,
    /// A snapshot is being restored; the next record is swallowed.
    Replaying,
}

/// Bounded sequence of snapshots with a cursor.
///
/// Entries before the cursor are undo targets, entries after it are redo
/// targets. The entry at the cursor is the current state.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
    mode: HistoryMode,
}

impl<T: Clone> History<T> {
    /// Create an empty history. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
            mode: HistoryMode::Recording,
        }
    }

    /// Create a history whose first entry is `seed`.
    pub fn with_seed(seed: T, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        history.entries.push_back(seed);
        history
    }

    /// Append a snapshot after the cursor, discarding any redo entries.
    ///
    /// Returns false when the snapshot was swallowed because it is the
    /// result of a replay.
    pub fn record(&mut self, snapshot: T) -> bool {
        if self.mode == HistoryMode::Replaying {
            self.mode = HistoryMode::Recording;
            log::trace!("History record suppressed during replay");
            return false;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one entry and return the snapshot to restore.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.mode = HistoryMode::Replaying;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry and return the snapshot to restore.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.mode = HistoryMode::Replaying;
        self.entries.get(self.cursor)
    }

    /// Leave replay mode. Always safe to call.
    pub fn finish_replay(&mut self) {
        self.mode = HistoryMode::Recording;
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Drop every entry and start over from `seed`.
    pub fn clear(&mut self, seed: T) {
        self.entries.clear();
        self.entries.push_back(seed);
        self.cursor = 0;
        self.mode = HistoryMode::Recording;
    }
}
