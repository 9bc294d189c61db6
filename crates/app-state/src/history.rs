//! Snapshot-based undo/redo history.
//!
//! History is one sequence of snapshots with a cursor. The entry under the
//! cursor is the "live" slot: it is refreshed with the current state whenever
//! the cursor moves away from it, so undo and redo always land on exactly the
//! state the user saw at that point.
//!
//! ```text
//!   record(pre):  [s0 .. s(k-1), pre, live]        cursor -> live
//!   undo(cur):    entries[cursor] = cur; cursor -= 1; restore entries[cursor]
//!   redo(cur):    entries[cursor] = cur; cursor += 1; restore entries[cursor]
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(HistorySnapshot::capture(&store), None);
//!
//! // Before a mutation, record the pre-mutation state
//! history.record("Move clip", HistorySnapshot::capture(&store));
//!
//! // Undo hands in the current state and gets back the one to restore
//! if let Some(prev) = history.undo(HistorySnapshot::capture(&store)) {
//!     prev.clone().restore(&mut store);
//! }
//!
//! // Batch grouping (for drag gestures)
//! history.start_batch("Drag clip", HistorySnapshot::capture(&store));
//! // ... record() calls are suppressed ...
//! history.end_batch();
//! ```

use std::time::Instant;

use crate::snapshot::HistorySnapshot;

/// A single entry in the history sequence.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Label of the action that was performed *from* this state.
    pub label: String,
    pub snapshot: HistorySnapshot,
    pub timestamp: Instant,
}

impl HistoryEntry {
    fn new(label: impl Into<String>, snapshot: HistorySnapshot) -> Self {
        Self {
            label: label.into(),
            snapshot,
            timestamp: Instant::now(),
        }
    }
}

/// Linear undo/redo history over `HistorySnapshot`s.
#[derive(Debug)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    /// Maximum undo steps kept (None = unbounded).
    max_entries: Option<usize>,
    /// When Some, a gesture is in progress and `record` is suppressed.
    batch_label: Option<String>,
    batch_start_snapshot: Option<HistorySnapshot>,
}

impl HistoryManager {
    /// Start a history whose only entry is the live `initial` state.
    pub fn new(initial: HistorySnapshot, max_entries: Option<usize>) -> Self {
        Self {
            entries: vec![HistoryEntry::new("", initial)],
            cursor: 0,
            max_entries,
            batch_label: None,
            batch_start_snapshot: None,
        }
    }

    /// Record `pre` (the state before a mutation) as a new undo step.
    ///
    /// Discards everything after the cursor. Returns `false` when suppressed
    /// by an active batch.
    pub fn record(&mut self, label: &str, pre: HistorySnapshot) -> bool {
        if self.batch_label.is_some() {
            tracing::debug!(label, "Record suppressed: batch in progress");
            return false;
        }
        self.push_step(label.to_string(), pre);
        true
    }

    fn push_step(&mut self, label: String, pre: HistorySnapshot) {
        self.entries.truncate(self.cursor + 1);
        let slot = &mut self.entries[self.cursor];
        slot.label = label;
        slot.snapshot = pre.clone();
        slot.timestamp = Instant::now();

        // The new live slot; refreshed with the real state on undo.
        self.entries.push(HistoryEntry::new("", pre));
        self.cursor = self.entries.len() - 1;
        self.enforce_limit();

        tracing::debug!(
            label = %self.entries[self.cursor - 1].label,
            undo_depth = self.cursor,
            "History entry recorded"
        );
    }

    fn enforce_limit(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };
        while self.entries.len() > max + 1 && self.cursor > 0 {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back. `current` is stored in the live slot so a later redo can
    /// return to it. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<&HistorySnapshot> {
        self.end_stuck_batch("undo");
        if self.cursor == 0 {
            return None;
        }
        self.entries[self.cursor].snapshot = current;
        self.cursor -= 1;

        tracing::debug!(
            label = %self.entries[self.cursor].label,
            undo_remaining = self.cursor,
            "Undo"
        );
        Some(&self.entries[self.cursor].snapshot)
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the end.
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<&HistorySnapshot> {
        self.end_stuck_batch("redo");
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        let label = self.entries[self.cursor].label.clone();
        self.entries[self.cursor].snapshot = current;
        self.cursor += 1;

        tracing::debug!(
            label = %label,
            redo_remaining = self.entries.len() - 1 - self.cursor,
            "Redo"
        );
        Some(&self.entries[self.cursor].snapshot)
    }

    fn end_stuck_batch(&mut self, during: &str) {
        if self.batch_label.take().is_some() {
            tracing::warn!(during, "Ending stuck batch");
            self.batch_start_snapshot = None;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Begin a gesture. Until `end_batch`, `record` is suppressed and the
    /// whole gesture becomes a single undo step starting from `before`.
    pub fn start_batch(&mut self, label: &str, before: HistorySnapshot) {
        if self.batch_label.is_some() {
            tracing::warn!(label, "start_batch called while already batching, ignoring");
            return;
        }
        self.batch_label = Some(label.to_string());
        self.batch_start_snapshot = Some(before);
        tracing::debug!(label, "Batch started");
    }

    /// Close the current gesture. No-op when no batch is open.
    pub fn end_batch(&mut self) {
        let Some(label) = self.batch_label.take() else {
            return;
        };
        let Some(before) = self.batch_start_snapshot.take() else {
            return;
        };
        self.push_step(label, before);
        tracing::debug!(undo_depth = self.cursor, "Batch ended");
    }

    pub fn is_batching(&self) -> bool {
        self.batch_label.is_some()
    }

    /// Label of the action that would be undone next.
    pub fn undo_label(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .map(|i| self.entries[i].label.as_str())
    }

    /// Label of the action that would be redone next.
    pub fn redo_label(&self) -> Option<&str> {
        self.can_redo()
            .then(|| self.entries[self.cursor].label.as_str())
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    /// The entries in order, oldest first. The entry at `cursor()` is live.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drop all history; `current` becomes the only (live) entry.
    pub fn clear(&mut self, current: HistorySnapshot) {
        self.entries = vec![HistoryEntry::new("", current)];
        self.cursor = 0;
        self.batch_label = None;
        self.batch_start_snapshot = None;
        tracing::debug!("History cleared");
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Change the undo depth limit, evicting the oldest steps if needed.
    pub fn set_max_entries(&mut self, max: Option<usize>) {
        self.max_entries = max;
        self.enforce_limit();
    }
}
