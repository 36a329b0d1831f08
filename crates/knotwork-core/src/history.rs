//! Append-only undo log with a cursor.

use crate::document::Document;
use crate::restore::{Restore, RestoreObject, RestoreObjectFactory, RestoreRecord};
use crate::Result;

/// Ordered restore log. `cursor` counts the entries that are still undoable; entries past it are
/// discarded by the next [`HistoryManager::push`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryManager {
    entries: Vec<Restore>,
    cursor: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from wire records. The cursor lands after the last record.
    pub fn from_records(records: &[RestoreRecord], factory: &RestoreObjectFactory) -> Result<Self> {
        let entries = records
            .iter()
            .map(|r| factory.decode(r))
            .collect::<Result<Vec<_>>>()?;
        let cursor = entries.len();
        Ok(Self { entries, cursor })
    }

    pub fn push(&mut self, restore: Restore) {
        if self.cursor < self.entries.len() {
            tracing::debug!(
                dropped = self.entries.len() - self.cursor,
                "history: discarding undone tail"
            );
            self.entries.truncate(self.cursor);
        }
        tracing::debug!(restore_type = restore.tag(), position = self.cursor, "history: push");
        self.entries.push(restore);
        self.cursor = self.entries.len();
    }

    /// Inverts the entry just before the cursor. Returns `false` when nothing is left to undo.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let entry = &self.entries[self.cursor];
        tracing::debug!(restore_type = entry.tag(), position = self.cursor, "history: undo");
        entry.as_object().restore(doc);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
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

    pub fn entries(&self) -> &[Restore] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Restore> {
        self.cursor.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Wire form of the undoable entries. The undone tail is left out, so a log rebuilt with
    /// [`HistoryManager::from_records`] can never invert a mutation twice.
    pub fn records(&self) -> Result<Vec<RestoreRecord>> {
        self.entries[..self.cursor]
            .iter()
            .map(Restore::to_record)
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
