use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::block::Block;
use crate::core::track::Track;
use crate::error::{TimeblockError, TimeblockResult};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Full copy of the durable canvas state at one checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub blocks: Vec<Block>,
    pub tracks: Vec<Track>,
}

/// Bounded linear undo/redo stack of [`HistoryEntry`] snapshots.
///
/// The entry at `index` always mirrors the live state. Committing after an
/// undo discards the redo tail.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    index: usize,
    limit: usize,
}

impl History {
    pub fn new(initial: HistoryEntry, limit: usize) -> TimeblockResult<Self> {
        if limit == 0 {
            return Err(TimeblockError::InvalidData(
                "history limit must be > 0".to_owned(),
            ));
        }
        let mut entries = VecDeque::with_capacity(limit.min(64));
        entries.push_back(initial);
        Ok(Self {
            entries,
            index: 0,
            limit,
        })
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
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.index)
    }

    pub fn commit(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(entry);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        debug!(
            history_len = self.entries.len(),
            history_index = self.index,
            "history commit"
        );
    }

    /// Steps back; `None` at the oldest retained entry.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Steps forward; `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }
}
