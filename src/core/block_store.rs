use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::trace;

use crate::core::block::{Block, BlockDraft, BlockId, BlockPatch};
use crate::core::track::TrackId;
use crate::error::{TimeblockError, TimeblockResult};

/// The set of scheduled blocks, kept in insertion order.
///
/// Every write validates first and mutates second, so a rejected call leaves
/// the store exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStore {
    blocks: IndexMap<BlockId, Block>,
    next_id: u64,
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Seeds the store with existing blocks. Fails on a duplicate id, an id
    /// leaving no room for a successor, or a block violating `end > start`.
    pub fn with_blocks(blocks: Vec<Block>) -> TimeblockResult<Self> {
        let mut store = Self::new();
        for block in blocks {
            block.validate_times()?;
            if store.blocks.contains_key(&block.id) {
                return Err(TimeblockError::InvalidData(format!(
                    "duplicate block id {}",
                    block.id
                )));
            }
            let successor = block.id.0.checked_add(1).ok_or_else(|| {
                TimeblockError::InvalidData(format!("block id {} is out of range", block.id))
            })?;
            store.next_id = store.next_id.max(successor);
            store.blocks.insert(block.id, block);
        }
        Ok(store)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Blocks overlapping the half-open window `[start, end)`.
    pub fn overlapping(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = &Block> {
        self.blocks
            .values()
            .filter(move |block| block.start < end && block.end > start)
    }

    #[must_use]
    pub fn count_on_track(&self, track_id: &TrackId) -> usize {
        self.blocks
            .values()
            .filter(|block| &block.track_id == track_id)
            .count()
    }

    #[must_use]
    pub fn peek_next_id(&self) -> BlockId {
        BlockId(self.next_id)
    }

    /// Validates `draft` and inserts it under a fresh id.
    pub fn create(&mut self, draft: BlockDraft) -> TimeblockResult<BlockId> {
        let id = self.peek_next_id();
        let block = draft.into_block(id)?;
        let successor = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| TimeblockError::InvalidData("block ids exhausted".to_owned()))?;
        self.next_id = successor;
        self.blocks.insert(id, block);
        trace!(block_id = id.0, count = self.blocks.len(), "block created");
        Ok(id)
    }

    pub fn update(&mut self, id: BlockId, patch: &BlockPatch) -> TimeblockResult<&Block> {
        let current = self.blocks.get(&id).ok_or(TimeblockError::UnknownBlock(id))?;
        let next = patch.apply_to(current)?;
        let slot = self
            .blocks
            .get_mut(&id)
            .ok_or(TimeblockError::UnknownBlock(id))?;
        *slot = next;
        Ok(slot)
    }

    /// Replaces several blocks at once; all-or-nothing.
    pub fn replace_many(&mut self, updated: Vec<Block>) -> TimeblockResult<()> {
        for block in &updated {
            if !self.blocks.contains_key(&block.id) {
                return Err(TimeblockError::UnknownBlock(block.id));
            }
            block.validate_times()?;
        }
        for block in updated {
            self.blocks.insert(block.id, block);
        }
        Ok(())
    }

    /// Removes every listed id that exists; returns the removed blocks.
    pub fn delete(&mut self, ids: &[BlockId]) -> Vec<Block> {
        let removed: Vec<Block> = ids
            .iter()
            .filter_map(|id| self.blocks.shift_remove(id))
            .collect();
        trace!(
            requested = ids.len(),
            removed = removed.len(),
            "blocks deleted"
        );
        removed
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.values().cloned().collect()
    }

    /// Replaces all blocks with a history snapshot. The id counter never goes
    /// backwards so ids stay unique across undo/redo.
    pub fn restore(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks.into_iter().map(|block| (block.id, block)).collect();
        let max_id = self.blocks.keys().map(|id| id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id.saturating_add(1));
    }
}
