use crate::core::{Block, BlockStore, History, HistoryEntry, TrackSet};
use crate::error::TimeblockResult;

/// Durable canvas state: the block collection, the active tracks and the
/// undo/redo log of both.
pub struct SchedulerModel {
    pub(super) blocks: BlockStore,
    pub(super) tracks: TrackSet,
    pub(super) history: History,
}

impl SchedulerModel {
    /// Seeds the model. The seeded state becomes history entry 0.
    pub fn new(blocks: Vec<Block>, tracks: TrackSet, history_limit: usize) -> TimeblockResult<Self> {
        let blocks = BlockStore::with_blocks(blocks)?;
        let initial = HistoryEntry {
            blocks: blocks.snapshot(),
            tracks: tracks.as_slice().to_vec(),
        };
        let history = History::new(initial, history_limit)?;
        Ok(Self {
            blocks,
            tracks,
            history,
        })
    }

    /// Records the current state as a new history entry.
    pub(super) fn commit(&mut self) {
        self.history.commit(HistoryEntry {
            blocks: self.blocks.snapshot(),
            tracks: self.tracks.as_slice().to_vec(),
        });
    }

    /// Replaces blocks and tracks wholesale with a history entry.
    pub(super) fn restore(&mut self, entry: HistoryEntry) {
        self.blocks.restore(entry.blocks);
        self.tracks = TrackSet::new(entry.tracks);
    }

    /// Blocks whose track is active, in store order.
    pub(super) fn visible_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|block| self.tracks.contains(&block.track_id))
    }
}
