use tracing::debug;

use crate::core::{Block, BlockDraft, BlockId, BlockPatch, TrackId};
use crate::error::{TimeblockError, TimeblockResult};
use crate::extensions::{SchedulerEvent, entity_label};
use crate::render::Renderer;

use super::SchedulerEngine;

impl<R: Renderer> SchedulerEngine<R> {
    /// Validates and stores a new block, then records one history entry.
    pub fn create_block(&mut self, draft: BlockDraft) -> TimeblockResult<BlockId> {
        self.ensure_active_track(&draft.track_id)?;
        let id = self.core.model.blocks.create(draft)?;
        self.core.model.commit();
        debug!(block = %id, "block created");
        self.emit_event(SchedulerEvent::BlockCreated { id });
        Ok(id)
    }

    /// Applies a partial edit. Fails without touching state when the result
    /// would violate `end > start`.
    pub fn update_block(&mut self, id: BlockId, patch: BlockPatch) -> TimeblockResult<()> {
        if let Some(track_id) = &patch.track_id {
            self.ensure_active_track(track_id)?;
        }
        self.core.model.blocks.update(id, &patch)?;
        self.core.model.commit();
        debug!(block = %id, "block updated");
        self.emit_event(SchedulerEvent::BlocksUpdated { count: 1 });
        Ok(())
    }

    /// Removes every listed block in one step.
    ///
    /// Returns the number removed; nothing is recorded when it is zero.
    pub fn delete_blocks(&mut self, ids: &[BlockId]) -> usize {
        let removed = self.core.model.blocks.delete(ids);
        if removed.is_empty() {
            return 0;
        }
        self.core.model.commit();
        self.core.interaction.selection_mut().clear();
        self.prune_transient_state();

        let count = removed.len();
        debug!(count, "blocks deleted");
        self.emit_event(SchedulerEvent::BlocksDeleted { count });
        count
    }

    /// Deletes `target`, or the whole selection when `target` is part of it.
    pub fn delete_block(&mut self, target: BlockId) -> usize {
        let ids = self
            .core
            .interaction
            .selection()
            .resolve_delete_target(Some(target));
        self.delete_blocks(&ids)
    }

    pub fn delete_selection(&mut self) -> usize {
        let ids = self.core.interaction.selection().ids();
        self.delete_blocks(&ids)
    }

    /// Badge text for a linked block, resolved through the label source.
    #[must_use]
    pub fn block_entity_label(&self, id: BlockId) -> Option<String> {
        let block = self.core.model.blocks.get(id)?;
        let (kind, code) = block.link()?;
        entity_label(self.core.runtime.labels.as_ref(), kind, code)
    }

    /// Writes pre-validated placements as a single history entry.
    pub(super) fn commit_moved_blocks(&mut self, updated: Vec<Block>) -> TimeblockResult<usize> {
        if updated.is_empty() {
            return Ok(0);
        }
        let count = updated.len();
        self.core.model.blocks.replace_many(updated)?;
        self.core.model.commit();
        debug!(count, "blocks moved");
        self.emit_event(SchedulerEvent::BlocksUpdated { count });
        Ok(count)
    }

    pub(super) fn ensure_active_track(&self, track_id: &TrackId) -> TimeblockResult<()> {
        if self.core.model.tracks.contains(track_id) {
            Ok(())
        } else {
            Err(TimeblockError::UnknownTrack(track_id.clone()))
        }
    }

    /// Drops selection, detail and edit-form references to blocks that are
    /// gone or no longer on an active track.
    pub(super) fn prune_transient_state(&mut self) {
        let model = &self.core.model;
        self.core.interaction.prune(|id| {
            model
                .blocks
                .get(id)
                .is_some_and(|block| model.tracks.contains(&block.track_id))
        });
        let editing_missing = self
            .core
            .runtime
            .form
            .as_ref()
            .and_then(|form| form.editing())
            .is_some_and(|id| !model.blocks.contains(id));
        if editing_missing {
            self.core.runtime.form = None;
        }
    }
}
