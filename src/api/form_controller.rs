use chrono::NaiveDateTime;
use tracing::warn;

use crate::core::primitives::{add_minutes, start_of_day};
use crate::core::{BlockDraft, BlockId, BlockPatch, TrackId};
use crate::error::{TimeblockError, TimeblockResult};
use crate::render::Renderer;

use super::SchedulerEngine;

const BLANK_FORM_START_MINUTES: i64 = 9 * 60;
const BLANK_FORM_END_MINUTES: i64 = 10 * 60;
const CLICK_CREATE_TITLE: &str = "New Block";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BlockId),
}

/// Create/edit form backing state. Field edits go through `draft` and are
/// validated only on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockForm {
    pub mode: FormMode,
    pub draft: BlockDraft,
}

impl BlockForm {
    #[must_use]
    pub fn editing(&self) -> Option<BlockId> {
        match self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }
}

impl<R: Renderer> SchedulerEngine<R> {
    /// Opens a blank create form: 09:00-10:00 on the anchor day, first track.
    pub fn open_create_form(&mut self) -> TimeblockResult<()> {
        let track_id = self
            .core
            .model
            .tracks
            .at(0)
            .map(|track| track.id.clone())
            .ok_or_else(|| TimeblockError::InvalidData("no active tracks".to_owned()))?;
        let day_start = start_of_day(self.core.view.date);
        let draft = BlockDraft::new(
            track_id,
            add_minutes(day_start, BLANK_FORM_START_MINUTES)?,
            add_minutes(day_start, BLANK_FORM_END_MINUTES)?,
            "",
        );
        self.open_form(FormMode::Create, draft);
        Ok(())
    }

    /// Opens a create form prefilled for a click at `start` on `track_id`.
    pub fn open_create_form_at(
        &mut self,
        track_id: TrackId,
        start: NaiveDateTime,
    ) -> TimeblockResult<()> {
        self.ensure_active_track(&track_id)?;
        let end = add_minutes(start, self.core.settings.default_block_minutes)?;
        let draft = BlockDraft::new(track_id, start, end, CLICK_CREATE_TITLE);
        self.open_form(FormMode::Create, draft);
        Ok(())
    }

    pub fn open_edit_form(&mut self, id: BlockId) -> TimeblockResult<()> {
        let block = self
            .core
            .model
            .blocks
            .get(id)
            .ok_or(TimeblockError::UnknownBlock(id))?;
        let draft = BlockDraft::from(block);
        self.open_form(FormMode::Edit(id), draft);
        Ok(())
    }

    #[must_use]
    pub fn form(&self) -> Option<&BlockForm> {
        self.core.runtime.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BlockForm> {
        self.core.runtime.form.as_mut()
    }

    #[must_use]
    pub fn is_form_open(&self) -> bool {
        self.core.runtime.form.is_some()
    }

    /// Validates and applies the form. On error the form stays open with the
    /// user's input intact.
    pub fn save_form(&mut self) -> TimeblockResult<BlockId> {
        let form = self
            .core
            .runtime
            .form
            .clone()
            .ok_or(TimeblockError::FormNotOpen)?;
        let result = match form.mode {
            FormMode::Create => self.create_block(form.draft),
            FormMode::Edit(id) => self
                .update_block(id, BlockPatch::from(form.draft))
                .map(|()| id),
        };
        match result {
            Ok(id) => {
                self.core.runtime.form = None;
                Ok(id)
            }
            Err(err) => {
                warn!(error = %err, "block form rejected");
                Err(err)
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.core.runtime.form = None;
    }

    /// Deletes the edited block (with bulk semantics) and closes the form.
    pub fn delete_from_form(&mut self) -> TimeblockResult<usize> {
        let form = self
            .core
            .runtime
            .form
            .take()
            .ok_or(TimeblockError::FormNotOpen)?;
        Ok(form.editing().map_or(0, |id| self.delete_block(id)))
    }

    fn open_form(&mut self, mode: FormMode, draft: BlockDraft) {
        self.core.interaction.set_detail_block(None);
        self.core.runtime.form = Some(BlockForm { mode, draft });
    }
}
