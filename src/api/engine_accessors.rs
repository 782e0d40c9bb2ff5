use chrono::{NaiveDate, NaiveDateTime};

use crate::core::{
    Block, BlockId, BlockLayout, CanvasGeometry, SelectionBox, TimeScale, Track, ViewMode,
    ViewRange, Viewport, layout_blocks,
};
use crate::interaction::{DragSession, InteractionMode, KeyboardNudge};
use crate::render::Renderer;

use super::SchedulerEngine;

impl<R: Renderer> SchedulerEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.settings.viewport
    }

    #[must_use]
    pub fn geometry(&self) -> CanvasGeometry {
        self.core.settings.geometry
    }

    #[must_use]
    pub fn click_threshold_px(&self) -> f64 {
        self.core.settings.click_threshold_px
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.core.view.mode
    }

    #[must_use]
    pub fn view_date(&self) -> NaiveDate {
        self.core.view.date
    }

    #[must_use]
    pub fn view_range(&self) -> ViewRange {
        self.core.view.range()
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.core.view.scale
    }

    #[must_use]
    pub fn scroll_x(&self) -> f64 {
        self.core.view.scroll_x
    }

    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.core.view.now
    }

    /// Every stored block, including ones whose track was removed.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.core.model.blocks.iter()
    }

    /// Blocks on active tracks; the only ones drawn or hit-tested.
    pub fn visible_blocks(&self) -> impl Iterator<Item = &Block> {
        self.core.model.visible_blocks()
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.core.model.blocks.get(id)
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.core.model.blocks.len()
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        self.core.model.tracks.as_slice()
    }

    /// Content-space rectangles of every visible block, in paint order.
    #[must_use]
    pub fn block_layouts(&self) -> Vec<BlockLayout> {
        layout_blocks(
            &self.core.model.blocks,
            &self.core.model.tracks,
            self.core.view.scale,
            self.core.settings.geometry,
        )
    }

    #[must_use]
    pub fn selection(&self) -> Vec<BlockId> {
        self.core.interaction.selection().ids()
    }

    #[must_use]
    pub fn is_selected(&self, id: BlockId) -> bool {
        self.core.interaction.selection().contains(id)
    }

    #[must_use]
    pub fn selection_box(&self) -> Option<SelectionBox> {
        self.core.interaction.selection_box()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.core.interaction.drag_session()
    }

    #[must_use]
    pub fn keyboard_nudge(&self) -> Option<&KeyboardNudge> {
        self.core.interaction.nudge()
    }

    /// Block opened for details by the last plain click, if any.
    #[must_use]
    pub fn detail_block(&self) -> Option<&Block> {
        self.core
            .interaction
            .detail_block()
            .and_then(|id| self.core.model.blocks.get(id))
    }

    pub fn close_detail(&mut self) {
        self.core.interaction.set_detail_block(None);
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.core.model.history.len()
    }

    #[must_use]
    pub fn history_index(&self) -> usize {
        self.core.model.history.index()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.model.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.model.history.can_redo()
    }
}
