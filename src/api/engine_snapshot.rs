use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::{Block, BlockId, Track, ViewMode, ViewRange, Viewport};
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::SchedulerEngine;

/// Serializable deterministic state snapshot used by regression tests,
/// persistence and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    pub viewport: Viewport,
    pub view_mode: ViewMode,
    pub view_date: NaiveDate,
    pub view_range: ViewRange,
    pub now: NaiveDateTime,
    pub scroll_x: f64,
    pub total_width: f64,
    pub tracks: Vec<Track>,
    pub blocks: Vec<Block>,
    pub selection: Vec<BlockId>,
    pub interaction_mode: InteractionMode,
    pub history_index: usize,
    pub history_len: usize,
}

impl<R: Renderer> SchedulerEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            viewport: self.core.settings.viewport,
            view_mode: self.core.view.mode,
            view_date: self.core.view.date,
            view_range: self.core.view.range(),
            now: self.core.view.now,
            scroll_x: self.core.view.scroll_x,
            total_width: self.total_width(),
            tracks: self.core.model.tracks.as_slice().to_vec(),
            blocks: self.core.model.blocks.snapshot(),
            selection: self.core.interaction.selection().ids(),
            interaction_mode: self.core.interaction.mode(),
            history_index: self.core.model.history.index(),
            history_len: self.core.model.history.len(),
        }
    }
}
