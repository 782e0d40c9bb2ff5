use serde::{Deserialize, Serialize};

use crate::core::{BlockId, ViewMode, ViewRange};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerContext {
    pub view_mode: ViewMode,
    pub view_range: ViewRange,
    pub blocks_len: usize,
    pub tracks_len: usize,
    pub selection_len: usize,
    pub history_index: usize,
    pub history_len: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SchedulerEvent {
    BlockCreated { id: BlockId },
    BlocksUpdated { count: usize },
    BlocksDeleted { count: usize },
    TrackAdded { index: usize },
    TrackRemoved { orphaned_blocks: usize },
    Undone { history_index: usize },
    Redone { history_index: usize },
    ViewChanged { mode: ViewMode },
    SelectionChanged { count: usize },
    Rendered,
}

/// Observer hook for host-side bookkeeping (autosave, analytics, status bars).
///
/// Plugins see events and a read-only context; they never mutate the engine.
pub trait SchedulerPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SchedulerEvent, context: SchedulerContext);
}
