use tracing::debug;

use crate::core::HistoryEntry;
use crate::extensions::SchedulerEvent;
use crate::interaction::PointerGesture;
use crate::render::Renderer;

use super::SchedulerEngine;

impl<R: Renderer> SchedulerEngine<R> {
    /// Steps back one history entry. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.core.model.history.undo().cloned() else {
            return false;
        };
        self.restore_history_entry(entry);
        let history_index = self.core.model.history.index();
        debug!(history_index, "undo");
        self.emit_event(SchedulerEvent::Undone { history_index });
        true
    }

    /// Steps forward one history entry. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.core.model.history.redo().cloned() else {
            return false;
        };
        self.restore_history_entry(entry);
        let history_index = self.core.model.history.index();
        debug!(history_index, "redo");
        self.emit_event(SchedulerEvent::Redone { history_index });
        true
    }

    fn restore_history_entry(&mut self, entry: HistoryEntry) {
        self.core.model.restore(entry);
        self.core.interaction.set_gesture(PointerGesture::Idle);
        self.core.interaction.take_nudge();
        self.prune_transient_state();
    }
}
