use tracing::debug;

use crate::error::{TimeblockError, TimeblockResult};
use crate::extensions::{LabelSource, SchedulerContext, SchedulerEvent, SchedulerPlugin};
use crate::render::Renderer;

use super::SchedulerEngine;

impl<R: Renderer> SchedulerEngine<R> {
    /// Registers a plugin. Ids must be unique.
    pub fn register_plugin(&mut self, plugin: Box<dyn SchedulerPlugin>) -> TimeblockResult<()> {
        let id = plugin.id().to_owned();
        if self.has_plugin(&id) {
            return Err(TimeblockError::DuplicatePlugin(id));
        }
        debug!(plugin = %id, "plugin registered");
        self.core.runtime.plugins.push(plugin);
        Ok(())
    }

    pub fn unregister_plugin(&mut self, id: &str) -> bool {
        let plugins = &mut self.core.runtime.plugins;
        let Some(index) = plugins.iter().position(|plugin| plugin.id() == id) else {
            return false;
        };
        plugins.remove(index);
        true
    }

    #[must_use]
    pub fn has_plugin(&self, id: &str) -> bool {
        self.core
            .runtime
            .plugins
            .iter()
            .any(|plugin| plugin.id() == id)
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.core.runtime.plugins.len()
    }

    /// Replaces the `{code, name}` source used for link badges.
    pub fn set_label_source(&mut self, source: Box<dyn LabelSource>) {
        self.core.runtime.labels = source;
    }

    #[must_use]
    pub fn label_source(&self) -> &dyn LabelSource {
        self.core.runtime.labels.as_ref()
    }

    #[must_use]
    pub fn scheduler_context(&self) -> SchedulerContext {
        SchedulerContext {
            view_mode: self.core.view.mode,
            view_range: self.core.view.range(),
            blocks_len: self.core.model.blocks.len(),
            tracks_len: self.core.model.tracks.len(),
            selection_len: self.core.interaction.selection().len(),
            history_index: self.core.model.history.index(),
            history_len: self.core.model.history.len(),
            interaction_mode: self.core.interaction.mode(),
        }
    }

    pub(super) fn emit_event(&mut self, event: SchedulerEvent) {
        let context = self.scheduler_context();
        for plugin in &mut self.core.runtime.plugins {
            plugin.on_event(event, context);
        }
    }
}
