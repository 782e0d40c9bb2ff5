use crate::error::TimeblockResult;
use crate::extensions::SchedulerEvent;
use crate::render::{RenderFrame, Renderer};

use super::engine_core::EngineCore;

/// Main orchestration facade consumed by host applications.
///
/// `SchedulerEngine` owns the block store, tracks, history, view state and
/// transient interaction state, and hands finished frames to the renderer.
pub struct SchedulerEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> SchedulerEngine<R> {
    /// Builds the frame for the active view without drawing it.
    pub fn build_render_frame(&self) -> TimeblockResult<RenderFrame> {
        if self.core.view.mode.is_month() {
            self.build_month_render_frame()
        } else {
            self.build_timeline_render_frame()
        }
    }

    pub fn render(&mut self) -> TimeblockResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.emit_event(SchedulerEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
