use crate::error::TimeblockResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer for tests and hosts that only consume state.
///
/// Frames are still validated, and the most recent one is kept for
/// inspection.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimeblockResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
