use crate::core::{ViewMode, Viewport};
use crate::error::{TimeblockError, TimeblockResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one canvas draw pass.
///
/// Primitives are in paint order within each list; backends paint rects,
/// then lines, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub view_mode: ViewMode,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, view_mode: ViewMode) -> Self {
        Self {
            viewport,
            view_mode,
            rects: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        if !text.text.is_empty() {
            self.texts.push(text);
        }
    }

    pub fn validate(&self) -> TimeblockResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimeblockError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }

    /// Whether any text primitive carries exactly `label`.
    #[must_use]
    pub fn has_text(&self, label: &str) -> bool {
        self.texts.iter().any(|text| text.text == label)
    }
}
