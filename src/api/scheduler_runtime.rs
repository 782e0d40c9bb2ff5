use crate::core::{CanvasGeometry, Viewport};
use crate::extensions::{LabelSource, SchedulerPlugin, StaticLabelRegistry};

use super::BlockForm;

/// Fixed canvas settings resolved from `SchedulerConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct EngineSettings {
    pub(super) viewport: Viewport,
    pub(super) geometry: CanvasGeometry,
    pub(super) click_threshold_px: f64,
    pub(super) default_block_minutes: i64,
}

/// Host-facing runtime attachments: plugins, label lookups and the open form.
pub(super) struct SchedulerRuntime {
    pub(super) plugins: Vec<Box<dyn SchedulerPlugin>>,
    pub(super) labels: Box<dyn LabelSource>,
    pub(super) form: Option<BlockForm>,
}

impl Default for SchedulerRuntime {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
            labels: Box::new(StaticLabelRegistry::default()),
            form: None,
        }
    }
}
