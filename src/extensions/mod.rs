mod labels;
mod plugins;

pub use labels::{LabelSource, StaticLabelRegistry, entity_label};
pub use plugins::{SchedulerContext, SchedulerEvent, SchedulerPlugin};
