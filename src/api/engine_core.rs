use crate::interaction::InteractionState;

use super::{
    SchedulerModel,
    scheduler_runtime::{EngineSettings, SchedulerRuntime},
    view_state::ViewState,
};

/// Internal engine core state used by the public facade (`SchedulerEngine`).
pub(super) struct EngineCore {
    pub(super) model: SchedulerModel,
    pub(super) view: ViewState,
    pub(super) interaction: InteractionState,
    pub(super) settings: EngineSettings,
    pub(super) runtime: SchedulerRuntime,
}
