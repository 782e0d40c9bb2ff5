mod block_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod form_controller;
mod history_controller;
mod interaction_coordinator;
mod json_contract;
mod month_render_frame_builder;
mod plugin_dispatch;
mod render_frame_builder;
mod scheduler_model;
mod scheduler_runtime;
mod track_controller;
mod view_controller;
mod view_state;

pub use engine::SchedulerEngine;
pub use engine_config::SchedulerConfig;
pub use engine_snapshot::SchedulerSnapshot;
pub use form_controller::{BlockForm, FormMode};
pub use interaction_coordinator::PointerOutcome;
pub use json_contract::{
    SCHEDULER_SNAPSHOT_JSON_SCHEMA_V1, SchedulerSnapshotJsonContractV1, blocks_from_json,
    blocks_to_json,
};
pub use scheduler_model::SchedulerModel;
pub use track_controller::TrackRemovalRequest;
