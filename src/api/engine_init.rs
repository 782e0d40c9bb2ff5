use indexmap::IndexSet;
use tracing::debug;

use crate::core::{Block, TrackSet, track::parse_hex_rgb};
use crate::error::{TimeblockError, TimeblockResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{
    SchedulerConfig, SchedulerEngine, SchedulerModel,
    engine_core::EngineCore,
    scheduler_runtime::{EngineSettings, SchedulerRuntime},
    view_state::ViewState,
};

impl<R: Renderer> SchedulerEngine<R> {
    /// Creates an engine with an empty block store.
    pub fn new(renderer: R, config: SchedulerConfig) -> TimeblockResult<Self> {
        Self::with_blocks(renderer, config, Vec::new())
    }

    /// Creates an engine seeded with `blocks`.
    ///
    /// The seed becomes the first history entry, so it can never be undone.
    pub fn with_blocks(
        renderer: R,
        config: SchedulerConfig,
        blocks: Vec<Block>,
    ) -> TimeblockResult<Self> {
        config.validate()?;

        let mut seen = IndexSet::with_capacity(config.tracks.len());
        for track in &config.tracks {
            parse_hex_rgb(&track.color)?;
            if !seen.insert(track.id.clone()) {
                return Err(TimeblockError::InvalidData(format!(
                    "duplicate track id {}",
                    track.id
                )));
            }
        }

        let model = SchedulerModel::new(
            blocks,
            TrackSet::new(config.tracks.clone()),
            config.history_limit,
        )?;
        let view = ViewState::new(config.view_mode, config.anchor_date(), config.now)?;
        let mut interaction = InteractionState::default();
        interaction.set_nudge_config(config.keyboard_nudge);

        let mut engine = Self {
            renderer,
            core: EngineCore {
                model,
                view,
                interaction,
                settings: EngineSettings {
                    viewport: config.viewport,
                    geometry: config.geometry,
                    click_threshold_px: config.click_threshold_px,
                    default_block_minutes: config.default_block_minutes,
                },
                runtime: SchedulerRuntime::default(),
            },
        };
        engine.anchor_scroll();

        debug!(
            mode = engine.core.view.mode.label(),
            date = %engine.core.view.date,
            blocks = engine.core.model.blocks.len(),
            tracks = engine.core.model.tracks.len(),
            scroll_x = engine.core.view.scroll_x,
            "scheduler engine initialized"
        );
        Ok(engine)
    }
}
