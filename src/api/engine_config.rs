use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::{CanvasGeometry, DEFAULT_HISTORY_LIMIT, Track, ViewMode, Viewport, default_tracks};
use crate::error::{TimeblockError, TimeblockResult};
use crate::interaction::KeyboardNudgeConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist canvas setup alongside their own
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub viewport: Viewport,
    /// Wall-clock "now" at startup; later updated through `tick_now`.
    pub now: NaiveDateTime,
    #[serde(default = "default_view_mode")]
    pub view_mode: ViewMode,
    /// Anchor date; defaults to the date of `now`.
    #[serde(default)]
    pub view_date: Option<NaiveDate>,
    #[serde(default)]
    pub geometry: CanvasGeometry,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_click_threshold_px")]
    pub click_threshold_px: f64,
    #[serde(default = "default_block_minutes")]
    pub default_block_minutes: i64,
    #[serde(default = "default_tracks")]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub keyboard_nudge: KeyboardNudgeConfig,
}

impl SchedulerConfig {
    /// Creates a DAY-view config anchored at `now`'s date with default tracks.
    #[must_use]
    pub fn new(viewport: Viewport, now: NaiveDateTime) -> Self {
        Self {
            viewport,
            now,
            view_mode: default_view_mode(),
            view_date: None,
            geometry: CanvasGeometry::default(),
            history_limit: default_history_limit(),
            click_threshold_px: default_click_threshold_px(),
            default_block_minutes: default_block_minutes(),
            tracks: default_tracks(),
            keyboard_nudge: KeyboardNudgeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    #[must_use]
    pub fn with_view_date(mut self, date: NaiveDate) -> Self {
        self.view_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: CanvasGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub fn with_click_threshold_px(mut self, threshold: f64) -> Self {
        self.click_threshold_px = threshold;
        self
    }

    #[must_use]
    pub fn with_default_block_minutes(mut self, minutes: i64) -> Self {
        self.default_block_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }

    #[must_use]
    pub fn with_keyboard_nudge(mut self, config: KeyboardNudgeConfig) -> Self {
        self.keyboard_nudge = config;
        self
    }

    #[must_use]
    pub fn anchor_date(&self) -> NaiveDate {
        self.view_date.unwrap_or_else(|| self.now.date())
    }

    pub fn validate(&self) -> TimeblockResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimeblockError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.geometry.validate()?;
        if self.history_limit == 0 {
            return Err(TimeblockError::InvalidData(
                "history limit must be > 0".to_owned(),
            ));
        }
        if !self.click_threshold_px.is_finite() || self.click_threshold_px < 0.0 {
            return Err(TimeblockError::InvalidData(
                "click threshold must be finite and >= 0".to_owned(),
            ));
        }
        if self.default_block_minutes <= 0 {
            return Err(TimeblockError::InvalidData(
                "default block duration must be > 0 minutes".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> TimeblockResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimeblockError::InvalidData(format!("failed to parse config json: {e}")))
    }

    pub fn to_json_pretty(&self) -> TimeblockResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimeblockError::InvalidData(format!("failed to serialize config json: {e}"))
        })
    }
}

fn default_view_mode() -> ViewMode {
    ViewMode::Day
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_click_threshold_px() -> f64 {
    5.0
}

fn default_block_minutes() -> i64 {
    30
}
