use chrono::{NaiveDate, NaiveDateTime};

use crate::core::{TimeScale, ViewMode, ViewModeConfig, ViewRange};
use crate::error::TimeblockResult;

/// Active resolution, its derived range and scale, and horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ViewState {
    pub(super) mode: ViewMode,
    pub(super) date: NaiveDate,
    pub(super) scale: TimeScale,
    pub(super) scroll_x: f64,
    pub(super) now: NaiveDateTime,
}

impl ViewState {
    pub(super) fn new(mode: ViewMode, date: NaiveDate, now: NaiveDateTime) -> TimeblockResult<Self> {
        let scale = TimeScale::for_view(mode.range_for(date)?, mode.config())?;
        Ok(Self {
            mode,
            date,
            scale,
            scroll_x: 0.0,
            now,
        })
    }

    /// Recomputes range and scale for `mode` anchored at `date`.
    pub(super) fn switch(&mut self, mode: ViewMode, date: NaiveDate) -> TimeblockResult<()> {
        let scale = TimeScale::for_view(mode.range_for(date)?, mode.config())?;
        self.mode = mode;
        self.date = date;
        self.scale = scale;
        Ok(())
    }

    pub(super) fn config(&self) -> ViewModeConfig {
        self.mode.config()
    }

    pub(super) fn range(&self) -> ViewRange {
        self.scale.range()
    }
}
