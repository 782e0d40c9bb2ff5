use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{add_millis, millis_between};
use crate::core::view_mode::{ViewModeConfig, ViewRange};
use crate::error::{TimeblockError, TimeblockResult};

/// Linear mapping between wall-clock time and horizontal canvas pixels.
///
/// `x = (t - range.start) * px_per_ms`. Inputs outside the range are valid and
/// produce negative or overflowing pixels; callers cull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    range: ViewRange,
    px_per_ms: f64,
}

impl TimeScale {
    pub fn new(range: ViewRange, px_per_ms: f64) -> TimeblockResult<Self> {
        if !px_per_ms.is_finite() || px_per_ms <= 0.0 {
            return Err(TimeblockError::InvalidData(
                "pixels per millisecond must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { range, px_per_ms })
    }

    pub fn for_view(range: ViewRange, config: ViewModeConfig) -> TimeblockResult<Self> {
        Self::new(range, config.px_per_ms)
    }

    #[must_use]
    pub fn range(self) -> ViewRange {
        self.range
    }

    #[must_use]
    pub fn px_per_ms(self) -> f64 {
        self.px_per_ms
    }

    #[must_use]
    pub fn date_to_px(self, time: NaiveDateTime) -> f64 {
        millis_between(self.range.start, time) as f64 * self.px_per_ms
    }

    /// Exact inverse of [`TimeScale::date_to_px`], rounded to the millisecond.
    pub fn px_to_date(self, px: f64) -> TimeblockResult<NaiveDateTime> {
        add_millis(self.range.start, self.px_to_millis(px)?)
    }

    /// Converts a pixel distance into a millisecond distance.
    pub fn px_to_millis(self, px: f64) -> TimeblockResult<i64> {
        if !px.is_finite() {
            return Err(TimeblockError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok((px / self.px_per_ms).round() as i64)
    }

    #[must_use]
    pub fn millis_to_px(self, millis: i64) -> f64 {
        millis as f64 * self.px_per_ms
    }

    #[must_use]
    pub fn total_width(self) -> f64 {
        self.millis_to_px(self.range.duration_ms())
    }
}
