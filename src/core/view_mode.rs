use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    MS_PER_DAY, MS_PER_MINUTE, add_millis, first_of_month, first_of_next_month, millis_between,
    start_of_day, week_start_sunday,
};
use crate::error::{TimeblockError, TimeblockResult};

/// Zoom resolution of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

/// Spacing between axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickInterval {
    Hour,
    Day,
}

impl TickInterval {
    #[must_use]
    pub const fn millis(self) -> i64 {
        match self {
            Self::Hour => 60 * MS_PER_MINUTE,
            Self::Day => MS_PER_DAY,
        }
    }
}

/// Declarative scale and snapping parameters of one [`ViewMode`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewModeConfig {
    pub mode: ViewMode,
    pub px_per_ms: f64,
    pub snap_minutes: i64,
    pub tick_interval: TickInterval,
}

const DAY_PX_PER_MINUTE: f64 = 2.0;
const WEEK_PX_PER_DAY: f64 = 240.0;
const MONTH_PX_PER_DAY: f64 = 48.0;

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    #[must_use]
    pub fn config(self) -> ViewModeConfig {
        match self {
            Self::Day => ViewModeConfig {
                mode: self,
                px_per_ms: DAY_PX_PER_MINUTE / MS_PER_MINUTE as f64,
                snap_minutes: 15,
                tick_interval: TickInterval::Hour,
            },
            Self::Week => ViewModeConfig {
                mode: self,
                px_per_ms: WEEK_PX_PER_DAY / MS_PER_DAY as f64,
                snap_minutes: 60,
                tick_interval: TickInterval::Day,
            },
            Self::Month => ViewModeConfig {
                mode: self,
                px_per_ms: MONTH_PX_PER_DAY / MS_PER_DAY as f64,
                snap_minutes: 24 * 60,
                tick_interval: TickInterval::Day,
            },
        }
    }

    /// Visible range derived from an anchor date.
    ///
    /// WEEK normalizes the anchor to the preceding Sunday; MONTH spans the
    /// whole calendar month regardless of the anchor day.
    pub fn range_for(self, anchor: NaiveDate) -> TimeblockResult<ViewRange> {
        let (start, end) = match self {
            Self::Day => {
                let start = start_of_day(anchor);
                (start, add_millis(start, MS_PER_DAY)?)
            }
            Self::Week => {
                let start = start_of_day(week_start_sunday(anchor));
                (start, add_millis(start, 7 * MS_PER_DAY)?)
            }
            Self::Month => (
                start_of_day(first_of_month(anchor)),
                start_of_day(first_of_next_month(anchor)?),
            ),
        };
        ViewRange::new(start, end)
    }

    /// MONTH renders as a calendar grid instead of a scrolled timeline.
    #[must_use]
    pub const fn is_month(self) -> bool {
        matches!(self, Self::Month)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
        }
    }
}

impl ViewModeConfig {
    #[must_use]
    pub fn snap_millis(self) -> i64 {
        self.snap_minutes * MS_PER_MINUTE
    }

    #[must_use]
    pub fn tick_count(self, range: ViewRange) -> usize {
        (range.duration_ms() / self.tick_interval.millis()).max(0) as usize
    }

    #[must_use]
    pub fn tick_label(self, time: NaiveDateTime) -> String {
        match self.mode {
            ViewMode::Day => time.format("%H:00").to_string(),
            ViewMode::Week => time.format("%a %d").to_string(),
            ViewMode::Month => time.format("%d").to_string(),
        }
    }

    /// Tick times and labels covering `range`, starting at `range.start`.
    pub fn ticks(self, range: ViewRange) -> TimeblockResult<Vec<(NaiveDateTime, String)>> {
        let step = self.tick_interval.millis();
        (0..self.tick_count(range))
            .map(|i| {
                let time = add_millis(range.start, i as i64 * step)?;
                Ok((time, self.tick_label(time)))
            })
            .collect()
    }
}

/// Absolute `[start, end)` window shown by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ViewRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> TimeblockResult<Self> {
        if end <= start {
            return Err(TimeblockError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn duration_ms(self) -> i64 {
        millis_between(self.start, self.end)
    }

    #[must_use]
    pub fn contains(self, time: NaiveDateTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Half-open overlap test used for culling and day bucketing.
    #[must_use]
    pub fn overlaps(self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}
