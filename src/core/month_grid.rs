use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::block::{Block, BlockId};
use crate::core::primitives::{days_in_month, first_of_month, start_of_day};
use crate::core::track::TrackId;
use crate::error::{TimeblockError, TimeblockResult};

pub const MONTH_COLUMNS: usize = 7;
pub const DEFAULT_MAX_ENTRIES_PER_DAY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub block_id: BlockId,
    pub track_id: TrackId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub date: NaiveDate,
    /// At most `max_entries_per_day`, sorted by start.
    pub entries: Vec<MonthEntry>,
    /// Number of overlapping blocks not listed ("+N more").
    pub overflow: usize,
}

/// Day-bucketed month layout: 7 columns, Sunday first, with leading blank
/// cells up to the first day's weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month_start: NaiveDate,
    pub leading_blanks: usize,
    pub days: Vec<MonthDay>,
}

impl MonthGrid {
    /// Buckets `blocks` into the days of `anchor`'s month.
    ///
    /// A block lands on every day it overlaps
    /// (`block.start < day_end && block.end > day_start`).
    pub fn build<'a>(
        anchor: NaiveDate,
        blocks: impl IntoIterator<Item = &'a Block>,
        max_entries_per_day: usize,
    ) -> TimeblockResult<Self> {
        let month_start = first_of_month(anchor);
        let day_count = days_in_month(anchor)?;
        let leading_blanks = month_start.weekday().num_days_from_sunday() as usize;
        let blocks: Vec<&Block> = blocks.into_iter().collect();

        let mut days = Vec::with_capacity(day_count as usize);
        for offset in 0..day_count {
            let date = month_start
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| TimeblockError::InvalidData(format!("day {offset} of month")))?;
            let day_start = start_of_day(date);
            let day_end = start_of_day(
                date.succ_opt()
                    .ok_or_else(|| TimeblockError::InvalidData(format!("day after {date}")))?,
            );

            let mut overlapping: Vec<&Block> = blocks
                .iter()
                .copied()
                .filter(|block| block.start < day_end && block.end > day_start)
                .collect();
            overlapping.sort_by_key(|block| (block.start, block.id));

            let overflow = overlapping.len().saturating_sub(max_entries_per_day);
            let entries = overlapping
                .into_iter()
                .take(max_entries_per_day)
                .map(|block| MonthEntry {
                    block_id: block.id,
                    track_id: block.track_id.clone(),
                    title: block.title.clone(),
                    start: block.start,
                    end: block.end,
                })
                .collect();
            days.push(MonthDay {
                date,
                entries,
                overflow,
            });
        }

        Ok(Self {
            month_start,
            leading_blanks,
            days,
        })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        (self.leading_blanks + self.days.len()).div_ceil(MONTH_COLUMNS)
    }

    /// `(column, row)` of the cell for `days[day_index]`.
    #[must_use]
    pub fn cell_of(&self, day_index: usize) -> (usize, usize) {
        let slot = self.leading_blanks + day_index;
        (slot % MONTH_COLUMNS, slot / MONTH_COLUMNS)
    }

    /// Day shown in a cell; `None` for blank cells.
    #[must_use]
    pub fn day_at(&self, column: usize, row: usize) -> Option<&MonthDay> {
        if column >= MONTH_COLUMNS {
            return None;
        }
        let slot = row * MONTH_COLUMNS + column;
        slot.checked_sub(self.leading_blanks)
            .and_then(|index| self.days.get(index))
    }
}
