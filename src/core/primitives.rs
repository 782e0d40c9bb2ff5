use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::{TimeblockError, TimeblockResult};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_DAY: i64 = 86_400_000;

#[must_use]
pub fn millis_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_milliseconds()
}

pub fn add_millis(time: NaiveDateTime, millis: i64) -> TimeblockResult<NaiveDateTime> {
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| time.checked_add_signed(delta))
        .ok_or_else(|| {
            TimeblockError::InvalidData(format!("time offset of {millis}ms is out of range"))
        })
}

pub fn add_minutes(time: NaiveDateTime, minutes: i64) -> TimeblockResult<NaiveDateTime> {
    let millis = minutes.checked_mul(MS_PER_MINUTE).ok_or_else(|| {
        TimeblockError::InvalidData(format!("minute offset {minutes} is out of range"))
    })?;
    add_millis(time, millis)
}

#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Sunday on or before `date`.
#[must_use]
pub fn week_start_sunday(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month following `date`'s month.
pub fn first_of_next_month(date: NaiveDate) -> TimeblockResult<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .ok_or_else(|| TimeblockError::InvalidData(format!("month after {date} is out of range")))
}

pub fn days_in_month(date: NaiveDate) -> TimeblockResult<u32> {
    let first = first_of_month(date);
    let next = first_of_next_month(date)?;
    Ok((next - first).num_days() as u32)
}

/// Drops seconds and sub-second precision.
#[must_use]
pub fn floor_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Rounds `time` to the nearest multiple of `step_ms` counted from `origin`.
/// Ties round away from the origin.
pub fn round_to_step(
    time: NaiveDateTime,
    origin: NaiveDateTime,
    step_ms: i64,
) -> TimeblockResult<NaiveDateTime> {
    if step_ms <= 0 {
        return Err(TimeblockError::InvalidData(
            "snap step must be > 0".to_owned(),
        ));
    }
    let offset = millis_between(origin, time);
    let steps = (offset as f64 / step_ms as f64).round() as i64;
    add_millis(origin, steps * step_ms)
}

/// `HH:MM` label used on block faces and form fields.
#[must_use]
pub fn format_hhmm(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}
