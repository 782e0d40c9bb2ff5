use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, trace, warn};

use crate::core::primitives::add_minutes;
use crate::core::{ViewMode, ViewRange};
use crate::error::{TimeblockError, TimeblockResult};
use crate::extensions::SchedulerEvent;
use crate::interaction::PointerGesture;
use crate::render::Renderer;

use super::SchedulerEngine;

/// Scroll target used by DAY when "now" is outside the visible day.
const DAY_FALLBACK_ANCHOR_MINUTES: i64 = 8 * 60;

impl<R: Renderer> SchedulerEngine<R> {
    /// Switches resolution, keeping the anchor date.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> TimeblockResult<()> {
        let date = self.core.view.date;
        self.apply_view(mode, date)
    }

    pub fn set_view_date(&mut self, date: NaiveDate) -> TimeblockResult<()> {
        let mode = self.core.view.mode;
        self.apply_view(mode, date)
    }

    /// Moves the anchor by whole periods of the active resolution
    /// (days, weeks or months). Negative values go back.
    pub fn shift_view(&mut self, periods: i32) -> TimeblockResult<()> {
        let date = self.core.view.date;
        let magnitude = periods.unsigned_abs();
        let shifted = match self.core.view.mode {
            ViewMode::Day | ViewMode::Week => {
                let per_period = if self.core.view.mode == ViewMode::Week { 7 } else { 1 };
                let days = Days::new(u64::from(magnitude) * per_period);
                if periods >= 0 {
                    date.checked_add_days(days)
                } else {
                    date.checked_sub_days(days)
                }
            }
            ViewMode::Month => {
                let months = Months::new(magnitude);
                if periods >= 0 {
                    date.checked_add_months(months)
                } else {
                    date.checked_sub_months(months)
                }
            }
        }
        .ok_or_else(|| {
            TimeblockError::InvalidData(format!("cannot shift {date} by {periods} periods"))
        })?;
        self.set_view_date(shifted)
    }

    /// Jumps from a month cell to the DAY view of `date`.
    pub fn drill_into_day(&mut self, date: NaiveDate) -> TimeblockResult<()> {
        self.apply_view(ViewMode::Day, date)
    }

    /// Updates the wall clock used by the now indicator and scroll anchoring.
    /// Never touches blocks or history.
    pub fn tick_now(&mut self, now: NaiveDateTime) {
        self.core.view.now = now;
        trace!(%now, "now ticked");
    }

    /// Content-space x of the now indicator, when "now" is in range.
    #[must_use]
    pub fn now_indicator_x(&self) -> Option<f64> {
        let view = &self.core.view;
        view.range()
            .contains(view.now)
            .then(|| view.scale.date_to_px(view.now))
    }

    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.core.view.scale.total_width()
    }

    #[must_use]
    pub fn max_scroll_x(&self) -> f64 {
        (self.total_width() - f64::from(self.core.settings.viewport.width)).max(0.0)
    }

    /// Sets the horizontal scroll, clamped to the content. Returns the
    /// applied offset.
    pub fn set_scroll_x(&mut self, scroll_x: f64) -> f64 {
        if !scroll_x.is_finite() {
            warn!(scroll_x, "ignoring non-finite scroll offset");
            return self.core.view.scroll_x;
        }
        self.core.view.scroll_x = scroll_x.clamp(0.0, self.max_scroll_x());
        self.core.view.scroll_x
    }

    pub fn scroll_by(&mut self, delta_px: f64) -> f64 {
        self.set_scroll_x(self.core.view.scroll_x + delta_px)
    }

    /// Axis ticks of the active view with their labels.
    pub fn ticks(&self) -> TimeblockResult<Vec<(NaiveDateTime, String)>> {
        let view = &self.core.view;
        view.config().ticks(view.range())
    }

    fn apply_view(&mut self, mode: ViewMode, date: NaiveDate) -> TimeblockResult<()> {
        self.core.view.switch(mode, date)?;
        self.core.interaction.set_gesture(PointerGesture::Idle);
        self.anchor_scroll();
        debug!(
            mode = mode.label(),
            %date,
            scroll_x = self.core.view.scroll_x,
            "view changed"
        );
        self.emit_event(SchedulerEvent::ViewChanged { mode });
        Ok(())
    }

    /// Places "now" `scroll_lead_px` from the left edge when it is visible;
    /// otherwise DAY shows 08:00 and the other resolutions start at 0.
    pub(super) fn anchor_scroll(&mut self) {
        let view = self.core.view;
        let lead = self.core.settings.geometry.scroll_lead_px;
        let target = anchor_time(view.range(), view.mode, view.now)
            .map_or(0.0, |time| view.scale.date_to_px(time) - lead);
        self.set_scroll_x(target);
    }
}

fn anchor_time(range: ViewRange, mode: ViewMode, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if range.contains(now) {
        return Some(now);
    }
    match mode {
        ViewMode::Day => add_minutes(range.start, DAY_FALLBACK_ANCHOR_MINUTES).ok(),
        ViewMode::Week | ViewMode::Month => None,
    }
}
