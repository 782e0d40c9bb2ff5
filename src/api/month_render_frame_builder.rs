use chrono::{Datelike, NaiveDate};

use crate::core::month_grid::{DEFAULT_MAX_ENTRIES_PER_DAY, MONTH_COLUMNS};
use crate::core::{Block, MonthGrid, PointerPosition};
use crate::error::TimeblockResult;
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::SchedulerEngine;

const WEEKDAY_LABELS: [&str; MONTH_COLUMNS] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
const HEADER_FONT_PX: f64 = 10.0;
const DAY_NUMBER_FONT_PX: f64 = 12.0;
const ENTRY_FONT_PX: f64 = 10.0;
const CELL_INSET_PX: f64 = 6.0;
const ENTRY_TOP_PX: f64 = 30.0;
const ENTRY_LINE_PX: f64 = 16.0;

impl<R: Renderer> SchedulerEngine<R> {
    /// Visible blocks bucketed into the days of the anchor month.
    pub fn month_grid(&self) -> TimeblockResult<MonthGrid> {
        MonthGrid::build(
            self.core.view.date,
            self.core.model.visible_blocks(),
            DEFAULT_MAX_ENTRIES_PER_DAY,
        )
    }

    /// Day cell under a viewport-space position in the MONTH layout.
    #[must_use]
    pub fn month_day_at(&self, position: PointerPosition) -> Option<NaiveDate> {
        let (column, row) = self.core.settings.geometry.month_cell_at(
            position.x,
            position.y,
            self.core.settings.viewport.width,
        )?;
        let grid = MonthGrid::build(self.core.view.date, std::iter::empty::<&Block>(), 0).ok()?;
        grid.day_at(column, row).map(|day| day.date)
    }

    pub(super) fn build_month_render_frame(&self) -> TimeblockResult<RenderFrame> {
        let viewport = self.core.settings.viewport;
        let geometry = self.core.settings.geometry;
        let cell_width = geometry.month_cell_width(viewport.width);
        let today = self.core.view.now.date();
        let grid = self.month_grid()?;
        let mut frame = RenderFrame::new(viewport, self.core.view.mode);

        for (column, label) in WEEKDAY_LABELS.iter().enumerate() {
            frame.push_text(TextPrimitive::new(
                *label,
                (column as f64 + 0.5) * cell_width,
                geometry.month_header_height / 2.0,
                HEADER_FONT_PX,
                Color::WHITE.with_alpha(0.4),
                TextHAlign::Center,
            ));
        }

        for (index, day) in grid.days.iter().enumerate() {
            let (column, row) = grid.cell_of(index);
            let (x, y) = geometry.month_cell_origin(column, row, viewport.width);
            let border = if day.date == today {
                Color::ACCENT
            } else {
                Color::WHITE.with_alpha(0.05)
            };
            frame.push_rect(
                RectPrimitive::new(
                    x,
                    y,
                    cell_width,
                    geometry.month_cell_height,
                    Color::WHITE.with_alpha(0.02),
                )
                .with_border(1.0, border),
            );
            frame.push_text(TextPrimitive::new(
                day.date.day().to_string(),
                x + CELL_INSET_PX,
                y + 14.0,
                DAY_NUMBER_FONT_PX,
                Color::WHITE.with_alpha(0.6),
                TextHAlign::Left,
            ));

            for (line, entry) in day.entries.iter().enumerate() {
                let color = match self.core.model.tracks.get(&entry.track_id) {
                    Some(track) => Color::from_hex(&track.color)?,
                    None => Color::WHITE,
                };
                frame.push_text(TextPrimitive::new(
                    entry.title.clone(),
                    x + CELL_INSET_PX,
                    y + ENTRY_TOP_PX + line as f64 * ENTRY_LINE_PX,
                    ENTRY_FONT_PX,
                    color,
                    TextHAlign::Left,
                ));
            }
            if day.overflow > 0 {
                frame.push_text(TextPrimitive::new(
                    format!("+{} more", day.overflow),
                    x + CELL_INSET_PX,
                    y + ENTRY_TOP_PX + day.entries.len() as f64 * ENTRY_LINE_PX,
                    ENTRY_FONT_PX,
                    Color::WHITE.with_alpha(0.5),
                    TextHAlign::Left,
                ));
            }
        }

        Ok(frame)
    }
}
