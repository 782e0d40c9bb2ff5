use serde::{Deserialize, Serialize};

use crate::core::month_grid::MONTH_COLUMNS;
use crate::core::types::CanvasRect;
use crate::error::{TimeblockError, TimeblockResult};

/// Authoritative layout constants shared by hit-testing and rendering.
///
/// Content space: `x` already includes horizontal scroll, `y = 0` is the top of
/// the track container (directly under the tick header).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasGeometry {
    pub track_height: f64,
    pub track_gap: f64,
    pub top_padding: f64,
    /// Viewport rows above the track container (tick header and inset).
    pub header_height: f64,
    /// Offset of a block's top edge inside its track row.
    pub block_offset_y: f64,
    pub block_height: f64,
    /// Height of the drop-to-delete strip at the bottom of the viewport.
    pub delete_zone_height: f64,
    /// Distance kept left of the scroll anchor after a view switch.
    pub scroll_lead_px: f64,
    pub month_header_height: f64,
    pub month_cell_height: f64,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            track_height: 96.0,
            track_gap: 16.0,
            top_padding: 16.0,
            header_height: 48.0,
            block_offset_y: 32.0,
            block_height: 48.0,
            delete_zone_height: 150.0,
            scroll_lead_px: 100.0,
            month_header_height: 32.0,
            month_cell_height: 120.0,
        }
    }
}

impl CanvasGeometry {
    pub fn validate(self) -> TimeblockResult<Self> {
        for (name, value) in [
            ("track_height", self.track_height),
            ("block_height", self.block_height),
            ("month_cell_height", self.month_cell_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimeblockError::InvalidData(format!(
                    "geometry `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("track_gap", self.track_gap),
            ("top_padding", self.top_padding),
            ("header_height", self.header_height),
            ("block_offset_y", self.block_offset_y),
            ("delete_zone_height", self.delete_zone_height),
            ("scroll_lead_px", self.scroll_lead_px),
            ("month_header_height", self.month_header_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimeblockError::InvalidData(format!(
                    "geometry `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn track_stride(self) -> f64 {
        self.track_height + self.track_gap
    }

    #[must_use]
    pub fn track_top(self, index: usize) -> f64 {
        self.top_padding + index as f64 * self.track_stride()
    }

    #[must_use]
    pub fn content_height(self, track_count: usize) -> f64 {
        self.track_top(track_count) + self.top_padding
    }

    /// On-screen rectangle of a block spanning `[x_start, x_end]` in a track row.
    #[must_use]
    pub fn block_rect(self, x_start: f64, x_end: f64, track_index: usize) -> CanvasRect {
        CanvasRect::new(
            x_start,
            self.track_top(track_index) + self.block_offset_y,
            x_end - x_start,
            self.block_height,
        )
    }

    /// Track row under a content-space `y`, excluding the gaps between rows.
    #[must_use]
    pub fn track_at(self, content_y: f64, track_count: usize) -> Option<usize> {
        let relative = content_y - self.top_padding;
        if !relative.is_finite() || relative < 0.0 {
            return None;
        }
        let index = (relative / self.track_stride()).floor() as usize;
        let offset_in_track = relative - index as f64 * self.track_stride();
        (index < track_count && offset_in_track <= self.track_height).then_some(index)
    }

    /// Whole-row shift for a vertical drag displacement.
    #[must_use]
    pub fn track_delta_for(self, delta_y: f64) -> i64 {
        (delta_y / self.track_stride()).round() as i64
    }

    #[must_use]
    pub fn in_delete_zone(self, viewport_y: f64, viewport_height: u32) -> bool {
        f64::from(viewport_height) - viewport_y < self.delete_zone_height
    }

    /// Converts a viewport-space `y` into content space.
    #[must_use]
    pub fn content_y(self, viewport_y: f64) -> f64 {
        viewport_y - self.header_height
    }

    #[must_use]
    pub fn month_cell_width(self, viewport_width: u32) -> f64 {
        f64::from(viewport_width) / MONTH_COLUMNS as f64
    }

    /// Viewport-space top-left corner of a MONTH cell.
    #[must_use]
    pub fn month_cell_origin(self, column: usize, row: usize, viewport_width: u32) -> (f64, f64) {
        (
            column as f64 * self.month_cell_width(viewport_width),
            self.month_header_height + row as f64 * self.month_cell_height,
        )
    }

    /// `(column, row)` of the MONTH cell under a viewport-space position.
    /// `None` on the weekday header or outside the seven columns.
    #[must_use]
    pub fn month_cell_at(self, x: f64, y: f64, viewport_width: u32) -> Option<(usize, usize)> {
        let y = y - self.month_header_height;
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let column = (x / self.month_cell_width(viewport_width)).floor() as usize;
        if column >= MONTH_COLUMNS {
            return None;
        }
        let row = (y / self.month_cell_height).floor() as usize;
        Some((column, row))
    }
}
