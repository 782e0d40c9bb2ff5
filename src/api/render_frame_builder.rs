use crate::core::primitives::{MS_PER_MINUTE, format_hhmm};
use crate::error::TimeblockResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::SchedulerEngine;

const AXIS_FONT_PX: f64 = 10.0;
const TRACK_LABEL_FONT_PX: f64 = 10.0;
const TITLE_FONT_PX: f64 = 12.0;
const DETAIL_FONT_PX: f64 = 10.0;
const BLOCK_TEXT_INSET_PX: f64 = 8.0;
const ACCENT_BAR_WIDTH_PX: f64 = 4.0;
const DELETE_ZONE_FONT_PX: f64 = 14.0;

const DELETE_ZONE_ARMED_LABEL: &str = "RELEASE TO DELETE";
const DELETE_ZONE_IDLE_LABEL: &str = "DRAG HERE TO DELETE";

impl<R: Renderer> SchedulerEngine<R> {
    /// Timeline frame for DAY and WEEK.
    ///
    /// Content-space geometry is shifted by the horizontal scroll and the
    /// header height; blocks entirely outside the viewport are culled.
    pub(super) fn build_timeline_render_frame(&self) -> TimeblockResult<RenderFrame> {
        let viewport = self.core.settings.viewport;
        let geometry = self.core.settings.geometry;
        let view = &self.core.view;
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let mut frame = RenderFrame::new(viewport, view.mode);

        frame.push_rect(RectPrimitive::new(
            0.0,
            0.0,
            width,
            geometry.header_height,
            Color::rgba(0.0, 0.0, 0.0, 0.6),
        ));

        for (index, track) in self.core.model.tracks.iter().enumerate() {
            let top = geometry.header_height + geometry.track_top(index);
            frame.push_rect(RectPrimitive::new(
                0.0,
                top,
                width,
                geometry.track_height,
                Color::WHITE.with_alpha(0.02),
            ));
            frame.push_text(TextPrimitive::new(
                track.name.to_uppercase(),
                BLOCK_TEXT_INSET_PX,
                top + 14.0,
                TRACK_LABEL_FONT_PX,
                Color::from_hex(&track.color)?.with_alpha(0.7),
                TextHAlign::Left,
            ));
        }

        let tick_span_px = view
            .scale
            .millis_to_px(view.config().tick_interval.millis());
        for (time, label) in self.ticks()? {
            let x = view.scale.date_to_px(time) - view.scroll_x;
            if x < -tick_span_px || x > width {
                continue;
            }
            frame.push_line(LinePrimitive::new(
                x,
                geometry.header_height,
                x,
                height,
                1.0,
                Color::WHITE.with_alpha(0.05),
            ));
            frame.push_text(TextPrimitive::new(
                label,
                x + 4.0,
                geometry.header_height / 2.0,
                AXIS_FONT_PX,
                Color::WHITE.with_alpha(0.4),
                TextHAlign::Left,
            ));
        }

        self.push_block_primitives(&mut frame)?;

        if let Some(now_x) = self.now_indicator_x() {
            let x = now_x - view.scroll_x;
            if (0.0..=width).contains(&x) {
                frame.push_line(LinePrimitive::new(
                    x,
                    geometry.header_height,
                    x,
                    height,
                    2.0,
                    Color::DANGER,
                ));
            }
        }

        if let Some(bounds) = self.core.interaction.selection_box() {
            frame.push_rect(
                RectPrimitive::new(
                    bounds.x - view.scroll_x,
                    bounds.y + geometry.header_height,
                    bounds.width,
                    bounds.height,
                    Color::ACCENT.with_alpha(0.1),
                )
                .with_border(1.0, Color::ACCENT.with_alpha(0.5)),
            );
        }

        if let Some(session) = self.core.interaction.drag_session() {
            let zone_top = height - geometry.delete_zone_height;
            let (fill, label) = if session.delete_armed {
                (Color::DANGER.with_alpha(0.2), DELETE_ZONE_ARMED_LABEL)
            } else {
                (Color::rgba(0.0, 0.0, 0.0, 0.8), DELETE_ZONE_IDLE_LABEL)
            };
            frame.push_rect(
                RectPrimitive::new(0.0, zone_top, width, geometry.delete_zone_height, fill)
                    .with_border(1.0, Color::DANGER.with_alpha(0.5)),
            );
            frame.push_text(TextPrimitive::new(
                label,
                width / 2.0,
                zone_top + geometry.delete_zone_height / 2.0,
                DELETE_ZONE_FONT_PX,
                Color::DANGER,
                TextHAlign::Center,
            ));
        }

        Ok(frame)
    }

    fn push_block_primitives(&self, frame: &mut RenderFrame) -> TimeblockResult<()> {
        let geometry = self.core.settings.geometry;
        let view = &self.core.view;
        let width = f64::from(self.core.settings.viewport.width);
        let interaction = &self.core.interaction;
        let selection = interaction.selection();
        let drag = interaction.drag_session();
        let nudge_px = interaction
            .nudge()
            .filter(|nudge| nudge.pending_minutes != 0)
            .map(|nudge| view.scale.millis_to_px(nudge.pending_minutes * MS_PER_MINUTE));

        for layout in self.block_layouts() {
            let Some(block) = self.core.model.blocks.get(layout.id) else {
                continue;
            };
            let Some(track) = self.core.model.tracks.at(layout.track_index) else {
                continue;
            };
            let selected = selection.contains(layout.id);

            // Previews only; the store is untouched until release.
            let rect = match (drag, nudge_px) {
                (Some(session), _) if session.contains(layout.id) => {
                    layout.rect.translated(session.delta_x, session.delta_y)
                }
                (None, Some(dx)) if selected => layout.rect.translated(dx, 0.0),
                _ => layout.rect,
            };

            let x = rect.x - view.scroll_x;
            if x + rect.width < 0.0 || x > width {
                continue;
            }
            let y = rect.y + geometry.header_height;
            let color = Color::from_hex(&track.color)?;
            let (border_width, border_color) = if selected {
                (2.0, Color::ACCENT)
            } else {
                (1.0, color.with_alpha(0.3))
            };

            frame.push_rect(
                RectPrimitive::new(x, y, rect.width, rect.height, color.with_alpha(0.1))
                    .with_border(border_width, border_color),
            );
            frame.push_rect(RectPrimitive::new(
                x,
                y,
                ACCENT_BAR_WIDTH_PX.min(rect.width),
                rect.height,
                color,
            ));
            frame.push_text(TextPrimitive::new(
                block.title.clone(),
                x + BLOCK_TEXT_INSET_PX,
                y + 16.0,
                TITLE_FONT_PX,
                Color::WHITE,
                TextHAlign::Left,
            ));
            frame.push_text(TextPrimitive::new(
                format!("{} - {}", format_hhmm(block.start), format_hhmm(block.end)),
                x + BLOCK_TEXT_INSET_PX,
                y + 30.0,
                DETAIL_FONT_PX,
                Color::WHITE.with_alpha(0.5),
                TextHAlign::Left,
            ));
            if let Some(label) = self.block_entity_label(block.id) {
                frame.push_text(TextPrimitive::new(
                    label,
                    x + BLOCK_TEXT_INSET_PX,
                    y + 42.0,
                    DETAIL_FONT_PX,
                    Color::ACCENT.with_alpha(0.8),
                    TextHAlign::Left,
                ));
            }
        }

        Ok(())
    }
}
