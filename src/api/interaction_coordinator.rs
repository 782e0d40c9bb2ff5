use chrono::NaiveDate;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::primitives::{add_minutes, floor_to_minute};
use crate::core::{Block, BlockId, PointerPosition, hit_test, intersecting};
use crate::error::TimeblockResult;
use crate::extensions::SchedulerEvent;
use crate::interaction::{
    DragMember, DragSession, Key, Modifiers, NudgeStep, PendingPress, PointerGesture, PressTarget,
    RubberBand,
};
use crate::render::Renderer;

use super::SchedulerEngine;

/// What a completed pointer gesture did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    None,
    BlockClicked(BlockId),
    SelectionChanged(usize),
    CreateFormOpened,
    BlocksMoved(usize),
    BlocksDeleted(usize),
    DrilledIntoDay(NaiveDate),
}

impl<R: Renderer> SchedulerEngine<R> {
    /// Starts a gesture at a viewport-space position.
    ///
    /// On a block this arms a click-or-drag; on empty timeline canvas it
    /// starts a rubber band; in MONTH it arms a day drill-down.
    pub fn pointer_down(&mut self, position: PointerPosition, modifiers: Modifiers) {
        if self.core.runtime.form.is_some() {
            return;
        }

        if self.core.view.mode.is_month() {
            let target = self
                .month_day_at(position)
                .map_or(PressTarget::Canvas, PressTarget::MonthDay);
            self.core.interaction.set_gesture(PointerGesture::Pressed(PendingPress {
                target,
                x: position.x,
                y: position.y,
                modifiers,
            }));
            return;
        }

        let (x, y) = self.to_content(position);
        if let Some(id) = hit_test(&self.block_layouts(), x, y) {
            trace!(block = %id, x, y, "pointer down on block");
            self.core.interaction.set_gesture(PointerGesture::Pressed(PendingPress {
                target: PressTarget::Block(id),
                x,
                y,
                modifiers,
            }));
            return;
        }

        let additive = modifiers.additive();
        let selection = self.core.interaction.selection_mut();
        let base = selection.ids();
        let cleared = !additive && !selection.is_empty();
        if cleared {
            selection.clear();
        }
        trace!(x, y, additive, "rubber band started");
        self.core
            .interaction
            .set_gesture(PointerGesture::RubberBand(RubberBand::new(x, y, base, additive)));
        if cleared {
            self.emit_event(SchedulerEvent::SelectionChanged { count: 0 });
        }
    }

    /// Continues the current gesture. Nothing durable changes here.
    pub fn pointer_move(&mut self, position: PointerPosition) {
        let (x, y) = self.to_content(position);
        let gesture = match self.core.interaction.take_gesture() {
            PointerGesture::Pressed(press) => match press.target {
                PressTarget::Block(id) if self.exceeds_click_threshold(press.x, press.y, x, y) => {
                    let mut session = self.begin_drag(id, press.x, press.y);
                    session.update(x, y, self.delete_zone_hit(position.y));
                    PointerGesture::Dragging(session)
                }
                _ => PointerGesture::Pressed(press),
            },
            PointerGesture::RubberBand(mut band) => {
                band.current_x = x;
                band.current_y = y;
                if !band.is_click(self.core.settings.click_threshold_px) {
                    self.apply_rubber_band(&band);
                }
                PointerGesture::RubberBand(band)
            }
            PointerGesture::Dragging(mut session) => {
                session.update(x, y, self.delete_zone_hit(position.y));
                PointerGesture::Dragging(session)
            }
            PointerGesture::Idle => PointerGesture::Idle,
        };
        self.core.interaction.set_gesture(gesture);
    }

    /// Ends the current gesture.
    ///
    /// A drag commits at most one history entry, either the move or the
    /// delete-zone removal.
    pub fn pointer_up(&mut self, position: PointerPosition) -> TimeblockResult<PointerOutcome> {
        let (x, y) = self.to_content(position);
        match self.core.interaction.take_gesture() {
            PointerGesture::Idle => Ok(PointerOutcome::None),
            PointerGesture::Pressed(press) => match press.target {
                PressTarget::Block(id) if self.exceeds_click_threshold(press.x, press.y, x, y) => {
                    let mut session = self.begin_drag(id, press.x, press.y);
                    session.update(x, y, self.delete_zone_hit(position.y));
                    self.finish_drag(session)
                }
                _ => self.finish_press(press, position),
            },
            PointerGesture::RubberBand(mut band) => {
                band.current_x = x;
                band.current_y = y;
                if band.is_click(self.core.settings.click_threshold_px) {
                    self.click_empty_canvas(band.origin_x, band.origin_y)
                } else {
                    self.apply_rubber_band(&band);
                    Ok(PointerOutcome::SelectionChanged(
                        self.core.interaction.selection().len(),
                    ))
                }
            }
            PointerGesture::Dragging(mut session) => {
                session.update(x, y, self.delete_zone_hit(position.y));
                self.finish_drag(session)
            }
        }
    }

    /// Pointer left the canvas. A drag keeps going; anything else ends
    /// without click semantics.
    pub fn pointer_leave(&mut self) {
        if let PointerGesture::Dragging(session) = self.core.interaction.take_gesture() {
            self.core
                .interaction
                .set_gesture(PointerGesture::Dragging(session));
        }
    }

    /// Handles a key press. Returns the number of blocks deleted.
    ///
    /// Arrow keys start a held nudge driven by `step_keyboard_frame`.
    pub fn key_down(&mut self, key: Key, now_ms: u64) -> usize {
        if self.core.runtime.form.is_some() {
            return 0;
        }
        match key.nudge_direction() {
            None => self.delete_selection(),
            Some(direction) => {
                if self.core.interaction.nudge().is_none() {
                    self.core.interaction.start_nudge(direction, now_ms);
                }
                0
            }
        }
    }

    /// Advances a held arrow key by one animation frame.
    ///
    /// With a selection the movement accumulates as a preview; without one
    /// the canvas scrolls.
    pub fn step_keyboard_frame(&mut self, now_ms: u64) -> Option<NudgeStep> {
        let moves_blocks = !self.core.interaction.selection().is_empty();
        let config = self.core.interaction.nudge_config();
        let step = self
            .core
            .interaction
            .nudge_mut()?
            .step(now_ms, moves_blocks, config);
        if let NudgeStep::ScrollPx(delta) = step {
            self.scroll_by(delta);
        }
        Some(step)
    }

    /// Releases a held arrow key, committing the accumulated nudge as one
    /// history entry. Returns the number of blocks moved.
    pub fn key_up(&mut self, key: Key) -> TimeblockResult<usize> {
        let Some(direction) = key.nudge_direction() else {
            return Ok(0);
        };
        if !self
            .core
            .interaction
            .nudge()
            .is_some_and(|nudge| nudge.direction == direction)
        {
            return Ok(0);
        }
        let Some(nudge) = self.core.interaction.take_nudge() else {
            return Ok(0);
        };
        if nudge.pending_minutes == 0 {
            return Ok(0);
        }

        let updated = self
            .core
            .interaction
            .selection()
            .iter()
            .filter_map(|id| self.core.model.blocks.get(id))
            .map(|block| {
                let mut moved = block.clone();
                moved.start = add_minutes(block.start, nudge.pending_minutes)?;
                moved.end = add_minutes(block.end, nudge.pending_minutes)?;
                Ok(moved)
            })
            .collect::<TimeblockResult<Vec<_>>>()?;
        debug!(minutes = nudge.pending_minutes, "keyboard nudge released");
        self.commit_moved_blocks(updated)
    }

    fn to_content(&self, position: PointerPosition) -> (f64, f64) {
        (
            position.x + self.core.view.scroll_x,
            self.core.settings.geometry.content_y(position.y),
        )
    }

    fn delete_zone_hit(&self, viewport_y: f64) -> bool {
        self.core
            .settings
            .geometry
            .in_delete_zone(viewport_y, self.core.settings.viewport.height)
    }

    fn exceeds_click_threshold(&self, from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> bool {
        let threshold = self.core.settings.click_threshold_px;
        (to_x - from_x).abs() >= threshold || (to_y - from_y).abs() >= threshold
    }

    fn begin_drag(&mut self, primary: BlockId, origin_x: f64, origin_y: f64) -> DragSession {
        if !self.core.interaction.selection().contains(primary) {
            self.core.interaction.selection_mut().select_only(primary);
            self.emit_event(SchedulerEvent::SelectionChanged { count: 1 });
        }
        let model = &self.core.model;
        let members: SmallVec<[DragMember; 4]> = self
            .core
            .interaction
            .selection()
            .iter()
            .filter_map(|id| {
                let block = model.blocks.get(id)?;
                let track_index = model.tracks.index_of(&block.track_id)?;
                Some(DragMember {
                    id,
                    start: block.start,
                    end: block.end,
                    track_index,
                })
            })
            .collect();
        debug!(primary = %primary, members = members.len(), "drag started");
        DragSession::new(primary, members, origin_x, origin_y)
    }

    fn finish_drag(&mut self, session: DragSession) -> TimeblockResult<PointerOutcome> {
        debug!(
            primary = %session.primary,
            delta_x = session.delta_x,
            delta_y = session.delta_y,
            delete_armed = session.delete_armed,
            "drag released"
        );
        if session.delete_armed {
            let ids = self
                .core
                .interaction
                .selection()
                .resolve_delete_target(Some(session.primary));
            let count = self.delete_blocks(&ids);
            return Ok(PointerOutcome::BlocksDeleted(count));
        }

        let placements = session.resolve(
            self.core.view.scale,
            self.core.view.config().snap_millis(),
            self.core.settings.geometry,
            self.core.model.tracks.len(),
        )?;
        let model = &self.core.model;
        let updated: Vec<Block> = placements
            .into_iter()
            .filter_map(|placement| {
                let block = model.blocks.get(placement.id)?;
                let track = model.tracks.at(placement.track_index)?;
                let unchanged = block.start == placement.start
                    && block.end == placement.end
                    && block.track_id == track.id;
                if unchanged {
                    return None;
                }
                let mut moved = block.clone();
                moved.start = placement.start;
                moved.end = placement.end;
                moved.track_id = track.id.clone();
                Some(moved)
            })
            .collect();
        let count = self.commit_moved_blocks(updated)?;
        Ok(PointerOutcome::BlocksMoved(count))
    }

    fn finish_press(
        &mut self,
        press: PendingPress,
        release: PointerPosition,
    ) -> TimeblockResult<PointerOutcome> {
        match press.target {
            PressTarget::Block(id) => {
                if press.modifiers.additive() {
                    self.core.interaction.selection_mut().toggle(id);
                } else {
                    self.core.interaction.selection_mut().select_only(id);
                    self.core.interaction.set_detail_block(Some(id));
                }
                let count = self.core.interaction.selection().len();
                self.emit_event(SchedulerEvent::SelectionChanged { count });
                Ok(PointerOutcome::BlockClicked(id))
            }
            PressTarget::MonthDay(date) => {
                // Month presses carry viewport coordinates.
                let moved = self.exceeds_click_threshold(press.x, press.y, release.x, release.y);
                if moved || self.month_day_at(release) != Some(date) {
                    trace!(%date, "month press released away from its day");
                    return Ok(PointerOutcome::None);
                }
                self.drill_into_day(date)?;
                Ok(PointerOutcome::DrilledIntoDay(date))
            }
            PressTarget::Canvas => Ok(PointerOutcome::None),
        }
    }

    /// Click on empty canvas: opens a create form for the clicked track and
    /// minute, or does nothing outside the track rows.
    fn click_empty_canvas(&mut self, x: f64, y: f64) -> TimeblockResult<PointerOutcome> {
        let geometry = self.core.settings.geometry;
        let Some(track_index) = geometry.track_at(y, self.core.model.tracks.len()) else {
            return Ok(PointerOutcome::None);
        };
        let Some(track_id) = self
            .core
            .model
            .tracks
            .at(track_index)
            .map(|track| track.id.clone())
        else {
            return Ok(PointerOutcome::None);
        };
        let start = floor_to_minute(self.core.view.scale.px_to_date(x)?);
        self.core.interaction.selection_mut().clear();
        self.open_create_form_at(track_id, start)?;
        Ok(PointerOutcome::CreateFormOpened)
    }

    fn apply_rubber_band(&mut self, band: &RubberBand) {
        let hits = intersecting(&self.block_layouts(), band.selection_box());
        let merged = band.merged_selection(hits);
        if merged == self.core.interaction.selection().ids() {
            return;
        }
        let count = merged.len();
        self.core.interaction.selection_mut().replace(merged);
        self.emit_event(SchedulerEvent::SelectionChanged { count });
    }
}
