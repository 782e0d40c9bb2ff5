use chrono::NaiveDateTime;
use smallvec::SmallVec;

use crate::core::primitives::{add_millis, round_to_step};
use crate::core::{BlockId, CanvasGeometry, TimeScale};
use crate::error::TimeblockResult;

/// Original placement of one block taking part in a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragMember {
    pub id: BlockId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub track_index: usize,
}

/// Where a member lands when the gesture is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPlacement {
    pub id: BlockId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub track_index: usize,
}

/// State of one `drag_start -> drag* -> drag_end` gesture.
///
/// Intermediate moves only update `delta_*` and `delete_armed`; nothing here
/// writes durable state.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub primary: BlockId,
    pub members: SmallVec<[DragMember; 4]>,
    pub origin_x: f64,
    pub origin_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delete_armed: bool,
}

impl DragSession {
    #[must_use]
    pub fn new(
        primary: BlockId,
        members: SmallVec<[DragMember; 4]>,
        origin_x: f64,
        origin_y: f64,
    ) -> Self {
        Self {
            primary,
            members,
            origin_x,
            origin_y,
            delta_x: 0.0,
            delta_y: 0.0,
            delete_armed: false,
        }
    }

    pub fn update(&mut self, x: f64, y: f64, delete_armed: bool) {
        self.delta_x = x - self.origin_x;
        self.delta_y = y - self.origin_y;
        self.delete_armed = delete_armed;
    }

    #[must_use]
    pub fn member_ids(&self) -> Vec<BlockId> {
        self.members.iter().map(|member| member.id).collect()
    }

    #[must_use]
    pub fn contains(&self, id: BlockId) -> bool {
        self.members.iter().any(|member| member.id == id)
    }

    /// Final placements for the current deltas.
    ///
    /// Each start moves by the pixel delta converted through `scale`, then
    /// rounds to the nearest `snap_ms` multiple counted from the view start.
    /// Ends keep the original duration exactly. The vertical delta becomes a
    /// whole-row shift, clamped per member to `[0, track_count - 1]`.
    pub fn resolve(
        &self,
        scale: TimeScale,
        snap_ms: i64,
        geometry: CanvasGeometry,
        track_count: usize,
    ) -> TimeblockResult<SmallVec<[MemberPlacement; 4]>> {
        let delta_ms = scale.px_to_millis(self.delta_x)?;
        let track_delta = geometry.track_delta_for(self.delta_y);
        let last_track = track_count.saturating_sub(1) as i64;
        let snap_origin = scale.range().start;

        self.members
            .iter()
            .map(|member| {
                let duration = (member.end - member.start).num_milliseconds();
                let shifted = add_millis(member.start, delta_ms)?;
                let start = round_to_step(shifted, snap_origin, snap_ms)?;
                let end = add_millis(start, duration)?;
                let track_index = (member.track_index as i64 + track_delta).clamp(0, last_track);
                Ok(MemberPlacement {
                    id: member.id,
                    start,
                    end,
                    track_index: track_index as usize,
                })
            })
            .collect()
    }
}
