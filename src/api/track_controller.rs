use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Track, TrackId};
use crate::error::{TimeblockError, TimeblockResult};
use crate::extensions::SchedulerEvent;
use crate::render::Renderer;

use super::SchedulerEngine;

/// First phase of a track removal.
///
/// Hosts show `orphaned_blocks` to the user and pass the request back to
/// `confirm_track_removal` only after confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRemovalRequest {
    pub track: Track,
    pub orphaned_blocks: usize,
}

impl<R: Renderer> SchedulerEngine<R> {
    /// Appends a track with an id derived from `name`.
    ///
    /// Ids still referenced by hidden blocks of a removed track are never
    /// handed out again, so those blocks stay hidden.
    pub fn add_track(&mut self, name: &str, color: &str) -> TimeblockResult<Track> {
        let model = &mut self.core.model;
        let blocks = &model.blocks;
        let track = model
            .tracks
            .add(name, color, |id| blocks.count_on_track(id) > 0)?;
        self.core.model.commit();
        let index = self.core.model.tracks.len() - 1;
        debug!(track = %track.id, index, "track added");
        self.emit_event(SchedulerEvent::TrackAdded { index });
        Ok(track)
    }

    pub fn rename_track(&mut self, id: &TrackId, name: &str) -> TimeblockResult<()> {
        self.core.model.tracks.rename(id, name)?;
        self.core.model.commit();
        Ok(())
    }

    /// Reports what removing `id` would orphan, without changing anything.
    pub fn begin_track_removal(&self, id: &TrackId) -> TimeblockResult<TrackRemovalRequest> {
        let track = self
            .core
            .model
            .tracks
            .get(id)
            .cloned()
            .ok_or_else(|| TimeblockError::UnknownTrack(id.clone()))?;
        let orphaned_blocks = self.core.model.blocks.count_on_track(id);
        Ok(TrackRemovalRequest {
            track,
            orphaned_blocks,
        })
    }

    /// Removes the track. Its blocks stay in the store but are hidden until
    /// the track comes back through undo.
    pub fn confirm_track_removal(&mut self, request: TrackRemovalRequest) -> TimeblockResult<Track> {
        let id = request.track.id;
        let removed = self
            .core
            .model
            .tracks
            .remove(&id)
            .ok_or_else(|| TimeblockError::UnknownTrack(id.clone()))?;
        self.core.model.commit();
        self.prune_transient_state();

        let orphaned_blocks = self.core.model.blocks.count_on_track(&id);
        info!(track = %id, orphaned_blocks, "track removed");
        self.emit_event(SchedulerEvent::TrackRemoved { orphaned_blocks });
        Ok(removed)
    }

    /// Number of stored blocks per active track, in track order.
    #[must_use]
    pub fn track_block_counts(&self) -> Vec<(TrackId, usize)> {
        self.core
            .model
            .tracks
            .iter()
            .map(|track| {
                (
                    track.id.clone(),
                    self.core.model.blocks.count_on_track(&track.id),
                )
            })
            .collect()
    }
}
