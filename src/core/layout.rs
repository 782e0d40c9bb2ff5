use crate::core::block::BlockId;
use crate::core::block_store::BlockStore;
use crate::core::geometry::CanvasGeometry;
use crate::core::time_scale::TimeScale;
use crate::core::track::TrackSet;
use crate::core::types::CanvasRect;

/// On-screen placement of one visible block in content space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockLayout {
    pub id: BlockId,
    pub track_index: usize,
    pub rect: CanvasRect,
}

/// Lays out every block whose track is active, in store order.
///
/// Blocks referencing a removed track are skipped: they stay in the store but
/// are neither drawn nor hit-testable.
#[must_use]
pub fn layout_blocks(
    store: &BlockStore,
    tracks: &TrackSet,
    scale: TimeScale,
    geometry: CanvasGeometry,
) -> Vec<BlockLayout> {
    store
        .iter()
        .filter_map(|block| {
            let track_index = tracks.index_of(&block.track_id)?;
            let x_start = scale.date_to_px(block.start);
            let x_end = scale.date_to_px(block.end);
            Some(BlockLayout {
                id: block.id,
                track_index,
                rect: geometry.block_rect(x_start, x_end, track_index),
            })
        })
        .collect()
}

/// Topmost block under a content-space point. Later blocks paint on top.
#[must_use]
pub fn hit_test(layouts: &[BlockLayout], x: f64, y: f64) -> Option<BlockId> {
    layouts
        .iter()
        .rev()
        .find(|layout| layout.rect.contains(x, y))
        .map(|layout| layout.id)
}

/// Ids of blocks whose rectangle intersects `selection_box`.
#[must_use]
pub fn intersecting(layouts: &[BlockLayout], selection_box: CanvasRect) -> Vec<BlockId> {
    layouts
        .iter()
        .filter(|layout| selection_box.intersects(layout.rect))
        .map(|layout| layout.id)
        .collect()
}
