use indexmap::IndexSet;

use crate::core::{BlockId, CanvasRect};

/// Transient set of selected block ids, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: IndexSet<BlockId>,
}

impl Selection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: BlockId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<BlockId> {
        self.ids.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.ids.iter().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn select_only(&mut self, id: BlockId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        self.ids.extend(ids);
    }

    /// Adds `id` when absent, removes it when present.
    pub fn toggle(&mut self, id: BlockId) {
        if !self.ids.shift_remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn retain(&mut self, mut keep: impl FnMut(BlockId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    /// Ids a delete aimed at `target` removes: the whole selection when
    /// `target` is part of it, otherwise only `target`.
    #[must_use]
    pub fn resolve_delete_target(&self, target: Option<BlockId>) -> Vec<BlockId> {
        match target {
            Some(id) if !self.contains(id) => vec![id],
            _ => self.ids(),
        }
    }
}

/// In-progress rubber-band gesture in content space.
#[derive(Debug, Clone, PartialEq)]
pub struct RubberBand {
    pub origin_x: f64,
    pub origin_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    /// Selection held before the band started; kept when the band is additive.
    pub base: Vec<BlockId>,
    pub additive: bool,
}

impl RubberBand {
    #[must_use]
    pub fn new(x: f64, y: f64, base: Vec<BlockId>, additive: bool) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            current_x: x,
            current_y: y,
            base,
            additive,
        }
    }

    #[must_use]
    pub fn selection_box(&self) -> CanvasRect {
        CanvasRect::from_corners(self.origin_x, self.origin_y, self.current_x, self.current_y)
    }

    /// A release below `threshold_px` displacement on both axes is a click.
    #[must_use]
    pub fn is_click(&self, threshold_px: f64) -> bool {
        let bounds = self.selection_box();
        bounds.width < threshold_px && bounds.height < threshold_px
    }

    /// Selection after this band: the hits, plus the base when additive.
    #[must_use]
    pub fn merged_selection(&self, hits: Vec<BlockId>) -> Vec<BlockId> {
        if !self.additive {
            return hits;
        }
        let mut merged: IndexSet<BlockId> = self.base.iter().copied().collect();
        merged.extend(hits);
        merged.into_iter().collect()
    }
}
