use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::TrackId;
use crate::core::primitives::millis_between;
use crate::error::{TimeblockError, TimeblockResult};

/// Opaque unique block key. Never reused within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of external object a block may be tagged with. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkKind {
    #[default]
    None,
    Project,
    Engine,
}

/// A scheduled entry on one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub track_id: TrackId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_type: Option<LinkKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_id: Option<String>,
}

impl Block {
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        millis_between(self.start, self.end)
    }

    /// Checks the `end > start` invariant.
    pub fn validate_times(&self) -> TimeblockResult<()> {
        validate_time_range(self.start, self.end)
    }

    #[must_use]
    pub fn link(&self) -> Option<(LinkKind, &str)> {
        match (self.linked_type, self.linked_id.as_deref()) {
            (Some(LinkKind::None) | None, _) | (_, None) => None,
            (Some(kind), Some(id)) => Some((kind, id)),
        }
    }
}

pub fn validate_time_range(start: NaiveDateTime, end: NaiveDateTime) -> TimeblockResult<()> {
    if end <= start {
        return Err(TimeblockError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// User-supplied fields for a new block; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDraft {
    pub track_id: TrackId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub linked_type: LinkKind,
    #[serde(default)]
    pub linked_id: String,
}

impl BlockDraft {
    #[must_use]
    pub fn new(
        track_id: impl Into<TrackId>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        title: impl Into<String>,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            start,
            end,
            title: title.into(),
            desc: String::new(),
            linked_type: LinkKind::None,
            linked_id: String::new(),
        }
    }

    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    #[must_use]
    pub fn with_link(mut self, kind: LinkKind, id: impl Into<String>) -> Self {
        self.linked_type = kind;
        self.linked_id = id.into();
        self
    }

    /// Builds the block a save would commit, enforcing title and time rules.
    pub fn into_block(self, id: BlockId) -> TimeblockResult<Block> {
        if self.title.trim().is_empty() {
            return Err(TimeblockError::MissingTitle);
        }
        validate_time_range(self.start, self.end)?;
        let (linked_type, linked_id) = normalize_link(self.linked_type, self.linked_id);
        Ok(Block {
            id,
            track_id: self.track_id,
            start: self.start,
            end: self.end,
            title: self.title,
            desc: self.desc,
            linked_type,
            linked_id,
        })
    }
}

impl From<&Block> for BlockDraft {
    fn from(block: &Block) -> Self {
        Self {
            track_id: block.track_id.clone(),
            start: block.start,
            end: block.end,
            title: block.title.clone(),
            desc: block.desc.clone(),
            linked_type: block.linked_type.unwrap_or_default(),
            linked_id: block.linked_id.clone().unwrap_or_default(),
        }
    }
}

/// Full replacement of every editable field, as saved from the edit form.
impl From<BlockDraft> for BlockPatch {
    fn from(draft: BlockDraft) -> Self {
        Self {
            track_id: Some(draft.track_id),
            start: Some(draft.start),
            end: Some(draft.end),
            title: Some(draft.title),
            desc: Some(draft.desc),
            link: Some((draft.linked_type, draft.linked_id)),
        }
    }
}

/// `NONE` clears the id; an empty id is stored as absent.
fn normalize_link(kind: LinkKind, id: String) -> (Option<LinkKind>, Option<String>) {
    match kind {
        LinkKind::None => (None, None),
        kind if id.is_empty() => (Some(kind), None),
        kind => (Some(kind), Some(id)),
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    pub track_id: Option<TrackId>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub link: Option<(LinkKind, String)>,
}

impl BlockPatch {
    #[must_use]
    pub fn times(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_track(mut self, track_id: impl Into<TrackId>) -> Self {
        self.track_id = Some(track_id.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the patched copy without touching `block`.
    ///
    /// The result is validated, so a patch can never produce `end <= start`.
    pub fn apply_to(&self, block: &Block) -> TimeblockResult<Block> {
        let mut next = block.clone();
        if let Some(track_id) = &self.track_id {
            next.track_id = track_id.clone();
        }
        if let Some(start) = self.start {
            next.start = start;
        }
        if let Some(end) = self.end {
            next.end = end;
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TimeblockError::MissingTitle);
            }
            next.title = title.clone();
        }
        if let Some(desc) = &self.desc {
            next.desc = desc.clone();
        }
        if let Some((kind, id)) = &self.link {
            let (linked_type, linked_id) = normalize_link(*kind, id.clone());
            next.linked_type = linked_type;
            next.linked_id = linked_id;
        }
        next.validate_times()?;
        Ok(next)
    }
}
