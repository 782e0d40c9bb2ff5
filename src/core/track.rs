use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TimeblockError, TimeblockResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TrackId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A named, colored swimlane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    /// `#rrggbb`.
    pub color: String,
}

impl Track {
    pub fn new(
        id: impl Into<TrackId>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> TimeblockResult<Self> {
        let color = color.into();
        parse_hex_rgb(&color)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            color,
        })
    }

    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_rgb(&self.color).unwrap_or((255, 255, 255))
    }
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_rgb(value: &str) -> TimeblockResult<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(TimeblockError::InvalidData(format!(
            "track color `{value}` must be #rrggbb"
        )));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| {
            TimeblockError::InvalidData(format!("track color `{value}` must be #rrggbb"))
        })
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[must_use]
pub fn default_tracks() -> Vec<Track> {
    [
        ("deep_work", "DEEP WORK", "#00ff9d"),
        ("meetings", "SYNCS / COMMS", "#3b82f6"),
        ("wellness", "BIO-MAINTENANCE", "#f43f5e"),
        ("learning", "R&D / STUDY", "#fbbf24"),
    ]
    .into_iter()
    .map(|(id, name, color)| Track {
        id: TrackId::from(id),
        name: name.to_owned(),
        color: color.to_owned(),
    })
    .collect()
}

/// Ordered list of active tracks. Row order is list order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackSet {
    tracks: Vec<Track>,
}

impl TrackSet {
    #[must_use]
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    #[must_use]
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    #[must_use]
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index_of(id).is_some()
    }

    /// Slug of `name` that no active track uses and `is_reserved` rejects
    /// neither.
    #[must_use]
    pub fn derive_id(&self, name: &str, is_reserved: impl Fn(&TrackId) -> bool) -> TrackId {
        let mut slug = String::with_capacity(name.len());
        for ch in name.trim().chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        let slug = slug.trim_matches('_');
        let base = if slug.is_empty() { "track" } else { slug };

        let mut candidate = TrackId::from(base);
        let mut suffix = 2;
        while self.contains(&candidate) || is_reserved(&candidate) {
            candidate = TrackId(format!("{base}_{suffix}"));
            suffix += 1;
        }
        candidate
    }

    /// Appends a track with a freshly derived id. Ids for which
    /// `is_reserved` holds are skipped.
    pub fn add(
        &mut self,
        name: &str,
        color: &str,
        is_reserved: impl Fn(&TrackId) -> bool,
    ) -> TimeblockResult<Track> {
        if name.trim().is_empty() {
            return Err(TimeblockError::InvalidData(
                "track name must not be empty".to_owned(),
            ));
        }
        let track = Track::new(self.derive_id(name, is_reserved), name.trim(), color)?;
        self.tracks.push(track.clone());
        Ok(track)
    }

    pub fn remove(&mut self, id: &TrackId) -> Option<Track> {
        let index = self.index_of(id)?;
        Some(self.tracks.remove(index))
    }

    pub fn rename(&mut self, id: &TrackId, name: &str) -> TimeblockResult<()> {
        if name.trim().is_empty() {
            return Err(TimeblockError::InvalidData(
                "track name must not be empty".to_owned(),
            ));
        }
        let track = self
            .tracks
            .iter_mut()
            .find(|track| &track.id == id)
            .ok_or_else(|| TimeblockError::UnknownTrack(id.clone()))?;
        track.name = name.trim().to_owned();
        Ok(())
    }
}
