use thiserror::Error;

use crate::core::{BlockId, TrackId};

pub type TimeblockResult<T> = Result<T, TimeblockError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeblockError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("end time must be after start time (start={start}, end={end})")]
    InvalidTimeRange { start: String, end: String },

    #[error("block title must not be empty")]
    MissingTitle,

    #[error("unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("unknown track: {0}")]
    UnknownTrack(TrackId),

    #[error("plugin with id `{0}` is already registered")]
    DuplicatePlugin(String),

    #[error("no block form is open")]
    FormNotOpen,
}
