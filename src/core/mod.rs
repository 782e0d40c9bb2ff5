pub mod block;
pub mod block_store;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod month_grid;
pub mod primitives;
pub mod time_scale;
pub mod track;
pub mod types;
pub mod view_mode;

pub use block::{Block, BlockDraft, BlockId, BlockPatch, LinkKind};
pub use block_store::BlockStore;
pub use geometry::CanvasGeometry;
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryEntry};
pub use layout::{BlockLayout, hit_test, intersecting, layout_blocks};
pub use month_grid::{MonthDay, MonthEntry, MonthGrid};
pub use time_scale::TimeScale;
pub use track::{Track, TrackId, TrackSet, default_tracks};
pub use types::{CanvasRect, PointerPosition, SelectionBox, Viewport};
pub use view_mode::{TickInterval, ViewMode, ViewModeConfig, ViewRange};
