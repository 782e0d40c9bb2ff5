//! timeblock-rs: headless engine for an interactive time-block scheduling
//! canvas.
//!
//! The crate maps wall-clock time onto a horizontally scrolled pixel axis at
//! DAY, WEEK and MONTH resolutions, stores blocks on tracks with snapshot
//! undo/redo, and turns pointer and keyboard input into selection, drag and
//! delete gestures. Drawing is delegated to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{SchedulerConfig, SchedulerEngine};
pub use error::{TimeblockError, TimeblockResult};
