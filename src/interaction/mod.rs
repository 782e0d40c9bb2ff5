mod drag;
mod keyboard;
mod selection;

pub use drag::{DragMember, DragSession, MemberPlacement};
pub use keyboard::{
    Key, KeyboardNudge, KeyboardNudgeConfig, NudgeStep, acceleration_factor,
};
pub use selection::{RubberBand, Selection};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{BlockId, SelectionBox};

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        meta: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        meta: false,
    };

    /// Additive selection is requested by shift or meta.
    #[must_use]
    pub fn additive(self) -> bool {
        self.shift || self.meta
    }
}

/// Coarse phase of the current pointer/keyboard interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// Pointer down, not yet past the click threshold.
    Pressed,
    RubberBand,
    DraggingBlocks,
    KeyboardNudge,
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    Canvas,
    Block(BlockId),
    MonthDay(NaiveDate),
}

/// Pointer-down that has not yet turned into a click or a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPress {
    pub target: PressTarget,
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerGesture {
    #[default]
    Idle,
    Pressed(PendingPress),
    RubberBand(RubberBand),
    Dragging(DragSession),
}

/// Transient UI state. Nothing in here is ever written to history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    gesture: PointerGesture,
    selection: Selection,
    detail_block: Option<BlockId>,
    nudge: Option<KeyboardNudge>,
    nudge_config: KeyboardNudgeConfig,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.nudge.is_some() {
            return InteractionMode::KeyboardNudge;
        }
        match self.gesture {
            PointerGesture::Idle => InteractionMode::Idle,
            PointerGesture::Pressed(_) => InteractionMode::Pressed,
            PointerGesture::RubberBand(_) => InteractionMode::RubberBand,
            PointerGesture::Dragging(_) => InteractionMode::DraggingBlocks,
        }
    }

    #[must_use]
    pub fn gesture(&self) -> &PointerGesture {
        &self.gesture
    }

    pub fn set_gesture(&mut self, gesture: PointerGesture) {
        self.gesture = gesture;
    }

    /// Ends the current gesture and hands it back.
    pub fn take_gesture(&mut self) -> PointerGesture {
        std::mem::take(&mut self.gesture)
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    #[must_use]
    pub fn selection_box(&self) -> Option<SelectionBox> {
        match &self.gesture {
            PointerGesture::RubberBand(band) => Some(band.selection_box()),
            _ => None,
        }
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        match &self.gesture {
            PointerGesture::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Block whose details were opened by a plain click.
    #[must_use]
    pub fn detail_block(&self) -> Option<BlockId> {
        self.detail_block
    }

    pub fn set_detail_block(&mut self, id: Option<BlockId>) {
        self.detail_block = id;
    }

    #[must_use]
    pub fn nudge(&self) -> Option<&KeyboardNudge> {
        self.nudge.as_ref()
    }

    pub fn nudge_mut(&mut self) -> Option<&mut KeyboardNudge> {
        self.nudge.as_mut()
    }

    pub fn start_nudge(&mut self, direction: i64, now_ms: u64) {
        self.nudge = Some(KeyboardNudge::new(direction, now_ms));
    }

    pub fn take_nudge(&mut self) -> Option<KeyboardNudge> {
        self.nudge.take()
    }

    #[must_use]
    pub fn nudge_config(&self) -> KeyboardNudgeConfig {
        self.nudge_config
    }

    pub fn set_nudge_config(&mut self, config: KeyboardNudgeConfig) {
        self.nudge_config = config;
    }

    /// Drops ids that no longer exist, e.g. after undo.
    pub fn prune(&mut self, exists: impl Fn(BlockId) -> bool) {
        self.selection.retain(&exists);
        if self.detail_block.is_some_and(|id| !exists(id)) {
            self.detail_block = None;
        }
    }
}
