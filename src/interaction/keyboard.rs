use serde::{Deserialize, Serialize};

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    #[must_use]
    pub fn nudge_direction(self) -> Option<i64> {
        match self {
            Self::ArrowLeft => Some(-1),
            Self::ArrowRight => Some(1),
            Self::Delete | Self::Backspace => None,
        }
    }
}

/// Tuning of held-arrow movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyboardNudgeConfig {
    /// Minutes accumulated per frame at factor 1 when blocks are selected.
    pub minutes_per_frame: f64,
    /// Pixels scrolled per frame at factor 1 when nothing is selected.
    pub scroll_px_per_frame: f64,
}

impl Default for KeyboardNudgeConfig {
    fn default() -> Self {
        Self {
            minutes_per_frame: 0.3,
            scroll_px_per_frame: 6.0,
        }
    }
}

/// Speed multiplier for how long the arrow has been held.
#[must_use]
pub fn acceleration_factor(held_ms: u64) -> f64 {
    match held_ms {
        ms if ms > 2_000 => 8.0,
        ms if ms > 1_000 => 4.0,
        ms if ms > 300 => 2.0,
        _ => 1.0,
    }
}

/// Result of one animation frame while an arrow key is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NudgeStep {
    /// Whole minutes added to the pending selection offset this frame.
    Minutes(i64),
    ScrollPx(f64),
}

/// Held-arrow state. Block movement accumulates into `pending_minutes`,
/// which stays a preview until the key is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardNudge {
    pub direction: i64,
    pub started_at_ms: u64,
    accumulator: f64,
    pub pending_minutes: i64,
}

impl KeyboardNudge {
    #[must_use]
    pub fn new(direction: i64, started_at_ms: u64) -> Self {
        Self {
            direction,
            started_at_ms,
            accumulator: 0.0,
            pending_minutes: 0,
        }
    }

    pub fn step(
        &mut self,
        now_ms: u64,
        moves_blocks: bool,
        config: KeyboardNudgeConfig,
    ) -> NudgeStep {
        let factor = acceleration_factor(now_ms.saturating_sub(self.started_at_ms));
        if !moves_blocks {
            return NudgeStep::ScrollPx(config.scroll_px_per_frame * factor * self.direction as f64);
        }

        self.accumulator += config.minutes_per_frame * factor;
        let whole = self.accumulator.floor();
        self.accumulator -= whole;
        let minutes = whole as i64 * self.direction;
        self.pending_minutes += minutes;
        NudgeStep::Minutes(minutes)
    }
}
