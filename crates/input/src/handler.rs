//! Auto-repeat input handler for terminal environments.
//!
//! Held movement keys repeat through a two-state machine:
//!
//! - `Idle`: nothing held.
//! - `Repeating`: a move fired on press; it fires again once the initial delay
//!   has passed and then every repeat interval.
//!
//! The initial delay shrinks with the level: `auto_repeat_delay +
//! max(0, add_repeat_delay - 20 × level)`.
//!
//! Soft drop is tracked separately: press emits `SoftDropStart`, release emits
//! `SoftDropStop`, and the engine's own fast gravity does the repeating.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::action_for_code;
use crate::types::{
    GameAction, ADD_REPEAT_DELAY_MS, AUTO_REPEAT_DELAY_MS, AUTO_REPEAT_INTERVAL_MS,
    DEFAULT_KEY_RELEASE_TIMEOUT_MS, REPEAT_DELAY_STEP_MS,
};

/// Most actions a single poll can emit.
pub const MAX_ACTIONS_PER_POLL: usize = 32;

pub type PolledActions = ArrayVec<GameAction, MAX_ACTIONS_PER_POLL>;

/// Auto-repeat timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    /// Minimum delay before a held move starts repeating
    pub auto_repeat_delay_ms: u32,
    /// Extra delay at level 0, reduced by 20ms per level
    pub add_repeat_delay_ms: u32,
    pub auto_repeat_interval_ms: u32,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            auto_repeat_delay_ms: AUTO_REPEAT_DELAY_MS,
            add_repeat_delay_ms: ADD_REPEAT_DELAY_MS,
            auto_repeat_interval_ms: AUTO_REPEAT_INTERVAL_MS,
        }
    }
}

impl RepeatTiming {
    /// Delay between the press and the first repeat at `level`.
    pub fn initial_delay_ms(&self, level: u32) -> u32 {
        let reduction = level.saturating_mul(REPEAT_DELAY_STEP_MS);
        self.auto_repeat_delay_ms + self.add_repeat_delay_ms.saturating_sub(reduction)
    }
}

/// Repeat state of the horizontal movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatState {
    #[default]
    Idle,
    Repeating {
        action: GameAction,
        /// Monotonic time of the next repeat
        next_fire_ms: u64,
    },
}

/// Tracks held keys and turns them into repeated actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    timing: RepeatTiming,
    level: u32,
    repeat: RepeatState,
    soft_drop_held: bool,
    /// Last press of a held key, for the release timeout
    last_key_ms: u64,
    /// Zero when the terminal reports releases reliably
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_timing(RepeatTiming::default())
    }

    pub fn with_timing(timing: RepeatTiming) -> Self {
        Self {
            timing: RepeatTiming {
                auto_repeat_interval_ms: timing.auto_repeat_interval_ms.max(1),
                ..timing
            },
            level: 1,
            repeat: RepeatState::Idle,
            soft_drop_held: false,
            last_key_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn timing(&self) -> RepeatTiming {
        self.timing
    }

    pub fn state(&self) -> RepeatState {
        self.repeat
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Track the game level; applies to the next key press.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn initial_delay_ms(&self) -> u32 {
        self.timing.initial_delay_ms(self.level)
    }

    /// Handle a key press at monotonic time `now_ms`.
    ///
    /// Returns the action to apply immediately. Presses of an already held key
    /// (terminal key repeat) only refresh the release timeout.
    pub fn handle_key_press(&mut self, code: KeyCode, now_ms: u64) -> Option<GameAction> {
        let action = action_for_code(code)?;
        match action {
            GameAction::MoveLeft | GameAction::MoveRight => {
                self.last_key_ms = now_ms;
                if matches!(self.repeat, RepeatState::Repeating { action: held, .. } if held == action)
                {
                    return None;
                }
                self.repeat = RepeatState::Repeating {
                    action,
                    next_fire_ms: now_ms + u64::from(self.initial_delay_ms()),
                };
                Some(action)
            }
            GameAction::SoftDropStart => {
                self.last_key_ms = now_ms;
                if self.soft_drop_held {
                    return None;
                }
                self.soft_drop_held = true;
                Some(GameAction::SoftDropStart)
            }
            other => Some(other),
        }
    }

    /// Handle a key release. Returns `SoftDropStop` when a soft drop ends.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        match action_for_code(code)? {
            action @ (GameAction::MoveLeft | GameAction::MoveRight) => {
                if matches!(self.repeat, RepeatState::Repeating { action: held, .. } if held == action)
                {
                    self.repeat = RepeatState::Idle;
                }
                None
            }
            GameAction::SoftDropStart if self.soft_drop_held => {
                self.soft_drop_held = false;
                Some(GameAction::SoftDropStop)
            }
            _ => None,
        }
    }

    /// Emit every repeat due by `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> PolledActions {
        let mut actions = PolledActions::new();

        // Auto-release when terminal does not emit release events.
        let timeout = self.key_release_timeout_ms;
        if timeout > 0 {
            if now_ms.saturating_sub(self.last_key_ms) > u64::from(timeout) {
                self.repeat = RepeatState::Idle;
                if self.soft_drop_held {
                    self.soft_drop_held = false;
                    let _ = actions.try_push(GameAction::SoftDropStop);
                }
            }
        }

        if let RepeatState::Repeating {
            action,
            mut next_fire_ms,
        } = self.repeat
        {
            let interval = u64::from(self.timing.auto_repeat_interval_ms);
            while now_ms >= next_fire_ms {
                if actions.try_push(action).is_err() {
                    // Drop the backlog instead of replaying it later
                    next_fire_ms = now_ms + interval;
                    break;
                }
                next_fire_ms += interval;
            }
            self.repeat = RepeatState::Repeating {
                action,
                next_fire_ms,
            };
        }

        actions
    }

    /// Forget every held key.
    pub fn reset(&mut self) {
        self.repeat = RepeatState::Idle;
        self.soft_drop_held = false;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
