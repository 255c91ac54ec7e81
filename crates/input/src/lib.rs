//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework beyond `crossterm` key codes. It
//! maps key events into [`crate::types::GameAction`] and provides an auto-repeat
//! handler for held movement keys, suitable for terminals with or without
//! key-release events.
//!
//! Time is always passed in by the caller as monotonic milliseconds, so the
//! handler never reads a clock and can be driven entirely from tests.

pub mod handler;
pub mod map;

pub use tui_blocks_types as types;

pub use handler::{InputHandler, RepeatState, RepeatTiming};
pub use map::{action_for_code, handle_key_event, should_quit};
