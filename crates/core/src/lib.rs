//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and the simulation state machine. It has no
//! dependency on terminals, files or clocks beyond a wall-clock stamp taken
//! when a game starts, so it runs the same in a terminal, a GUI or headless.
//!
//! # Module Structure
//!
//! - [`field`]: occupancy grid with bounds-safe access and line removal
//! - [`shapes`]: the seven piece definitions and pattern rotation
//! - [`piece`]: a positioned, rotated instance of a shape
//! - [`sequencer`]: 7-bag and uniform piece generation
//! - [`scoring`]: line clear points, levels and fall speed
//! - [`config`]: engine construction parameters
//! - [`engine`]: the game state machine
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Game Rules
//!
//! - **Gravity**: one row per fall interval; 1000ms at level 1, 100ms faster per
//!   level down to 100ms. Soft drop switches to 50ms.
//! - **Rotation**: in place inside the shape's box, rejected when blocked.
//! - **Locking**: immediate when gravity cannot move the piece, or on hard drop.
//! - **Hold**: once per piece; a swapped-in piece may shift up to 2 columns.
//! - **Scoring**: 100/300/500/800 × level for 1-4 lines, 2 points per hard-drop row.
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{Engine, EngineConfig};
//! use tui_blocks_types::{EngineState, GameAction};
//!
//! let mut engine = Engine::with_seed(EngineConfig::default(), 12345);
//! engine.start();
//!
//! engine.apply_action(GameAction::MoveRight);
//! engine.apply_action(GameAction::RotateCw);
//! engine.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(engine.state(), EngineState::Running);
//! assert!(engine.stats().score > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`Engine::tick`](engine::Engine::tick) every frame with the elapsed
//! milliseconds. Large steps move the piece at most one row.

pub mod config;
pub mod engine;
pub mod field;
pub mod piece;
pub mod scoring;
pub mod sequencer;
pub mod shapes;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::Engine;
pub use field::Field;
pub use piece::{BoundingBox, Piece, PieceCells};
pub use sequencer::{Randomizer, Sequencer};
pub use shapes::{get_shape, rotated_pattern, Shape};
pub use snapshot::EngineSnapshot;
