//! tui-blocks (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` and adds the pieces the terminal
//! binary needs on top of them: the configuration file, the text view and the
//! terminal backend.

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_scores as scores;
pub use tui_blocks_types as types;

pub mod config;
pub mod terminal;
pub mod view;

pub use config::GameConfig;
