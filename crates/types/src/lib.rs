//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond small conversions, so they
//! can be shared by the engine, the input layer, the score store and any renderer.
//!
//! # Field Dimensions
//!
//! The field size is a construction parameter of the engine. The defaults match
//! the classic playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn column**: `width / 2 - 2`, row 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 16 | Game loop period (~60 FPS) |
//! | `BASE_FALL_MS` | 1000 | Fall interval at level 1 |
//! | `FAST_FALL_MS` | 50 | Fall interval while soft drop is held |
//! | `MIN_FALL_MS` | 100 | Floor for the level-derived fall interval |
//! | `FALL_STEP_MS` | 100 | Interval reduction per level |
//!
//! # Auto-Repeat Timing
//!
//! - `AUTO_REPEAT_DELAY_MS`: 100ms minimum delay before a held move repeats
//! - `ADD_REPEAT_DELAY_MS`: 200ms extra delay at level 0, shrinking 20ms per level
//! - `AUTO_REPEAT_INTERVAL_MS`: 50ms between repeats
//! - `DEFAULT_KEY_RELEASE_TIMEOUT_MS`: 150ms of quiet after which a held key counts as released
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{GameAction, PieceKind, Rotation};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Rotation indices wrap modulo 4
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! // Parse an input action
//! let action = GameAction::from_str("softDropStart").unwrap();
//! assert_eq!(action, GameAction::SoftDropStart);
//! ```

use serde::{Deserialize, Serialize};

/// Default field width in cells (10 columns)
pub const DEFAULT_FIELD_WIDTH: u16 = 10;

/// Default field height in cells (20 rows)
pub const DEFAULT_FIELD_HEIGHT: u16 = 20;

/// Default game loop period in milliseconds (16ms ≈ 60 FPS)
pub const DEFAULT_TICK_MS: u32 = 16;

/// Fall interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Fall interval while soft drop is held
pub const FAST_FALL_MS: u32 = 50;

/// Lowest interval the level curve may reach
pub const MIN_FALL_MS: u32 = 100;

/// Interval reduction for every level above 1
pub const FALL_STEP_MS: u32 = 100;

/// Lines required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per hard-dropped row
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by rows cleared at once.
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Minimum auto-repeat delay in milliseconds.
pub const AUTO_REPEAT_DELAY_MS: u32 = 100;

/// Level-dependent extra auto-repeat delay at level 0.
pub const ADD_REPEAT_DELAY_MS: u32 = 200;

/// Extra delay removed per level.
pub const REPEAT_DELAY_STEP_MS: u32 = 20;

/// Interval between auto-repeated actions.
pub const AUTO_REPEAT_INTERVAL_MS: u32 = 50;

/// Quiet time after which a held key is treated as released.
///
/// Most terminals never report key releases, so without this a single tap
/// would keep repeating. Zero disables the timeout.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Kind substituted whenever an out-of-range index shows up.
    pub const FALLBACK: PieceKind = PieceKind::I;

    /// Look up a kind by catalog index.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(2), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog index (0..7)
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation state of a piece, always taken modulo 4.
///
/// - **North**: Spawn orientation (0 quarter turns)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Build a rotation from a quarter-turn count, wrapping modulo 4.
    pub fn from_index(quarter_turns: usize) -> Self {
        match quarter_turns % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Number of clockwise quarter turns from spawn orientation.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Integer grid position. `y` grows downwards and may be negative above the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A single field cell.
///
/// Occupancy and color live in one value so they can never disagree: an occupied
/// cell always carries a non-zero color id, an empty cell always carries 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub occupied: bool,
    pub color_id: u8,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        color_id: 0,
    };

    /// Occupied cell with the given color. Color 0 means "no color" and yields an
    /// empty cell.
    pub const fn filled(color_id: u8) -> Self {
        if color_id == 0 {
            Self::EMPTY
        } else {
            Cell {
                occupied: true,
                color_id,
            }
        }
    }
}

/// Discrete input actions understood by the engine.
///
/// These are produced by the input layer (keyboard, scripts, tests) and applied
/// with `Engine::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Start using the fast fall interval
    SoftDropStart,
    /// Return to the level fall interval
    SoftDropStop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase (case-insensitive) name
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("HARDDROP"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Stopped,
    Running,
    Paused,
    GameOver,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Stopped => "stopped",
            EngineState::Running => "running",
            EngineState::Paused => "paused",
            EngineState::GameOver => "game_over",
        }
    }
}

/// Per-game statistics.
///
/// `current_combo` is carried for consumers that display it but no rule
/// increments it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub current_combo: u32,
    pub total_pieces: u32,
    /// Wall-clock start of the game, seconds since the Unix epoch.
    pub start_time: Option<u64>,
    /// Seconds spent in the running state.
    pub duration_seconds: u64,
}

impl GameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            current_combo: 0,
            total_pieces: 0,
            start_time: None,
            duration_seconds: 0,
        }
    }
}

/// Change notification pushed by the engine and drained by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Field cells changed (lock, line clear, reset).
    FieldChanged,
    /// Current piece moved, rotated, or was replaced.
    PieceChanged,
    /// Next-piece preview changed.
    NextChanged,
    /// Held piece changed.
    HoldChanged,
    /// Score, level, line or piece counters changed.
    StatsUpdated,
    /// Level went up to the given value.
    LevelUp(u32),
    /// Engine entered the given state.
    StateChanged(EngineState),
    /// A game ended; carries its final stats. Follows `StateChanged(GameOver)`.
    GameEnded(GameStats),
}
