//! Engine snapshots
//!
//! An [`EngineSnapshot`] copies the field, pieces, state and stats out of the
//! engine so a renderer never borrows it. `Engine::snapshot_into` refills an
//! existing snapshot in place and reuses its cell buffer.

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::{Cell, EngineState, GameStats, PieceKind};

/// Read-only copy of everything a renderer or recorder needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major field cells (`y * width + x`)
    pub cells: Vec<Cell>,
    pub current: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub state: EngineState,
    pub stats: GameStats,
    pub fall_progress: f32,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            current: None,
            ghost: None,
            next: PieceKind::FALLBACK,
            held: None,
            can_hold: true,
            state: EngineState::Stopped,
            stats: GameStats::default(),
            fall_progress: 0.0,
        }
    }
}

impl EngineSnapshot {
    pub fn clear(&mut self) {
        self.cells.clear();
        self.current = None;
        self.ghost = None;
        self.held = None;
        self.can_hold = true;
        self.state = EngineState::Stopped;
        self.stats = GameStats::default();
        self.fall_progress = 0.0;
    }

    /// Locked cell at (x, y), `None` when out of range
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        self.cells
            .get(y as usize * usize::from(self.width) + x as usize)
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.state == EngineState::Running
    }
}
