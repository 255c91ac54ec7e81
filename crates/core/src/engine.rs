//! Engine module - the game state machine
//!
//! This module ties together the field, pieces, sequencer and scoring. It
//! handles gravity timing, piece movement and rotation, locking, line clears,
//! hold, ghost projection and the game lifecycle:
//!
//! ```text
//! Stopped --start--> Running --pause--> Paused --resume--> Running
//!    ^                  |                                     |
//!    +------end---------+---- blocked spawn / hold --> GameOver
//! ```
//!
//! The engine is single-threaded and synchronous. Gravity is driven by
//! [`Engine::tick`] with the elapsed milliseconds since the previous tick; input
//! actions are applied between ticks on the same thread. Every change is
//! reported once on an outbound event queue drained with
//! [`Engine::drain_events`].
//!
//! Calls made in the wrong state are ignored and reported as `false`/`None`;
//! nothing here returns an error.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::EngineConfig;
use crate::field::Field;
use crate::piece::Piece;
use crate::scoring::{fall_interval_ms, hard_drop_points, level_for_lines, line_clear_points};
use crate::sequencer::Sequencer;
use crate::snapshot::EngineSnapshot;
use crate::types::{EngineEvent, EngineState, GameAction, GameStats, PieceKind};

/// Oldest events are dropped past this many undrained entries.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Horizontal offsets tried when a swapped-in held piece does not fit at spawn.
const HOLD_SWAP_OFFSETS: std::ops::RangeInclusive<i32> = -2..=2;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    field: Field,
    sequencer: Sequencer,
    state: EngineState,
    current: Option<Piece>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    stats: GameStats,
    /// Fraction of a row the current piece has fallen (0.0 - 1.0)
    fall_progress: f32,
    fast_drop: bool,
    /// Level-derived fall interval
    fall_interval_ms: u32,
    /// Time spent running in the current game
    running_ms: u64,
    events: VecDeque<EngineEvent>,
}

impl Engine {
    /// Create an engine whose sequencer is seeded from OS entropy
    pub fn new(config: EngineConfig) -> Self {
        let config = config.normalized();
        Self::with_sequencer(config, Sequencer::from_entropy(config.randomizer))
    }

    /// Create an engine with a deterministic piece sequence
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        let config = config.normalized();
        Self::with_sequencer(config, Sequencer::new(config.randomizer, seed))
    }

    fn with_sequencer(config: EngineConfig, mut sequencer: Sequencer) -> Self {
        let next = sequencer.next_kind();
        Self {
            config,
            field: Field::new(config.width, config.height),
            sequencer,
            state: EngineState::Stopped,
            current: None,
            next,
            held: None,
            can_hold: true,
            stats: GameStats::default(),
            fall_progress: 0.0,
            fast_drop: false,
            fall_interval_ms: config.base_fall_ms,
            running_ms: 0,
            events: VecDeque::new(),
        }
    }

    // ---- queries ----

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn fall_progress(&self) -> f32 {
        self.fall_progress
    }

    pub fn is_fast_dropping(&self) -> bool {
        self.fast_drop
    }

    /// Fall interval currently in effect (fast while soft drop is held)
    pub fn current_fall_interval_ms(&self) -> u32 {
        if self.fast_drop {
            self.config.fast_fall_ms
        } else {
            self.fall_interval_ms
        }
    }

    // ---- events ----

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state != state {
            self.state = state;
            self.push_event(EngineEvent::StateChanged(state));
            if state == EngineState::GameOver {
                self.push_event(EngineEvent::GameEnded(self.stats));
            }
        }
    }

    // ---- lifecycle ----

    /// Start a new game. No-op while already running.
    pub fn start(&mut self) -> bool {
        if self.state == EngineState::Running {
            return false;
        }

        self.set_state(EngineState::Running);

        self.stats.reset();
        self.stats.start_time = unix_now_secs();
        self.running_ms = 0;
        self.field.clear();
        self.can_hold = true;
        self.held = None;
        self.fall_progress = 0.0;
        self.fast_drop = false;
        self.fall_interval_ms = self.config.base_fall_ms;

        self.sequencer.reset();
        self.next = self.sequencer.next_kind();

        self.push_event(EngineEvent::HoldChanged);
        self.push_event(EngineEvent::FieldChanged);
        self.push_event(EngineEvent::StatsUpdated);

        self.spawn_piece();
        true
    }

    /// Freeze gravity. Fall progress is kept as is.
    pub fn pause(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.set_state(EngineState::Paused);
        true
    }

    /// Continue from the exact fall progress reached before pausing.
    pub fn resume(&mut self) -> bool {
        if self.state != EngineState::Paused {
            return false;
        }
        self.set_state(EngineState::Running);
        true
    }

    /// Stop the game from any state. No-op when already stopped.
    pub fn end(&mut self) -> bool {
        if self.state == EngineState::Stopped {
            return false;
        }
        self.set_state(EngineState::Stopped);
        true
    }

    /// `end` followed by `start`
    pub fn restart(&mut self) {
        self.end();
        self.start();
    }

    // ---- gravity ----

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Returns true when the piece moved down or locked during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != EngineState::Running {
            return false;
        }

        self.running_ms += u64::from(elapsed_ms);
        self.stats.duration_seconds = self.running_ms / 1000;

        let Some(current) = self.current else {
            return false;
        };

        let interval = self.current_fall_interval_ms();
        self.fall_progress += elapsed_ms as f32 / interval as f32;
        if self.fall_progress < 1.0 {
            return false;
        }

        self.fall_progress = 0.0;
        let candidate = current.moved(0, 1);
        if self.is_valid_position(&candidate) {
            self.current = Some(candidate);
            self.push_event(EngineEvent::PieceChanged);
        } else {
            self.lock_current_piece();
        }
        true
    }

    // ---- movement ----

    /// Replace the current piece with `transform(current)` if the result fits.
    fn try_transform(&mut self, transform: impl FnOnce(Piece) -> Piece) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let candidate = transform(current);
        if !self.is_valid_position(&candidate) {
            return false;
        }

        self.current = Some(candidate);
        self.push_event(EngineEvent::PieceChanged);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_transform(|p| p.moved(-1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_transform(|p| p.moved(1, 0))
    }

    /// Rotate clockwise in place. Blocked rotations are rejected (no wall kicks).
    pub fn rotate_cw(&mut self) -> bool {
        self.try_transform(Piece::rotated_cw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_transform(Piece::rotated_ccw)
    }

    /// Switch gravity to the fast interval
    pub fn soft_drop(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.fast_drop = true;
        true
    }

    pub fn stop_soft_drop(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.fast_drop = false;
        true
    }

    /// Rows the piece can fall before it would collide
    fn drop_distance(&self, piece: &Piece) -> u32 {
        let mut distance: u32 = 0;
        while self.is_valid_position(&piece.moved(0, distance as i32 + 1)) {
            distance += 1;
        }
        distance
    }

    /// Drop the current piece as far as it goes and lock it.
    ///
    /// Returns the distance dropped, or `None` when not running.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if self.state != EngineState::Running {
            return None;
        }
        let current = self.current?;

        let distance = self.drop_distance(&current);
        if distance > 0 {
            self.current = Some(current.moved(0, distance as i32));
            self.stats.score = self.stats.score.saturating_add(hard_drop_points(distance));
            self.fall_progress = 0.0;
            self.push_event(EngineEvent::PieceChanged);
            self.push_event(EngineEvent::StatsUpdated);
        }

        // Lock immediately, even when the piece did not move
        self.lock_current_piece();
        Some(distance)
    }

    /// Stash or swap the current piece. Allowed once per piece.
    pub fn hold(&mut self) -> bool {
        if self.state != EngineState::Running || !self.config.hold_enabled || !self.can_hold {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        match self.held {
            None => {
                self.held = Some(current.kind);
                self.push_event(EngineEvent::HoldChanged);
                if !self.spawn_piece() {
                    return false;
                }
            }
            Some(held_kind) => {
                self.held = Some(current.kind);
                self.push_event(EngineEvent::HoldChanged);

                let spawn = Piece::spawned(held_kind, self.config.width);
                let placed = std::iter::once(0)
                    .chain(HOLD_SWAP_OFFSETS)
                    .map(|dx| spawn.moved(dx, 0))
                    .find(|candidate| self.is_valid_position(candidate));

                match placed {
                    Some(piece) => {
                        self.current = Some(piece);
                        self.push_event(EngineEvent::PieceChanged);
                    }
                    None => {
                        self.current = Some(spawn);
                        self.push_event(EngineEvent::PieceChanged);
                        self.set_state(EngineState::GameOver);
                        return false;
                    }
                }
            }
        }

        self.can_hold = false;
        self.fall_progress = 0.0;
        true
    }

    // ---- locking ----

    /// Spawn the queued next piece at the top of the field.
    ///
    /// If any of its in-field cells is already occupied the game is over.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::spawned(self.next, self.config.width);
        self.next = self.sequencer.next_kind();
        self.current = Some(piece);
        self.push_event(EngineEvent::PieceChanged);
        self.push_event(EngineEvent::NextChanged);

        let blocked = piece
            .occupied_cells()
            .iter()
            .any(|c| self.field.in_bounds(c.x, c.y) && !self.field.is_cell_empty(c.x, c.y));
        if blocked {
            self.set_state(EngineState::GameOver);
            return false;
        }

        self.can_hold = true;
        self.fall_progress = 0.0;
        self.fast_drop = false;
        self.stats.total_pieces += 1;
        self.push_event(EngineEvent::StatsUpdated);
        true
    }

    /// Write the current piece into the field, clear lines, spawn the next piece.
    ///
    /// Returns the number of lines cleared.
    pub fn lock_current_piece(&mut self) -> u32 {
        if self.state != EngineState::Running {
            return 0;
        }
        let Some(piece) = self.current.take() else {
            return 0;
        };

        let color_id = piece.color_id();
        for cell in piece.occupied_cells() {
            // Cells still above the field are dropped
            self.field.set_cell(cell.x, cell.y, color_id);
        }

        let cleared = self.clear_completed_lines();
        if cleared == 0 {
            self.push_event(EngineEvent::FieldChanged);
        }

        self.spawn_piece();

        self.fall_progress = 0.0;
        self.fast_drop = false;
        cleared
    }

    /// Remove complete rows and score them. Returns 0 when nothing cleared.
    pub fn clear_completed_lines(&mut self) -> u32 {
        let complete = self.field.find_complete_lines();
        if complete.is_empty() {
            return 0;
        }

        let cleared = self.field.remove_lines(&complete);
        self.update_stats_for_clear(cleared);
        self.push_event(EngineEvent::FieldChanged);
        cleared as u32
    }

    fn update_stats_for_clear(&mut self, cleared: usize) {
        self.stats.lines_cleared += cleared as u32;

        // Points use the level the clear happened on
        let points = line_clear_points(cleared, self.stats.level);
        self.stats.score = self.stats.score.saturating_add(points);

        let new_level = level_for_lines(self.stats.lines_cleared);
        if new_level > self.stats.level {
            self.stats.level = new_level;
            self.fall_interval_ms = fall_interval_ms(self.config.base_fall_ms, new_level);
            self.push_event(EngineEvent::LevelUp(new_level));
        }

        self.push_event(EngineEvent::StatsUpdated);
    }

    // ---- projection ----

    /// Whether `piece` fits: columns inside `[0, width)`, rows below `height`,
    /// and no overlap with occupied cells. Rows above the field are allowed.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        let width = i32::from(self.field.width());
        let height = i32::from(self.field.height());

        piece.occupied_cells().iter().all(|cell| {
            if cell.x < 0 || cell.x >= width || cell.y >= height {
                return false;
            }
            cell.y < 0 || self.field.is_cell_empty(cell.x, cell.y)
        })
    }

    /// Where the current piece would land. `None` unless running with ghosts enabled.
    pub fn ghost_piece(&self) -> Option<Piece> {
        if self.state != EngineState::Running || !self.config.ghost_enabled {
            return None;
        }
        let current = self.current?;
        let distance = self.drop_distance(&current);
        Some(current.moved(0, distance as i32))
    }

    // ---- input ----

    /// Apply a discrete input action. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDropStart => self.soft_drop(),
            GameAction::SoftDropStop => self.stop_soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => match self.state {
                EngineState::Running => self.pause(),
                EngineState::Paused => self.resume(),
                _ => false,
            },
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    // ---- snapshots ----

    /// Copy everything a renderer reads into `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.width = self.field.width();
        out.height = self.field.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.field.cells());
        out.current = self.current;
        out.ghost = self.ghost_piece();
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.state = self.state;
        out.stats = self.stats;
        out.fall_progress = self.fall_progress;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn unix_now_secs() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}
