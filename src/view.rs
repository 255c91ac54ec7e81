//! Text rendering of an engine snapshot.
//!
//! The view composes a character grid (`Frame`) from a snapshot: the field with
//! locked cells, the ghost and the current piece, plus a side panel with stats,
//! next/held previews and the high-score table. Each field cell is two
//! characters wide so blocks look square in most terminal fonts.

use crate::core::config::MAX_FIELD_SIDE;
use crate::core::{EngineSnapshot, Piece};
use crate::scores::ScoreEntry;
use crate::types::{EngineState, PieceKind};

/// One character on screen. `color_id` 0 is the default terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color_id: u8,
    pub dim: bool,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        color_id: 0,
        dim: false,
    };
}

/// Fixed-size character grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Write a glyph; off-frame writes are dropped.
    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if x < self.width && y < self.height {
            let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.glyphs[idx] = glyph;
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, color_id: u8) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(i) else {
                break;
            };
            self.put(
                x.saturating_add(dx),
                y,
                Glyph {
                    ch,
                    color_id,
                    dim: false,
                },
            );
        }
    }

    /// Row `y` as a plain string with trailing blanks trimmed.
    pub fn line(&self, y: u16) -> String {
        let line: String = (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect();
        line.trim_end().to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.line(y)).collect()
    }
}

const PANEL_GAP: u16 = 2;
const PANEL_WIDTH: u16 = 24;
const PREVIEW_ROWS: u16 = 4;

/// Drawn field size; snapshots larger than the engine allows are cropped.
fn field_size(snapshot: &EngineSnapshot) -> (u16, u16) {
    (
        snapshot.width.min(MAX_FIELD_SIDE),
        snapshot.height.min(MAX_FIELD_SIDE),
    )
}

/// Render a snapshot and the current high-score table.
pub fn render(snapshot: &EngineSnapshot, high_scores: &[ScoreEntry]) -> Frame {
    let (w, h) = field_size(snapshot);
    let field_cols = w * 2 + 2;
    let field_rows = h + 2;
    let panel_x = field_cols + PANEL_GAP;
    let score_rows = u16::try_from(high_scores.len()).unwrap_or(u16::MAX);
    let height = field_rows.max(score_rows.saturating_add(18));
    let mut frame = Frame::new(panel_x + PANEL_WIDTH, height);

    draw_field(&mut frame, snapshot);

    let mut y = 0;
    frame.put_str(panel_x, y, &format!("Score  {}", snapshot.stats.score), 0);
    y += 1;
    frame.put_str(panel_x, y, &format!("Level  {}", snapshot.stats.level), 0);
    y += 1;
    frame.put_str(panel_x, y, &format!("Lines  {}", snapshot.stats.lines_cleared), 0);
    y += 1;
    frame.put_str(
        panel_x,
        y,
        &format!("Time   {}s", snapshot.stats.duration_seconds),
        0,
    );
    y += 2;

    frame.put_str(panel_x, y, "Next", 0);
    draw_preview(&mut frame, panel_x, y + 1, Some(snapshot.next), false);
    y += PREVIEW_ROWS + 1;

    frame.put_str(panel_x, y, "Hold", 0);
    draw_preview(&mut frame, panel_x, y + 1, snapshot.held, !snapshot.can_hold);
    y += PREVIEW_ROWS + 1;

    if let Some(message) = state_message(snapshot.state) {
        frame.put_str(panel_x, y, message, 0);
    }
    y += 2;

    if !high_scores.is_empty() {
        frame.put_str(panel_x, y, "High scores", 0);
        for (i, entry) in high_scores.iter().enumerate() {
            y = y.saturating_add(1);
            let name: String = entry.player_name.chars().take(10).collect();
            frame.put_str(
                panel_x,
                y,
                &format!("{}. {:<10} {:>7}", i + 1, name, entry.score),
                0,
            );
        }
    }

    frame
}

fn state_message(state: EngineState) -> Option<&'static str> {
    match state {
        EngineState::Running => None,
        EngineState::Paused => Some("PAUSED  (p resumes)"),
        EngineState::GameOver => Some("GAME OVER  (r restarts)"),
        EngineState::Stopped => Some("Press r to start"),
    }
}

fn draw_field(frame: &mut Frame, snapshot: &EngineSnapshot) {
    let (w, h) = field_size(snapshot);

    // Border
    for y in 0..=h + 1 {
        frame.put_str(0, y, "|", 0);
        frame.put_str(w * 2 + 1, y, "|", 0);
    }
    for x in 1..=w * 2 {
        frame.put_str(x, h + 1, "-", 0);
    }

    for y in 0..h {
        for x in 0..w {
            let cell = snapshot
                .cell(i32::from(x), i32::from(y))
                .unwrap_or_default();
            if cell.occupied {
                draw_block(frame, x, y, cell.color_id, false);
            } else {
                frame.put_str(1 + x * 2, y + 1, " .", 0);
            }
        }
    }

    if let Some(ghost) = snapshot.ghost {
        draw_piece(frame, snapshot, &ghost, true);
    }
    if let Some(current) = snapshot.current {
        draw_piece(frame, snapshot, &current, false);
    }
}

fn draw_piece(frame: &mut Frame, snapshot: &EngineSnapshot, piece: &Piece, ghost: bool) {
    for cell in piece.occupied_cells() {
        // Cells above the field are not shown
        if cell.x < 0 || cell.y < 0 {
            continue;
        }
        let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            continue;
        };
        let (w, h) = field_size(snapshot);
        if x < w && y < h {
            draw_block(frame, x, y, piece.color_id(), ghost);
        }
    }
}

fn draw_block(frame: &mut Frame, x: u16, y: u16, color_id: u8, ghost: bool) {
    let (left, right) = if ghost { ('(', ')') } else { ('[', ']') };
    for (dx, ch) in [(0, left), (1, right)] {
        frame.put(
            1 + x * 2 + dx,
            y + 1,
            Glyph {
                ch,
                color_id,
                dim: ghost,
            },
        );
    }
}

fn draw_preview(frame: &mut Frame, x0: u16, y0: u16, kind: Option<PieceKind>, dim: bool) {
    let Some(kind) = kind else {
        return;
    };
    let piece = Piece::new(kind);
    let Some(bb) = piece.bounding_box() else {
        return;
    };
    for cell in piece.occupied_cells() {
        let (Ok(x), Ok(y)) = (
            u16::try_from(cell.x - bb.min_x),
            u16::try_from(cell.y - bb.min_y),
        ) else {
            continue;
        };
        frame.put_str(x0 + 2 + x * 2, y0 + y, "[]", piece.color_id());
        if dim {
            for dx in 0..2 {
                let px = x0 + 2 + x * 2 + dx;
                if let Some(mut g) = frame.get(px, y0 + y) {
                    g.dim = true;
                    frame.put(px, y0 + y, g);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Engine, EngineConfig};

    fn running_snapshot() -> EngineSnapshot {
        let mut engine = Engine::with_seed(EngineConfig::default(), 42);
        engine.start();
        engine.snapshot()
    }

    #[test]
    fn test_frame_fits_field_and_panel() {
        let frame = render(&running_snapshot(), &[]);
        assert_eq!(frame.width(), 22 + PANEL_GAP + PANEL_WIDTH);
        assert!(frame.height() >= 22);
    }

    #[test]
    fn test_current_piece_is_drawn() {
        let snap = running_snapshot();
        let frame = render(&snap, &[]);
        let piece = snap.current.unwrap();
        let cell = piece
            .occupied_cells()
            .into_iter()
            .find(|c| c.y >= 0)
            .unwrap();

        let glyph = frame
            .get(1 + cell.x as u16 * 2, cell.y as u16 + 1)
            .unwrap();
        assert_eq!(glyph.ch, '[');
        assert_eq!(glyph.color_id, piece.color_id());
    }

    #[test]
    fn test_stats_and_scores_in_panel() {
        let entry = ScoreEntry {
            player_name: "ann".to_string(),
            score: 1234,
            level: 2,
            lines_cleared: 12,
            timestamp: 0,
        };
        let lines = render(&running_snapshot(), &[entry]).lines();
        assert!(lines.iter().any(|l| l.contains("Score  0")));
        assert!(lines.iter().any(|l| l.contains("Level  1")));
        assert!(lines.iter().any(|l| l.contains("1. ann") && l.contains("1234")));
    }

    #[test]
    fn test_oversized_snapshot_is_cropped() {
        let mut snap = running_snapshot();
        snap.width = 40_000;
        snap.height = 4;

        let frame = render(&snap, &[]);
        assert_eq!(frame.width(), MAX_FIELD_SIDE * 2 + 2 + PANEL_GAP + PANEL_WIDTH);
    }

    #[test]
    fn test_paused_message() {
        let mut snap = running_snapshot();
        snap.state = EngineState::Paused;
        let lines = render(&snap, &[]).lines();
        assert!(lines.iter().any(|l| l.contains("PAUSED")));
    }

    #[test]
    fn test_off_frame_writes_are_dropped() {
        let mut frame = Frame::new(3, 1);
        frame.put_str(1, 0, "abcdef", 0);
        assert_eq!(frame.line(0), " ab");
        frame.put_str(0, 5, "x", 0);
        assert_eq!(frame.lines(), vec![" ab".to_string()]);
    }
}
