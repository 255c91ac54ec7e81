//! Piece module - a placed instance of a shape
//!
//! A `Piece` is a small `Copy` value: kind, rotation and grid position. All
//! transformations return a new candidate piece so callers can validate it
//! before committing, which is how the engine implements movement and rotation.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::shapes::{get_shape, rotated_pattern, Shape};
use crate::types::{PieceKind, Position, Rotation};

/// Absolute cells covered by a piece (always four for the standard catalog).
pub type PieceCells = ArrayVec<Position, 4>;

/// Inclusive bounds of a piece's occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

/// Active, next, held or ghost piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub position: Position,
}

impl Piece {
    /// Create a piece at the origin in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            position: Position::default(),
        }
    }

    /// Canonical spawn column for a field of the given width.
    pub fn spawn_column(field_width: u16) -> i32 {
        i32::from(field_width) / 2 - 2
    }

    /// Create a piece at the canonical spawn position (`width / 2 - 2`, row 0)
    pub fn spawned(kind: PieceKind, field_width: u16) -> Self {
        Self::new(kind).at(Position::new(Self::spawn_column(field_width), 0))
    }

    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind)
    }

    pub fn color_id(&self) -> u8 {
        self.shape().color_id
    }

    /// Same piece at another position
    pub fn at(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Candidate translated by (dx, dy)
    pub fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..self
        }
    }

    pub fn rotated_cw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    pub fn rotated_ccw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_ccw(),
            ..self
        }
    }

    /// Map every set cell of the rotated pattern to absolute grid coordinates.
    pub fn occupied_cells(&self) -> PieceCells {
        let pattern = rotated_pattern(self.kind, self.rotation);
        let mut cells = PieceCells::new();
        for (row, line) in pattern.iter().enumerate() {
            for (col, &set) in line.iter().enumerate() {
                if set {
                    let _ = cells.try_push(self.position.offset(col as i32, row as i32));
                }
            }
        }
        cells
    }

    /// Bounds of the occupied cells, used to centre previews.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let cells = self.occupied_cells();
        let first = cells.first()?;
        let mut bb = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for cell in &cells[1..] {
            bb.min_x = bb.min_x.min(cell.x);
            bb.min_y = bb.min_y.min(cell.y);
            bb.max_x = bb.max_x.max(cell.x);
            bb.max_y = bb.max_y.max(cell.y);
        }
        Some(bb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new() {
        let piece = Piece::new(PieceKind::T);

        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.position, Position::new(0, 0));
    }

    #[test]
    fn test_spawned_uses_centre_column() {
        let piece = Piece::spawned(PieceKind::I, 10);
        assert_eq!(piece.position, Position::new(3, 0));

        let narrow = Piece::spawned(PieceKind::O, 6);
        assert_eq!(narrow.position, Position::new(1, 0));
    }

    #[test]
    fn test_occupied_cells_are_offset_by_position() {
        let piece = Piece::new(PieceKind::O).at(Position::new(4, 7));
        let cells = piece.occupied_cells();
        assert_eq!(
            cells.as_slice(),
            &[
                Position::new(4, 7),
                Position::new(5, 7),
                Position::new(4, 8),
                Position::new(5, 8)
            ]
        );
    }

    #[test]
    fn test_bounding_box_of_horizontal_i() {
        let piece = Piece::spawned(PieceKind::I, 10);
        let bb = piece.bounding_box().unwrap();
        assert_eq!((bb.min_x, bb.max_x, bb.min_y, bb.max_y), (3, 6, 1, 1));
        assert_eq!(bb.width(), 4);
        assert_eq!(bb.height(), 1);
    }
}
