//! Shapes module - the seven tetromino definitions and pattern rotation
//!
//! Each shape stores its pattern in a 4x4 boolean grid (row-major, `pattern[row][col]`).
//! Only the top-left `size`×`size` box is meaningful: I uses 4, O uses 2, the
//! others use 3. Rotations turn the pattern inside that box, so a piece spins
//! around the centre of its own box and no wall kicks are involved.

use crate::types::{PieceKind, Rotation};

/// Side length of the stored pattern grid.
pub const PATTERN_SIZE: usize = 4;

/// Boolean occupancy pattern, indexed `[row][col]`.
pub type Pattern = [[bool; PATTERN_SIZE]; PATTERN_SIZE];

/// Immutable definition of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: PieceKind,
    pub name: &'static str,
    pub pattern: Pattern,
    /// Side of the square box the pattern rotates in.
    pub size: usize,
    /// Display color id (1..=7, 0 is reserved for empty cells).
    pub color_id: u8,
    /// Spawn column on a default-width field. Engines spawn at `width / 2 - 2`
    /// for every width.
    pub spawn_offset: i32,
}

const X: bool = true;
const O: bool = false;

static SHAPES: [Shape; 7] = [
    Shape {
        kind: PieceKind::I,
        name: "I",
        pattern: [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
        size: 4,
        color_id: 1,
        spawn_offset: 3,
    },
    Shape {
        kind: PieceKind::O,
        name: "O",
        pattern: [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
        size: 2,
        color_id: 2,
        spawn_offset: 4,
    },
    Shape {
        kind: PieceKind::T,
        name: "T",
        pattern: [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
        size: 3,
        color_id: 3,
        spawn_offset: 3,
    },
    Shape {
        kind: PieceKind::S,
        name: "S",
        pattern: [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
        size: 3,
        color_id: 4,
        spawn_offset: 3,
    },
    Shape {
        kind: PieceKind::Z,
        name: "Z",
        pattern: [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
        size: 3,
        color_id: 5,
        spawn_offset: 3,
    },
    Shape {
        kind: PieceKind::J,
        name: "J",
        pattern: [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
        size: 3,
        color_id: 6,
        spawn_offset: 3,
    },
    Shape {
        kind: PieceKind::L,
        name: "L",
        pattern: [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
        size: 3,
        color_id: 7,
        spawn_offset: 3,
    },
];

/// Get the catalog entry for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

/// The full catalog, in `PieceKind::ALL` order.
pub fn all_shapes() -> &'static [Shape; 7] {
    &SHAPES
}

/// Rotate a pattern 90° clockwise inside its `size`×`size` box.
///
/// `new[x][size - 1 - y] = old[y][x]`; cells outside the box stay empty.
pub fn rotate_pattern_cw(pattern: &Pattern, size: usize) -> Pattern {
    let size = size.min(PATTERN_SIZE);
    let mut rotated = [[false; PATTERN_SIZE]; PATTERN_SIZE];
    for y in 0..size {
        for x in 0..size {
            rotated[x][size - 1 - y] = pattern[y][x];
        }
    }
    rotated
}

/// Pattern of `kind` turned clockwise `rotation.index()` times.
pub fn rotated_pattern(kind: PieceKind, rotation: Rotation) -> Pattern {
    let shape = get_shape(kind);
    let mut pattern = shape.pattern;
    for _ in 0..rotation.index() {
        pattern = rotate_pattern_cw(&pattern, shape.size);
    }
    pattern
}
