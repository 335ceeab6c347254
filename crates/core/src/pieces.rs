//! Pieces module - the piece catalog
//!
//! Every (kind, rotation) pair maps to exactly four cell offsets relative to the piece
//! pivot, `dy` positive meaning up. The table is the only source of shape and rotation
//! geometry; collision and rotation code treat it as opaque data.
//!
//! The offsets are not pure quarter turns for every kind (the I piece drifts by one cell
//! between states, the square never changes its footprint). That is intended.

use crate::types::{CellCoord, PieceKind, Rotation};

/// Offset of a single block relative to the piece pivot
pub type BlockOffset = (i16, i16);

/// Shape of a piece - 4 block offsets from the pivot
pub type PieceShape = [BlockOffset; 4];

/// Get the shape (block offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let table = match kind {
        PieceKind::L => &L_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::I => &I_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::O => &O_SHAPES,
    };
    table[rotation.index()]
}

/// Absolute cells covered by `kind` in `rotation` with its pivot at `pivot`
pub fn cells_at(kind: PieceKind, rotation: Rotation, pivot: CellCoord) -> [CellCoord; 4] {
    get_shape(kind, rotation).map(|(dx, dy)| pivot.offset(dx, dy))
}

/// Display colour of a kind, as RGB
pub fn kind_color(kind: PieceKind) -> (u8, u8, u8) {
    match kind {
        PieceKind::L => (255, 165, 0),
        PieceKind::J => (40, 80, 255),
        PieceKind::Z => (230, 40, 40),
        PieceKind::S => (40, 200, 60),
        PieceKind::I => (0, 220, 220),
        PieceKind::T => (160, 40, 200),
        PieceKind::O => (240, 220, 0),
    }
}

type ShapeTable = [PieceShape; 4];

const L_SHAPES: ShapeTable = [
    [(1, 1), (-1, 0), (0, 0), (1, 0)],
    [(0, 1), (0, 0), (0, -1), (1, -1)],
    [(-1, 0), (0, 0), (1, 0), (-1, -1)],
    [(-1, 1), (0, 1), (0, 0), (0, -1)],
];

const J_SHAPES: ShapeTable = [
    [(-1, 1), (-1, 0), (0, 0), (1, 0)],
    [(0, 1), (1, 1), (0, 0), (0, -1)],
    [(-1, 0), (0, 0), (1, 0), (1, -1)],
    [(0, 1), (0, 0), (-1, -1), (0, -1)],
];

const Z_SHAPES: ShapeTable = [
    [(-1, 0), (0, 0), (0, -1), (1, -1)],
    [(0, 1), (0, 0), (-1, 0), (-1, -1)],
    [(-1, 1), (0, 1), (0, 0), (1, 0)],
    [(1, 1), (0, 0), (1, 0), (0, -1)],
];

const S_SHAPES: ShapeTable = [
    [(-1, -1), (0, 0), (0, -1), (1, 0)],
    [(-1, 1), (-1, 0), (0, 0), (0, -1)],
    [(-1, 0), (0, 1), (0, 0), (1, 1)],
    [(0, 1), (0, 0), (1, 0), (1, -1)],
];

const I_SHAPES: ShapeTable = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    [(0, 2), (0, 1), (0, 0), (0, -1)],
    [(-1, 1), (0, 1), (1, 1), (2, 1)],
    [(1, 2), (1, 1), (1, 0), (1, -1)],
];

const T_SHAPES: ShapeTable = [
    [(0, 1), (0, 0), (-1, 0), (1, 0)],
    [(0, 1), (0, 0), (1, 0), (0, -1)],
    [(-1, 0), (0, 0), (1, 0), (0, -1)],
    [(0, 1), (0, 0), (-1, 0), (0, -1)],
];

// Same footprint in every state; rotating only advances the state.
const O_SQUARE: PieceShape = [(-1, 0), (0, 0), (-1, -1), (0, -1)];
const O_SHAPES: ShapeTable = [O_SQUARE; 4];

/// Largest upward offset in the catalog (the vertical I)
pub const MAX_OFFSET_UP: i16 = 2;

/// Largest downward offset in the catalog
pub const MAX_OFFSET_DOWN: i16 = 1;
