//! Collision and movement rules.
//!
//! Pure predicates over the grid and a piece pose. Each one derives its target cells from
//! the pivot and the catalog on every call; no "current cells" list is kept anywhere, so
//! several moves inside one tick can never observe stale positions.
//!
//! Bounds are plain grid indices: columns `1..=W`, floor at row 1. Cells above the seeded
//! rows have no grid entry and are blocked like any other missing entry.

use crate::grid::Grid;
use crate::pieces::cells_at;
use crate::types::{CellCoord, PieceKind, Rotation};

/// Lowest playable row
pub const FLOOR_ROW: i16 = 1;

/// Leftmost column
pub const MIN_COLUMN: i16 = 1;

/// Where a piece is and how it is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub pivot: CellCoord,
}

impl Pose {
    pub fn new(kind: PieceKind, rotation: Rotation, pivot: CellCoord) -> Self {
        Self {
            kind,
            rotation,
            pivot,
        }
    }

    /// The 4 cells this pose covers
    pub fn cells(&self) -> [CellCoord; 4] {
        cells_at(self.kind, self.rotation, self.pivot)
    }

    pub fn shifted(&self, dcol: i16, drow: i16) -> Self {
        Self {
            pivot: self.pivot.offset(dcol, drow),
            ..*self
        }
    }

    /// The same pivot in the next rotation state
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.next(),
            ..*self
        }
    }

    /// Lowest and highest row covered
    pub fn row_span(&self) -> (i16, i16) {
        let cells = self.cells();
        let min = cells.iter().map(|c| c.row).min().unwrap_or(self.pivot.row);
        let max = cells.iter().map(|c| c.row).max().unwrap_or(self.pivot.row);
        (min, max)
    }
}

fn within_columns(grid: &Grid, cell: CellCoord) -> bool {
    cell.col >= MIN_COLUMN && cell.col <= grid.width() as i16
}

/// Every cell of `pose` is inside the columns, on or above the floor, seeded and empty
pub fn fits(grid: &Grid, pose: &Pose) -> bool {
    pose.cells().iter().all(|&cell| {
        within_columns(grid, cell) && cell.row >= FLOOR_ROW && grid.is_free(cell)
    })
}

/// Any cell of `pose` sits on an occupied grid cell
pub fn overlaps(grid: &Grid, pose: &Pose) -> bool {
    pose.cells().iter().any(|&cell| grid.is_occupied(cell))
}

/// Whether the piece can fall one row
pub fn can_move_down(grid: &Grid, pose: &Pose) -> bool {
    fits(grid, &pose.shifted(0, -1))
}

/// Whether the piece can shift one column left
pub fn can_move_left(grid: &Grid, pose: &Pose) -> bool {
    fits(grid, &pose.shifted(-1, 0))
}

/// Whether the piece can shift one column right
pub fn can_move_right(grid: &Grid, pose: &Pose) -> bool {
    fits(grid, &pose.shifted(1, 0))
}

/// Whether the next rotation state fits at the same pivot. No kicks are attempted.
pub fn can_rotate(grid: &Grid, pose: &Pose) -> bool {
    fits(grid, &pose.rotated())
}

/// Lowest pose reachable by repeated `can_move_down`.
///
/// Terminates because every step lowers the pivot and the floor blocks eventually.
pub fn drop_target(grid: &Grid, pose: &Pose) -> Pose {
    let mut current = *pose;
    while can_move_down(grid, &current) {
        current = current.shifted(0, -1);
    }
    current
}
