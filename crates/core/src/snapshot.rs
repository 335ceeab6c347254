//! Serializable view of a running game.

use serde::Serialize;

use crate::game_state::{FallingPiece, Phase};
use crate::types::{CellCoord, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FallingSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub pivot: CellCoord,
    pub cells: [CellCoord; 4],
}

impl From<FallingPiece> for FallingSnapshot {
    fn from(value: FallingPiece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            pivot: value.pivot(),
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub vertical_buffer: u8,
    /// Visible rows bottom first, columns left to right. Buffer rows are left out.
    pub board: Vec<Vec<Option<PieceKind>>>,
    pub falling: Option<FallingSnapshot>,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub seed: u32,
    pub episode_id: u32,
    pub pieces_spawned: u32,
    pub score: u32,
    pub level: u32,
    pub lines_since_level: u32,
    pub total_lines: u32,
    pub fall_interval_ms: u32,
}
