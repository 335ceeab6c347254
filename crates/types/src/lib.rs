//! Shared types and constants for the blockfall workspace.
//!
//! Everything here is plain data: coordinates, piece kinds, rotation states, block handles
//! and the discrete commands the game accepts. The simulation lives in `blockfall-core`.
//!
//! # Coordinates
//!
//! Cells are addressed as `(col, row)`, both 1-based:
//!
//! - **Columns**: `1..=W` (left to right)
//! - **Rows**: `1..=H + buffer` (row 1 is the floor, rows grow upward)
//!
//! The buffer rows above `H` exist so that a freshly spawned piece can overlap the top of
//! the field before game over is decided.
//!
//! # Defaults
//!
//! | Constant | Value |
//! |----------|-------|
//! | `DEFAULT_WIDTH` | 10 |
//! | `DEFAULT_HEIGHT` | 20 |
//! | `DEFAULT_VERTICAL_BUFFER` | 2 |
//! | `DEFAULT_SPAWN` | (6, 20) |
//! | `BASE_FALL_INTERVAL_MS` | 1000 |
//! | `FALL_INTERVAL_STEP_MS` | 100 |
//! | `MIN_FALL_INTERVAL_MS` | 100 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{CellCoord, GameCommand, PieceKind, Rotation};
//!
//! let cell = CellCoord::new(3, 1);
//! assert_eq!(cell.offset(1, 1), CellCoord::new(4, 2));
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::West.next(), Rotation::North);
//! assert_eq!(GameCommand::from_str("forceDrop"), Some(GameCommand::ForceDrop));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board width in columns
pub const DEFAULT_WIDTH: u8 = 10;

/// Visible board height in rows
pub const DEFAULT_HEIGHT: u8 = 20;

/// Extra rows above the visible board used for spawn overlap
pub const DEFAULT_VERTICAL_BUFFER: u8 = 2;

/// Pivot cell of a freshly spawned piece
pub const DEFAULT_SPAWN: CellCoord = CellCoord { col: 6, row: 20 };

/// Block handles created up front by the free pool
pub const DEFAULT_POOL_SIZE: usize = 150;

/// Fall interval at level 0 (1 row per second)
pub const BASE_FALL_INTERVAL_MS: u32 = 1000;

/// Fall interval reduction per level
pub const FALL_INTERVAL_STEP_MS: u32 = 100;

/// Fall interval floor
pub const MIN_FALL_INTERVAL_MS: u32 = 100;

/// Cleared lines needed for one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table.
///
/// Base points for clearing N lines at level 0; four or more lines score the last entry.
/// Points are multiplied by `(level + 1)`.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A discrete grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: i16,
    pub row: i16,
}

impl CellCoord {
    pub const fn new(col: i16, row: i16) -> Self {
        Self { col, row }
    }

    /// Shift by `(dcol, drow)`; positive `drow` is up.
    pub const fn offset(self, dcol: i16, drow: i16) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The seven piece kinds.
///
/// - **L**: orange
/// - **J**: blue
/// - **Z**: red
/// - **S**: green
/// - **I**: cyan, the long bar
/// - **T**: purple
/// - **O**: yellow, the square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    O,
    J,
    L,
    S,
    Z,
    I,
    T,
}

impl PieceKind {
    /// All kinds, in the order used for uniform random selection.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
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

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// One of the four rotation states of a piece.
///
/// `North` is the spawn state ("state 1"). The cycle goes
/// North -> East -> South -> West -> North. The states are labels for catalog rows, not
/// guaranteed geometric quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// The following state in the cycle.
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.next(), Rotation::East);
    /// assert_eq!(Rotation::East.next(), Rotation::South);
    /// assert_eq!(Rotation::South.next(), Rotation::West);
    /// assert_eq!(Rotation::West.next(), Rotation::North);
    /// ```
    pub fn next(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Table index (0..4)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Opaque handle of one visual block.
///
/// Handles are minted by the block pool and recycled through it; the presentation layer
/// maps them to whatever it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Discrete commands accepted by the game.
///
/// Each is a no-op unless the current state permits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameCommand {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Advance to the next rotation state
    Rotate,
    /// Drop to the lowest reachable row and lock immediately
    ForceDrop,
    /// Toggle pause
    TogglePause,
    /// Restart the game (at any time, including after game over)
    Restart,
}

impl GameCommand {
    /// Parse command from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotate" => Some(GameCommand::Rotate),
            "forcedrop" => Some(GameCommand::ForceDrop),
            "togglepause" | "pause" => Some(GameCommand::TogglePause),
            "restart" => Some(GameCommand::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::Rotate => "rotate",
            GameCommand::ForceDrop => "forceDrop",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Restart => "restart",
        }
    }
}
