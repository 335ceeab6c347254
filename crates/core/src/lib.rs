//! Core game logic - the falling-block field simulation
//!
//! This crate holds every rule of the game and nothing else. It never draws, plays sounds
//! or reads the clock; all of that goes through the [`Presenter`] trait and the fall timer
//! lives in the runtime. Given a seed, a run is fully deterministic.
//!
//! # Module Structure
//!
//! - [`pieces`]: the piece catalog, four cell offsets per (kind, rotation)
//! - [`grid`]: the occupancy grid, with a buffer zone above the visible board
//! - [`rules`]: collision predicates for falling, shifting and rotating
//! - [`clearance`]: full-row detection, removal and gravity compaction
//! - [`pool`]: recycled block handles
//! - [`scoring`]: line scores, levels and fall intervals
//! - [`game_state`]: the state machine driving a piece from spawn to lock
//! - [`presenter`]: the outbound presentation boundary
//! - [`config`]: tunable constants, loadable from JSON
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every spawn picks one of the seven kinds independently
//! - **No wall kicks**: a rotation either fits at the same pivot or is rejected
//! - **No lock delay**: a piece locks on the first tick it cannot fall
//! - **Forced drop**: moves the piece to its landing spot and locks immediately
//! - **Scoring**: 40/100/300/1200 times (level + 1), a level every 10 lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState, RecordingPresenter};
//! use blockfall_types::GameCommand;
//!
//! let mut presenter = RecordingPresenter::new();
//! let mut game = GameState::new(GameConfig::default(), 12345)?;
//! game.start(&mut presenter);
//!
//! game.apply(GameCommand::MoveRight, &mut presenter);
//! game.apply(GameCommand::Rotate, &mut presenter);
//! assert!(game.apply(GameCommand::ForceDrop, &mut presenter));
//!
//! assert_eq!(game.grid().occupied_count(), 4);
//! assert_eq!(game.pieces_spawned(), 2);
//! # Ok::<(), blockfall_core::ConfigError>(())
//! ```

pub mod clearance;
pub mod config;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod pool;
pub mod presenter;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use clearance::{clear_and_compact, ClearReport};
pub use config::{ConfigError, GameConfig};
pub use game_state::{FallingPiece, GameState, LockEvent, Phase};
pub use grid::{Grid, Occupant, Slot};
pub use pieces::{cells_at, get_shape, kind_color};
pub use pool::BlockPool;
pub use presenter::{NullPresenter, Presenter, PresenterCall, RecordingPresenter};
pub use rng::{PieceRandomizer, SimpleRng};
pub use rules::{drop_target, Pose};
pub use scoring::{calculate_line_score, ScoreResult, ScoreState};
pub use snapshot::{FallingSnapshot, GameSnapshot};
