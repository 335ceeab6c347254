//! Game state module - the game state machine
//!
//! Ties the catalog, grid, rules, clearance engine, block pool and scoring together.
//!
//! A piece goes through `Spawning -> Falling -> Locking -> Clearing -> Scoring -> Spawning`.
//! Only `Falling` and `GameOver` are resting phases; the others run to completion inside
//! the call that entered them (a tick that cannot fall, or a forced drop). Pause is
//! orthogonal and only suspends ticks and manual control.
//!
//! Every visible change is reported through the [`Presenter`] passed into each call.

use std::time::Duration;

use serde::Serialize;

use crate::clearance::clear_and_compact;
use crate::config::{ConfigError, GameConfig};
use crate::grid::{Grid, Occupant};
use crate::pool::BlockPool;
use crate::presenter::Presenter;
use crate::rng::PieceRandomizer;
use crate::rules::{
    can_move_down, can_move_left, can_move_right, can_rotate, drop_target, overlaps, Pose,
};
use crate::scoring::ScoreState;
use crate::snapshot::{FallingSnapshot, GameSnapshot};
use crate::types::*;

/// The piece under player control, with the four blocks it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub pose: Pose,
    pub blocks: [BlockId; 4],
}

impl FallingPiece {
    pub fn kind(&self) -> PieceKind {
        self.pose.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.pose.rotation
    }

    pub fn pivot(&self) -> CellCoord {
        self.pose.pivot
    }

    pub fn cells(&self) -> [CellCoord; 4] {
        self.pose.cells()
    }
}

/// State machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Created, `start` not called yet
    Idle,
    Spawning,
    Falling,
    Locking,
    Clearing { min_row: i16, max_row: i16 },
    Scoring { cleared: u32 },
    GameOver,
}

/// Summary of the most recent lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub cells: [CellCoord; 4],
    pub lines_cleared: u32,
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub level_changed: bool,
    /// The spawn following this lock overlapped the stack
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    pool: BlockPool,
    randomizer: PieceRandomizer,
    falling: Option<FallingPiece>,
    phase: Phase,
    scores: ScoreState,
    paused: bool,
    /// Piece detached at the last lock, waiting for the scoring step
    locked: Option<(PieceKind, [CellCoord; 4])>,
    last_event: Option<LockEvent>,
    pieces_spawned: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
}

impl GameState {
    /// Create an idle game. Fails when `config` does not describe a playable board.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height, config.vertical_buffer);
        let pool = BlockPool::new(config.initial_pool);

        Ok(Self {
            config,
            grid,
            pool,
            randomizer: PieceRandomizer::new(seed),
            falling: None,
            phase: Phase::Idle,
            scores: ScoreState::new(),
            paused: false,
            locked: None,
            last_event: None,
            pieces_spawned: 0,
            episode_id: 0,
        })
    }

    /// Announce the initial score/level and spawn the first piece. Idempotent.
    pub fn start(&mut self, presenter: &mut impl Presenter) {
        if self.phase != Phase::Idle {
            return;
        }
        presenter.update_score(self.scores.score());
        presenter.update_level(self.scores.level());
        self.phase = Phase::Spawning;
        self.run_transitions(presenter);
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn lines_since_level(&self) -> u32 {
        self.scores.lines_since_level()
    }

    pub fn total_lines(&self) -> u32 {
        self.scores.total_lines()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    pub fn falling(&self) -> Option<FallingPiece> {
        self.falling
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pool(&self) -> &BlockPool {
        &self.pool
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current fall timer period
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(self.config.fall_interval_ms(self.scores.level()) as u64)
    }

    /// Whether the fall timer should be running
    pub fn timer_active(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// One fall timer tick. Returns true if anything changed.
    pub fn tick(&mut self, presenter: &mut impl Presenter) -> bool {
        if !self.timer_active() {
            return false;
        }
        let Some(piece) = self.falling else {
            return false;
        };

        if can_move_down(&self.grid, &piece.pose) {
            self.reposition(piece.pose.shifted(0, -1), presenter);
        } else {
            self.phase = Phase::Locking;
            self.run_transitions(presenter);
        }
        true
    }

    /// Apply one inbound command. Returns true if it was accepted.
    pub fn apply(&mut self, command: GameCommand, presenter: &mut impl Presenter) -> bool {
        match command {
            GameCommand::Restart => {
                self.restart(presenter);
                true
            }
            GameCommand::TogglePause => {
                if !self.started() || self.is_game_over() {
                    return false;
                }
                self.paused = !self.paused;
                presenter.paused_changed(self.paused);
                true
            }
            GameCommand::MoveLeft => self.try_move(presenter, can_move_left, -1),
            GameCommand::MoveRight => self.try_move(presenter, can_move_right, 1),
            GameCommand::Rotate => self.try_rotate(presenter),
            GameCommand::ForceDrop => self.force_drop(presenter),
        }
    }

    /// The falling piece, if manual control is currently allowed
    fn controllable(&self) -> Option<FallingPiece> {
        if self.paused || self.phase != Phase::Falling {
            return None;
        }
        self.falling
    }

    fn try_move(
        &mut self,
        presenter: &mut impl Presenter,
        allowed: fn(&Grid, &Pose) -> bool,
        dcol: i16,
    ) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        if !allowed(&self.grid, &piece.pose) {
            return false;
        }
        self.reposition(piece.pose.shifted(dcol, 0), presenter);
        true
    }

    fn try_rotate(&mut self, presenter: &mut impl Presenter) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        if !can_rotate(&self.grid, &piece.pose) {
            return false;
        }
        self.reposition(piece.pose.rotated(), presenter);
        true
    }

    fn force_drop(&mut self, presenter: &mut impl Presenter) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let landed = drop_target(&self.grid, &piece.pose);
        if landed != piece.pose {
            self.reposition(landed, presenter);
        }
        self.phase = Phase::Locking;
        self.run_transitions(presenter);
        true
    }

    /// Move the falling piece to `pose` and its blocks with it
    fn reposition(&mut self, pose: Pose, presenter: &mut impl Presenter) {
        let Some(piece) = self.falling.as_mut() else {
            return;
        };
        piece.pose = pose;
        for (block, cell) in piece.blocks.into_iter().zip(pose.cells()) {
            presenter.move_block(block, cell);
        }
    }

    /// Step through transient phases until a resting one is reached
    fn run_transitions(&mut self, presenter: &mut impl Presenter) {
        loop {
            match self.phase {
                Phase::Spawning => self.spawn(presenter),
                Phase::Locking => self.lock(),
                Phase::Clearing { min_row, max_row } => {
                    let report = clear_and_compact(
                        &mut self.grid,
                        &mut self.pool,
                        presenter,
                        min_row,
                        max_row,
                    );
                    self.phase = Phase::Scoring {
                        cleared: report.cleared_count(),
                    };
                }
                Phase::Scoring { cleared } => self.score_lock(cleared, presenter),
                Phase::Idle | Phase::Falling | Phase::GameOver => break,
            }
        }
    }

    fn spawn(&mut self, presenter: &mut impl Presenter) {
        let kind = self.randomizer.draw();
        let pose = Pose::new(kind, Rotation::North, self.config.spawn);

        let pool = &mut self.pool;
        let blocks = [(); 4].map(|_| pool.acquire());
        for (block, cell) in blocks.into_iter().zip(pose.cells()) {
            presenter.spawn_block(block, cell, kind);
        }
        self.falling = Some(FallingPiece { pose, blocks });
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if overlaps(&self.grid, &pose) {
            self.phase = Phase::GameOver;
            if let Some(event) = self.last_event.as_mut() {
                event.game_over = true;
            }
            presenter.play_game_over_sound();
            presenter.game_over(self.scores.score());
        } else {
            self.phase = Phase::Falling;
        }
    }

    fn lock(&mut self) {
        let Some(piece) = self.falling.take() else {
            self.phase = Phase::Spawning;
            return;
        };

        let cells = piece.cells();
        for (block, cell) in piece.blocks.into_iter().zip(cells) {
            let placed = self.grid.set(
                cell,
                Some(Occupant {
                    block,
                    kind: piece.kind(),
                }),
            );
            assert!(placed, "grid entry missing for {} at lock", cell);
        }

        let (min_row, max_row) = piece.pose.row_span();
        self.locked = Some((piece.kind(), cells));
        self.phase = Phase::Clearing { min_row, max_row };
    }

    fn score_lock(&mut self, cleared: u32, presenter: &mut impl Presenter) {
        let result = self.scores.apply(cleared, self.config.lines_per_level);

        if cleared > 0 {
            presenter.play_clear_sound();
            presenter.update_score(self.scores.score());
        }
        if result.levels_gained > 0 {
            presenter.update_level(self.scores.level());
        }

        if let Some((kind, cells)) = self.locked.take() {
            self.last_event = Some(LockEvent {
                kind,
                cells,
                lines_cleared: cleared,
                points: result.points,
                score: self.scores.score(),
                level: self.scores.level(),
                level_changed: result.levels_gained > 0,
                game_over: false,
            });
        }

        self.phase = Phase::Spawning;
    }

    /// Release every block, reset the field and the score, and spawn again
    pub fn restart(&mut self, presenter: &mut impl Presenter) {
        if let Some(piece) = self.falling.take() {
            for block in piece.blocks {
                self.pool.release(block);
                presenter.release_block(block);
            }
        }
        for (_, occupant) in self.grid.occupants() {
            self.pool.release(occupant.block);
            presenter.release_block(occupant.block);
        }
        self.grid.initialize(
            self.config.width,
            self.config.height,
            self.config.vertical_buffer,
        );

        self.scores.reset();
        if self.paused {
            self.paused = false;
            presenter.paused_changed(false);
        }
        self.locked = None;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);

        presenter.update_score(self.scores.score());
        presenter.update_level(self.scores.level());
        self.phase = Phase::Spawning;
        self.run_transitions(presenter);
    }

    /// Every minted block is owned by exactly one of: the grid, the falling piece, the pool
    pub fn block_ownership_consistent(&self) -> bool {
        let mut owners = vec![0u8; self.pool.allocated() as usize];
        let mut mark = |block: BlockId| match owners.get_mut(block.0 as usize) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        };

        let mut known = true;
        for (_, occupant) in self.grid.occupants() {
            known &= mark(occupant.block);
        }
        if let Some(piece) = self.falling {
            for block in piece.blocks {
                known &= mark(block);
            }
        }
        for block in self.pool.idle() {
            known &= mark(block);
        }

        known && owners.iter().all(|&count| count == 1)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let board = (1..=self.grid.height() as i16)
            .map(|row| {
                (1..=self.grid.width() as i16)
                    .map(|col| {
                        self.grid
                            .get(CellCoord::new(col, row))
                            .flatten()
                            .map(|o| o.kind)
                    })
                    .collect()
            })
            .collect();

        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            vertical_buffer: self.grid.buffer(),
            board,
            falling: self.falling.map(FallingSnapshot::from),
            phase: self.phase,
            paused: self.paused,
            game_over: self.is_game_over(),
            seed: self.randomizer.seed(),
            episode_id: self.episode_id,
            pieces_spawned: self.pieces_spawned,
            score: self.scores.score(),
            level: self.scores.level(),
            lines_since_level: self.scores.lines_since_level(),
            total_lines: self.scores.total_lines(),
            fall_interval_ms: self.config.fall_interval_ms(self.scores.level()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1).expect("default config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{PresenterCall, RecordingPresenter};

    fn started(seed: u32) -> (GameState, RecordingPresenter) {
        let mut state = GameState::new(GameConfig::default(), seed).unwrap();
        let mut presenter = RecordingPresenter::new();
        state.start(&mut presenter);
        (state, presenter)
    }

    /// Occupy `cell` with a block taken from the pool
    fn put(state: &mut GameState, cell: CellCoord) -> BlockId {
        let block = state.pool.acquire();
        assert!(state.grid.set(
            cell,
            Some(Occupant {
                block,
                kind: PieceKind::O
            })
        ));
        block
    }

    /// Replace the falling piece with `kind` at `pivot`, keeping its blocks
    fn force_piece(state: &mut GameState, kind: PieceKind, pivot: CellCoord) {
        let piece = state.falling.as_mut().unwrap();
        piece.pose = Pose::new(kind, Rotation::North, pivot);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default(), 12345).unwrap();

        assert!(!state.started());
        assert!(!state.is_game_over());
        assert!(!state.paused);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert!(state.falling.is_none());
        assert_eq!(state.pool.available(), 150);
    }

    #[test]
    fn test_start_spawns_at_configured_pivot() {
        let (state, presenter) = started(12345);

        let piece = state.falling.unwrap();
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(piece.rotation(), Rotation::North);
        assert_eq!(piece.pivot(), DEFAULT_SPAWN);
        assert_eq!(
            presenter.count(|c| matches!(c, PresenterCall::Spawn { .. })),
            4
        );
        assert_eq!(presenter.last_score(), Some(0));
        assert_eq!(presenter.last_level(), Some(0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut state, mut presenter) = started(1);
        state.start(&mut presenter);
        assert_eq!(state.pieces_spawned, 1);
    }

    #[test]
    fn test_tick_moves_piece_down_one_row() {
        let (mut state, mut presenter) = started(5);
        let before = state.falling.unwrap().pivot();
        presenter.clear();

        assert!(state.tick(&mut presenter));
        assert_eq!(state.falling.unwrap().pivot(), before.offset(0, -1));
        assert_eq!(
            presenter.count(|c| matches!(c, PresenterCall::Move { .. })),
            4
        );
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let (mut state, mut presenter) = started(5);
        force_piece(&mut state, PieceKind::T, CellCoord::new(5, 1));
        let blocks = state.falling.unwrap().blocks;
        let cells = state.falling.unwrap().cells();

        assert!(state.tick(&mut presenter));

        for (block, cell) in blocks.into_iter().zip(cells) {
            let occupant = state.grid.get(cell).flatten().unwrap();
            assert_eq!(occupant.block, block);
            assert_eq!(occupant.kind, PieceKind::T);
        }
        let next = state.falling.unwrap();
        assert!(next.blocks.iter().all(|b| !blocks.contains(b)));
        assert_eq!(state.pieces_spawned, 2);
        assert!(state.block_ownership_consistent());

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(event.cells, cells);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_single_row_clear_shifts_blocks_above() {
        let (mut state, mut presenter) = started(9);

        // Row 1 full except columns 5..=8, where a flat I will land.
        for col in (1..=4).chain(9..=10) {
            put(&mut state, CellCoord::new(col, 1));
        }
        let above = put(&mut state, CellCoord::new(2, 2));
        let higher = put(&mut state, CellCoord::new(2, 3));

        force_piece(&mut state, PieceKind::I, CellCoord::new(6, 12));
        presenter.clear();
        assert!(state.apply(GameCommand::ForceDrop, &mut presenter));

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.points, 40);
        assert_eq!(state.score(), 40);

        // Row 1 now holds what used to be row 2, and so on.
        assert_eq!(
            state.grid.get(CellCoord::new(2, 1)).flatten().map(|o| o.block),
            Some(above)
        );
        assert_eq!(
            state.grid.get(CellCoord::new(2, 2)).flatten().map(|o| o.block),
            Some(higher)
        );
        assert_eq!(state.grid.occupied_count(), 2);
        assert_eq!(presenter.releases(), 10);
        assert!(presenter.calls.contains(&PresenterCall::ClearSound));
        assert_eq!(presenter.last_score(), Some(40));
        assert!(state.block_ownership_consistent());
    }

    #[test]
    fn test_blocks_below_cleared_row_stay_put() {
        let (mut state, mut presenter) = started(9);

        // Row 1 has a hole in column 1; row 2 is full except 5..=8.
        let low = put(&mut state, CellCoord::new(2, 1));
        for col in 3..=10 {
            put(&mut state, CellCoord::new(col, 1));
        }
        for col in (1..=4).chain(9..=10) {
            put(&mut state, CellCoord::new(col, 2));
        }
        force_piece(&mut state, PieceKind::I, CellCoord::new(6, 12));
        assert!(state.apply(GameCommand::ForceDrop, &mut presenter));

        assert_eq!(state.take_last_event().unwrap().lines_cleared, 1);
        assert_eq!(
            state.grid.get(CellCoord::new(2, 1)).flatten().map(|o| o.block),
            Some(low)
        );
        assert_eq!(state.grid.occupied_count(), 9);
        assert!(state.grid.is_row_empty(2));
        assert!(state.block_ownership_consistent());
    }

    #[test]
    fn test_level_up_updates_interval_and_presenter() {
        let (mut state, mut presenter) = started(3);
        state.scores.apply(9, 10);
        assert_eq!(state.fall_interval(), Duration::from_millis(1000));

        for col in (1..=4).chain(9..=10) {
            put(&mut state, CellCoord::new(col, 1));
        }
        force_piece(&mut state, PieceKind::I, CellCoord::new(6, 12));
        presenter.clear();
        state.apply(GameCommand::ForceDrop, &mut presenter);

        let event = state.take_last_event().unwrap();
        assert!(event.level_changed);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines_since_level(), 0);
        assert_eq!(presenter.last_level(), Some(1));
        assert_eq!(state.fall_interval(), Duration::from_millis(900));
    }

    #[test]
    fn test_overlapping_spawn_is_game_over() {
        let (mut state, mut presenter) = started(4);
        // Wall off the spawn area so any next piece overlaps.
        for col in 1..=10 {
            if col != 1 {
                put(&mut state, CellCoord::new(col, 19));
                put(&mut state, CellCoord::new(col, 20));
                put(&mut state, CellCoord::new(col, 21));
            }
        }
        force_piece(&mut state, PieceKind::O, CellCoord::new(2, 3));
        presenter.clear();
        assert!(state.apply(GameCommand::ForceDrop, &mut presenter));

        assert!(state.is_game_over());
        assert!(state.take_last_event().unwrap().game_over);
        assert!(presenter.calls.contains(&PresenterCall::GameOverSound));
        assert!(presenter.calls.contains(&PresenterCall::GameOver(0)));

        presenter.clear();
        for cmd in [
            GameCommand::MoveLeft,
            GameCommand::MoveRight,
            GameCommand::Rotate,
            GameCommand::ForceDrop,
            GameCommand::TogglePause,
        ] {
            assert!(!state.apply(cmd, &mut presenter), "{:?}", cmd);
        }
        assert!(!state.tick(&mut presenter));
        assert!(presenter.calls.is_empty());
        assert!(state.block_ownership_consistent());
    }

    #[test]
    fn test_failed_rotation_leaves_state_untouched() {
        let (mut state, mut presenter) = started(2);
        // Vertical I needs column 6 above the pivot; block it.
        force_piece(&mut state, PieceKind::I, CellCoord::new(6, 10));
        put(&mut state, CellCoord::new(6, 12));
        let before = state.falling.unwrap();
        presenter.clear();

        assert!(!state.apply(GameCommand::Rotate, &mut presenter));
        assert_eq!(state.falling.unwrap(), before);
        assert!(presenter.calls.is_empty());
    }

    #[test]
    fn test_pause_blocks_ticks_and_controls() {
        let (mut state, mut presenter) = started(8);
        assert!(state.apply(GameCommand::TogglePause, &mut presenter));
        assert!(state.paused());
        assert!(!state.timer_active());

        let before = state.falling.unwrap();
        assert!(!state.tick(&mut presenter));
        assert!(!state.apply(GameCommand::MoveLeft, &mut presenter));
        assert!(!state.apply(GameCommand::ForceDrop, &mut presenter));
        assert_eq!(state.falling.unwrap(), before);

        assert!(state.apply(GameCommand::TogglePause, &mut presenter));
        assert!(state.tick(&mut presenter));
        assert!(presenter.calls.contains(&PresenterCall::Paused(true)));
        assert!(presenter.calls.contains(&PresenterCall::Paused(false)));
    }

    #[test]
    fn test_restart_releases_everything() {
        let (mut state, mut presenter) = started(6);
        for _ in 0..5 {
            state.apply(GameCommand::ForceDrop, &mut presenter);
        }
        state.scores.apply(12, 10);
        state.apply(GameCommand::TogglePause, &mut presenter);
        let occupied = state.grid.occupied_count();
        presenter.clear();

        assert!(state.apply(GameCommand::Restart, &mut presenter));

        assert_eq!(presenter.releases(), occupied + 4);
        assert_eq!(state.grid.occupied_count(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines_since_level(), 0);
        assert!(!state.paused());
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.episode_id(), 1);
        assert_eq!(presenter.last_score(), Some(0));
        assert_eq!(presenter.last_level(), Some(0));
        assert!(state.block_ownership_consistent());
    }

    #[test]
    fn test_pool_reuses_released_blocks() {
        let (mut state, mut presenter) = started(6);
        let allocated = state.pool.allocated();
        for _ in 0..3 {
            state.apply(GameCommand::Restart, &mut presenter);
        }
        assert_eq!(state.pool.allocated(), allocated);
    }

    #[test]
    fn test_new_rejects_spawn_outside_board() {
        let config = GameConfig {
            width: 4,
            ..GameConfig::default()
        };
        assert_eq!(
            GameState::new(config, 1).err(),
            Some(ConfigError::SpawnOutsideBoard(DEFAULT_SPAWN))
        );
    }

    #[test]
    fn test_snapshot_leaves_out_buffer_rows() {
        let (mut state, _) = started(11);
        put(&mut state, CellCoord::new(1, 1));
        put(&mut state, CellCoord::new(1, 21));
        let snapshot = state.snapshot();

        assert_eq!(snapshot.board.len(), 20);
        assert_eq!(snapshot.board[0][0], Some(PieceKind::O));
        assert_eq!(snapshot.board.iter().flatten().flatten().count(), 1);
    }

    #[test]
    fn test_snapshot_reflects_board() {
        let (mut state, mut presenter) = started(11);
        state.apply(GameCommand::ForceDrop, &mut presenter);
        let snapshot = state.snapshot();

        assert_eq!(snapshot.board.len(), 20);
        assert!(snapshot.board.iter().all(|row| row.len() == 10));
        let filled: usize = snapshot
            .board
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum();
        assert_eq!(filled, 4);
        assert!(snapshot.falling.is_some());
        assert_eq!(snapshot.pieces_spawned, 2);
    }
}
