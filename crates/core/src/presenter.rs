//! Presentation boundary.
//!
//! The core never draws or plays anything itself. It reports what happened through the
//! [`Presenter`] trait and the presentation layer decides what that looks like.

use crate::types::{BlockId, CellCoord, PieceKind};

/// Outbound calls from the simulation to its presentation collaborator.
pub trait Presenter {
    /// A block handle became visible at `cell`, drawn as `kind`
    fn spawn_block(&mut self, block: BlockId, cell: CellCoord, kind: PieceKind);
    /// A visible block moved to `cell`
    fn move_block(&mut self, block: BlockId, cell: CellCoord);
    /// A block went back to the free pool and should be hidden
    fn release_block(&mut self, block: BlockId);
    fn update_score(&mut self, score: u32);
    fn update_level(&mut self, level: u32);
    fn game_over(&mut self, final_score: u32);
    fn play_clear_sound(&mut self);
    fn play_game_over_sound(&mut self);

    fn paused_changed(&mut self, _paused: bool) {}

    /// The display was invalidated from outside (a terminal resize, say).
    fn redraw(&mut self) {}

    /// One inbound event (tick or command) has been fully processed.
    fn commit(&mut self) {}
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn spawn_block(&mut self, block: BlockId, cell: CellCoord, kind: PieceKind) {
        (**self).spawn_block(block, cell, kind)
    }
    fn move_block(&mut self, block: BlockId, cell: CellCoord) {
        (**self).move_block(block, cell)
    }
    fn release_block(&mut self, block: BlockId) {
        (**self).release_block(block)
    }
    fn update_score(&mut self, score: u32) {
        (**self).update_score(score)
    }
    fn update_level(&mut self, level: u32) {
        (**self).update_level(level)
    }
    fn game_over(&mut self, final_score: u32) {
        (**self).game_over(final_score)
    }
    fn play_clear_sound(&mut self) {
        (**self).play_clear_sound()
    }
    fn play_game_over_sound(&mut self) {
        (**self).play_game_over_sound()
    }
    fn paused_changed(&mut self, paused: bool) {
        (**self).paused_changed(paused)
    }
    fn redraw(&mut self) {
        (**self).redraw()
    }
    fn commit(&mut self) {
        (**self).commit()
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn spawn_block(&mut self, _block: BlockId, _cell: CellCoord, _kind: PieceKind) {}
    fn move_block(&mut self, _block: BlockId, _cell: CellCoord) {}
    fn release_block(&mut self, _block: BlockId) {}
    fn update_score(&mut self, _score: u32) {}
    fn update_level(&mut self, _level: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
    fn play_clear_sound(&mut self) {}
    fn play_game_over_sound(&mut self) {}
}

/// One recorded outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCall {
    Spawn {
        block: BlockId,
        cell: CellCoord,
        kind: PieceKind,
    },
    Move {
        block: BlockId,
        cell: CellCoord,
    },
    Release {
        block: BlockId,
    },
    Score(u32),
    Level(u32),
    GameOver(u32),
    ClearSound,
    GameOverSound,
    Paused(bool),
}

/// Records every call, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
    pub commits: usize,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.calls.clear();
        self.commits = 0;
    }

    pub fn count(&self, pred: impl Fn(&PresenterCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn releases(&self) -> usize {
        self.count(|c| matches!(c, PresenterCall::Release { .. }))
    }

    pub fn last_score(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match c {
            PresenterCall::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_level(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match c {
            PresenterCall::Level(l) => Some(*l),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn spawn_block(&mut self, block: BlockId, cell: CellCoord, kind: PieceKind) {
        self.calls.push(PresenterCall::Spawn { block, cell, kind });
    }
    fn move_block(&mut self, block: BlockId, cell: CellCoord) {
        self.calls.push(PresenterCall::Move { block, cell });
    }
    fn release_block(&mut self, block: BlockId) {
        self.calls.push(PresenterCall::Release { block });
    }
    fn update_score(&mut self, score: u32) {
        self.calls.push(PresenterCall::Score(score));
    }
    fn update_level(&mut self, level: u32) {
        self.calls.push(PresenterCall::Level(level));
    }
    fn game_over(&mut self, final_score: u32) {
        self.calls.push(PresenterCall::GameOver(final_score));
    }
    fn play_clear_sound(&mut self) {
        self.calls.push(PresenterCall::ClearSound);
    }
    fn play_game_over_sound(&mut self) {
        self.calls.push(PresenterCall::GameOverSound);
    }
    fn paused_changed(&mut self, paused: bool) {
        self.calls.push(PresenterCall::Paused(paused));
    }
    fn commit(&mut self) {
        self.commits += 1;
    }
}
