//! FieldModel: what the screen currently shows, built only from presenter calls.
//!
//! The model never looks at the simulation. It tracks each visible block handle by the
//! cell and kind it was last given.

use std::collections::HashMap;

use crate::core::Presenter;
use crate::types::{BlockId, CellCoord, PieceKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldModel {
    blocks: HashMap<BlockId, (CellCoord, PieceKind)>,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Line-clear effects requested since the last frame
    pub clears: u32,
    /// Game-over effects requested since the last frame
    pub game_over_sounds: u32,
    dirty: bool,
}

impl FieldModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, block: BlockId) -> Option<(CellCoord, PieceKind)> {
        self.blocks.get(&block).copied()
    }

    pub fn visible_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (CellCoord, PieceKind)> + '_ {
        self.blocks.values().copied()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag and hand back pending effects.
    pub fn take_frame(&mut self) -> (u32, u32) {
        self.dirty = false;
        let effects = (self.clears, self.game_over_sounds);
        self.clears = 0;
        self.game_over_sounds = 0;
        effects
    }

    /// Redraw on the next commit even if nothing changed
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Presenter for FieldModel {
    fn spawn_block(&mut self, block: BlockId, cell: CellCoord, kind: PieceKind) {
        self.blocks.insert(block, (cell, kind));
        // A fresh spawn always follows a restart or a lock.
        self.game_over = false;
        self.dirty = true;
    }

    fn move_block(&mut self, block: BlockId, cell: CellCoord) {
        if let Some(entry) = self.blocks.get_mut(&block) {
            entry.0 = cell;
            self.dirty = true;
        }
    }

    fn release_block(&mut self, block: BlockId) {
        if self.blocks.remove(&block).is_some() {
            self.dirty = true;
        }
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
        self.dirty = true;
    }

    fn update_level(&mut self, level: u32) {
        self.level = level;
        self.dirty = true;
    }

    fn game_over(&mut self, final_score: u32) {
        self.score = final_score;
        self.game_over = true;
        self.dirty = true;
    }

    fn play_clear_sound(&mut self) {
        self.clears += 1;
    }

    fn play_game_over_sound(&mut self) {
        self.game_over_sounds += 1;
    }

    fn paused_changed(&mut self, paused: bool) {
        self.paused = paused;
        self.dirty = true;
    }
}
