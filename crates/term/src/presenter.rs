//! TerminalPresenter: the presenter the terminal build hands to the game.
//!
//! Calls are folded into a [`FieldModel`]; `commit` renders the model and flushes the
//! difference to the terminal once per processed event.

use std::io::Write;

use anyhow::Result;

use crate::audio::{AudioService, Sfx};
use crate::core::Presenter;
use crate::fb::FrameBuffer;
use crate::model::FieldModel;
use crate::renderer::TerminalRenderer;
use crate::types::{BlockId, CellCoord, PieceKind};
use crate::view::{FieldView, Viewport};

pub struct TerminalPresenter<W: Write, A: AudioService> {
    model: FieldModel,
    view: FieldView,
    viewport: Viewport,
    fb: FrameBuffer,
    renderer: TerminalRenderer<W>,
    audio: A,
    frames: u64,
    /// Query the real terminal size on redraw
    follow_terminal: bool,
    /// First draw failure; later frames are skipped once set
    error: Option<anyhow::Error>,
}

impl<W: Write, A: AudioService> TerminalPresenter<W, A> {
    pub fn new(
        view: FieldView,
        viewport: Viewport,
        renderer: TerminalRenderer<W>,
        mut audio: A,
    ) -> Self {
        audio.initialize();
        Self {
            model: FieldModel::new(),
            view,
            viewport,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            renderer,
            audio,
            frames: 0,
            follow_terminal: false,
            error: None,
        }
    }

    /// Track the size of the controlling terminal on every redraw
    pub fn follow_terminal(mut self) -> Self {
        self.follow_terminal = true;
        self
    }

    pub fn model(&self) -> &FieldModel {
        &self.model
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The terminal changed size; the next commit redraws everything.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.invalidate();
        self.model.mark_dirty();
    }

    /// Render now if anything changed
    pub fn flush(&mut self) -> Result<()> {
        if !self.model.is_dirty() {
            return Ok(());
        }
        let (clears, game_overs) = self.model.take_frame();
        if clears > 0 {
            self.audio.play(Sfx::LineClear);
        }
        if game_overs > 0 {
            self.audio.play(Sfx::GameOver);
        }

        self.view.render_into(&self.model, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)?;
        self.frames += 1;
        Ok(())
    }

    /// Take the first draw failure, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }
}

impl<W: Write, A: AudioService> Presenter for TerminalPresenter<W, A> {
    fn spawn_block(&mut self, block: BlockId, cell: CellCoord, kind: PieceKind) {
        if self.model.game_over {
            // First spawn of a restarted game.
            self.audio.initialize();
        }
        self.model.spawn_block(block, cell, kind);
    }

    fn move_block(&mut self, block: BlockId, cell: CellCoord) {
        self.model.move_block(block, cell);
    }

    fn release_block(&mut self, block: BlockId) {
        self.model.release_block(block);
    }

    fn update_score(&mut self, score: u32) {
        self.model.update_score(score);
    }

    fn update_level(&mut self, level: u32) {
        self.model.update_level(level);
    }

    fn game_over(&mut self, final_score: u32) {
        self.audio.stop();
        self.model.game_over(final_score);
    }

    fn play_clear_sound(&mut self) {
        self.model.play_clear_sound();
    }

    fn play_game_over_sound(&mut self) {
        self.model.play_game_over_sound();
    }

    fn paused_changed(&mut self, paused: bool) {
        if paused {
            self.audio.pause();
        } else {
            self.audio.resume();
        }
        self.model.paused_changed(paused);
    }

    fn redraw(&mut self) {
        let viewport = if self.follow_terminal {
            crossterm::terminal::size()
                .map(|(w, h)| Viewport::new(w, h))
                .unwrap_or(self.viewport)
        } else {
            self.viewport
        };
        self.resize(viewport);
    }

    fn commit(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.flush() {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{MusicCall, Silent};

    fn presenter() -> TerminalPresenter<Vec<u8>, Silent> {
        TerminalPresenter::new(
            FieldView::new(10, 20),
            Viewport::new(40, 24),
            TerminalRenderer::with_writer(Vec::new()),
            Silent::default(),
        )
    }

    #[test]
    fn commit_draws_only_when_dirty() {
        let mut p = presenter();
        p.commit();
        assert_eq!(p.frames(), 0);

        p.spawn_block(BlockId(1), CellCoord::new(5, 20), PieceKind::O);
        p.commit();
        assert_eq!(p.frames(), 1);
        assert!(!p.renderer().writer().is_empty());

        p.commit();
        assert_eq!(p.frames(), 1);
    }

    #[test]
    fn redraw_forces_a_full_frame() {
        let mut p = presenter();
        p.update_score(10);
        p.commit();
        let first = p.renderer().writer().len();

        p.redraw();
        p.commit();
        assert_eq!(p.frames(), 2);
        // Same screen, sent in full a second time.
        assert_eq!(p.renderer().writer().len(), first * 2);
    }

    #[test]
    fn effects_play_once_per_frame() {
        let mut p = presenter();
        p.play_clear_sound();
        p.update_score(40);
        p.commit();
        p.commit();
        assert_eq!(p.audio().played, vec![Sfx::LineClear]);
    }

    #[test]
    fn clear_and_game_over_in_one_frame_play_both() {
        let mut p = presenter();
        p.play_clear_sound();
        p.update_score(40);
        p.play_game_over_sound();
        p.game_over(40);
        p.commit();
        assert_eq!(p.audio().played, vec![Sfx::LineClear, Sfx::GameOver]);
    }

    #[test]
    fn music_follows_pause_and_game_over() {
        let mut p = presenter();
        p.paused_changed(true);
        p.paused_changed(false);
        p.spawn_block(BlockId(1), CellCoord::new(5, 20), PieceKind::T);
        p.game_over(0);
        assert_eq!(
            p.audio().music,
            vec![
                MusicCall::Start,
                MusicCall::Pause,
                MusicCall::Resume,
                MusicCall::Stop
            ]
        );

        // Restart: blocks go away, then the first spawn brings the music back.
        p.release_block(BlockId(1));
        p.spawn_block(BlockId(2), CellCoord::new(5, 20), PieceKind::O);
        p.spawn_block(BlockId(3), CellCoord::new(6, 20), PieceKind::O);
        assert_eq!(p.audio().music.last(), Some(&MusicCall::Start));
        assert_eq!(p.audio().music.len(), 5);
    }
}
