//! FieldView: maps a [`FieldModel`] into a terminal framebuffer.
//!
//! Pure, no I/O. Only the visible rows are drawn; blocks in the buffer zone above the
//! board stay hidden until they fall into view.

use crate::core::kind_color;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::model::FieldModel;
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [(&str, &str); 6] = [
    ("←/→", "move"),
    ("↑", "rotate"),
    ("↓/spc", "drop"),
    ("p", "pause"),
    ("r", "restart"),
    ("q", "quit"),
];

pub struct FieldView {
    /// Visible board size in cells
    columns: u8,
    rows: u8,
    /// Board cell width in terminal columns.
    cell_w: u16,
    show_help: bool,
}

impl FieldView {
    pub fn new(columns: u8, rows: u8) -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            columns,
            rows,
            cell_w: 2,
            show_help: true,
        }
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Frame size including the border
    pub fn frame_size(&self) -> (u16, u16) {
        (
            self.columns as u16 * self.cell_w + 2,
            self.rows as u16 + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, model: &FieldModel, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for y in 0..self.rows as u16 {
            for x in 0..self.columns as u16 {
                self.fill_cell(fb, start_x, start_y, x, y, '·', empty);
            }
        }
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for (cell, kind) in model.blocks() {
            if cell.col < 1 || cell.col > self.columns as i16 {
                continue;
            }
            if cell.row < 1 || cell.row > self.rows as i16 {
                continue;
            }
            // Row 1 is the floor; screen rows grow downward.
            let x = (cell.col - 1) as u16;
            let y = (self.rows as i16 - cell.row) as u16;
            self.fill_cell(fb, start_x, start_y, x, y, '█', block_style(kind));
        }

        self.draw_side_panel(fb, model, viewport, start_x + frame_w + 2, start_y);

        if model.game_over {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if model.paused {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }
    }

    pub fn render(&self, model: &FieldModel, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(model, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + x * self.cell_w;
        fb.fill_rect(px, start_y + 1 + y, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        model: &FieldModel,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }
        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, model.score, value);
        y += 3;
        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, model.level, value);
        y += 3;

        if !self.show_help {
            return;
        }
        let dim = value.dim();
        for (key, action) in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 6, y, action, dim);
            y += 1;
        }
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    CellStyle::new(kind_color(kind).into(), PLAY_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x + w.saturating_sub(text_w) / 2, y + h / 2, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Presenter;
    use crate::types::{BlockId, CellCoord};

    #[test]
    fn floor_block_draws_on_bottom_row() {
        let view = FieldView::new(4, 3).with_help(false);
        let mut model = FieldModel::new();
        model.spawn_block(BlockId(0), CellCoord::new(1, 1), PieceKind::I);

        let fb = view.render(&model, Viewport::new(10, 5));
        // Frame is 10x5 at (0, 0); the bottom board row is screen row 3.
        assert_eq!(fb.row_text(3), "│██······│");
        assert_eq!(fb.row_text(1), "│········│");
    }

    #[test]
    fn buffer_rows_are_hidden() {
        let view = FieldView::new(4, 3).with_help(false);
        let mut model = FieldModel::new();
        model.spawn_block(BlockId(0), CellCoord::new(2, 4), PieceKind::T);

        let fb = view.render(&model, Viewport::new(10, 5));
        assert!((0..5).all(|y| !fb.row_text(y).contains('█')));
    }

    #[test]
    fn overlay_shows_game_over() {
        let view = FieldView::new(10, 20);
        let mut model = FieldModel::new();
        model.game_over(120);

        let fb = view.render(&model, Viewport::new(60, 24));
        assert!((0..24).any(|y| fb.row_text(y).contains("GAME OVER")));
        assert!((0..24).any(|y| fb.row_text(y).contains("120")));
    }
}
