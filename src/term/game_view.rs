//! GameView: projects `core::Engine` state into a terminal framebuffer.
//!
//! This module is pure (no I/O), so rendering can be unit-tested. The engine
//! is read only through its accessors; all drawing decisions, including the
//! block palette, live here.

use crate::core::Engine;
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, GRID_HEIGHT, GRID_WIDTH};

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

/// Screen color for a block.
pub fn color_rgb(color: ColorId) -> Rgb {
    match color {
        ColorId::Cyan => Rgb::new(0, 240, 240),
        ColorId::Purple => Rgb::new(160, 0, 240),
        ColorId::Orange => Rgb::new(240, 160, 0),
        ColorId::Blue => Rgb::new(0, 0, 240),
        ColorId::Yellow => Rgb::new(240, 240, 0),
        ColorId::Green => Rgb::new(0, 240, 0),
        ColorId::Red => Rgb::new(240, 0, 0),
    }
}

/// Framebuffer renderer for the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render into a caller-held framebuffer, resizing it to the viewport.
    ///
    /// Callers keep one framebuffer across frames so the steady state does
    /// not allocate.
    pub fn render_into(&self, engine: &Engine, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let board_px_h = (GRID_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well);
        self.draw_frame(fb, start_x, start_y, frame_w, frame_h, border);

        // Settled cells, with faint dots marking the empty ones.
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                match engine.grid().get(x, y).unwrap_or(None) {
                    Some(color) => {
                        self.draw_block(fb, start_x, start_y, x as u16, y as u16, color)
                    }
                    None => self.draw_empty(fb, start_x, start_y, x as u16, y as u16),
                }
            }
        }

        // Falling piece; rows above the top edge are clipped.
        let piece = engine.piece();
        for &(x, y) in piece.cells().iter() {
            if x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8 {
                self.draw_block(fb, start_x, start_y, x as u16, y as u16, piece.color);
            }
        }

        self.draw_side_panel(fb, engine, viewport, start_x, start_y, frame_w);

        if engine.game_over() {
            let final_score = format!("FINAL SCORE {}", engine.score());
            self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", &final_score, "PRESS ANY KEY"],
            );
        }
    }

    /// Render into a fresh framebuffer.
    pub fn render(&self, engine: &Engine, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(engine, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: ColorId,
    ) {
        let style = CellStyle {
            fg: color_rgb(color),
            bg: Rgb::new(20, 20, 28),
            bold: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(60, 60, 72),
            bg: Rgb::new(20, 20, 28),
            bold: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        engine: &Engine,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        fb.put_str(panel_x, start_y, "SCORE", label);
        fb.put_str(
            panel_x,
            start_y.saturating_add(1),
            &engine.score().to_string(),
            value,
        );
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };

        let first_y = start_y
            .saturating_add(frame_h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, first_y.saturating_add(i as u16), text, style);
        }
    }
}
