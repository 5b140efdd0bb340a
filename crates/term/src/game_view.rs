//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GameId, LifecycleState, PieceKind};

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
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed in the viewport.
#[derive(Debug, Clone, Copy)]
struct FrameRect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// The buffer is reset to the viewport size first, so one buffer can be
    /// reused across frames and resizes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let board_px_w = (snap.width as u16) * self.cell_w;
        let board_px_h = (snap.height as u16) * self.cell_h;
        let frame = FrameRect {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_px_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        let bg = CellStyle::fg_on(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::fg_on(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, border);

        // Settled cells with the active piece on top.
        for y in 0..snap.height {
            for x in 0..snap.width {
                let cell = snap.composed_cell(x as i8, y as i8);
                match PieceKind::from_color_index(cell) {
                    Some(kind) => self.draw_board_cell(fb, frame, x as u16, y as u16, kind),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.state {
            LifecycleState::NotStarted => self.draw_title_overlay(fb, frame),
            LifecycleState::Paused => self.draw_overlay_text(fb, frame, 0, "PAUSED"),
            LifecycleState::GameOver => self.draw_game_over_overlay(fb, snap, frame),
            LifecycleState::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: FrameRect, style: CellStyle) {
        let FrameRect { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: FrameRect, x: u16, y: u16) {
        let style = CellStyle::fg_on(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: FrameRect, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::fg_on(piece_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: FrameRect,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: FrameRect,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg_on(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("HIGH", snap.high_score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        let hint = value.dim();
        let hints: &[&str] = match snap.state {
            LifecycleState::NotStarted => &["SPACE start", "Q quit"],
            LifecycleState::Playing => &["←→ move", "↑ rotate", "↓ drop", "SPC hard", "P pause"],
            LifecycleState::Paused => &["P resume", "R restart"],
            LifecycleState::GameOver => &["R restart", "Q quit"],
        };
        for h in hints {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, h, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_title_overlay(&self, fb: &mut FrameBuffer, frame: FrameRect) {
        self.draw_overlay_text(fb, frame, -2, GameId::Tetris.title());
        self.draw_overlay_text(fb, frame, 0, "PRESS SPACE");
        self.draw_overlay_text(fb, frame, 1, "TO START");
    }

    fn draw_game_over_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: FrameRect) {
        self.draw_overlay_text(fb, frame, -1, "GAME OVER");
        self.draw_overlay_value(fb, frame, 1, "SCORE ", snap.score);
        self.draw_overlay_value(fb, frame, 2, "LEVEL ", snap.level);
    }

    /// Centered text `row` lines away from the frame's middle row.
    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: FrameRect, row: i16, text: &str) {
        let y = overlay_row(frame, row);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, overlay_style());
    }

    fn draw_overlay_value(
        &self,
        fb: &mut FrameBuffer,
        frame: FrameRect,
        row: i16,
        label: &str,
        value: u32,
    ) {
        let y = overlay_row(frame, row);
        let label_w = label.chars().count() as u16;
        let text_w = label_w + digit_count(value);
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, label, overlay_style());
        fb.put_u32(x + label_w, y, value, overlay_style());
    }
}

fn overlay_row(frame: FrameRect, row: i16) -> u16 {
    let mid = frame.y.saturating_add(frame.h / 2);
    mid.saturating_add_signed(row)
}

fn overlay_style() -> CellStyle {
    CellStyle::fg_on(Rgb::new(255, 255, 255), SCREEN_BG).bold()
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Display color per piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 127, 0),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::Z => Rgb::new(255, 0, 0),
    }
}

/// Color for a raw board cell, `None` when empty.
pub fn cell_color(cell: Cell) -> Option<Rgb> {
    PieceKind::from_color_index(cell).map(piece_color)
}
