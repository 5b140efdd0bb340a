//! TerminalRenderer: flushes the game's framebuffer to the terminal.
//!
//! Frames go out row by row. The first frame, or any frame after a resize or
//! [`TerminalRenderer::invalidate`], clears the screen and sends every row.
//! After that a row is sent only when it differs from the previous frame, and
//! then only the span from its first to its last changed column. A falling
//! piece touches a few board rows and the side panel digits, so most frames
//! are a handful of short spans.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        queue!(
            self.bytes,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.send()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.send()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints the whole screen (after a resize).
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then hand back the previous frame's buffer in its place so
    /// the caller renders the next frame without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let prev = self
            .prev
            .take()
            .filter(|p| p.width() == fb.width() && p.height() == fb.height());

        self.bytes.clear();
        encode_frame(prev.as_ref(), fb, &mut self.bytes)?;
        if !self.bytes.is_empty() {
            self.send()?;
        }

        let mut drawn = prev.unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut drawn, fb);
        self.prev = Some(drawn);
        Ok(())
    }

    fn send(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Terminal bytes that turn `prev` into `next`. Without a previous frame the
/// screen is cleared and every row is sent.
fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.is_none() {
        queue!(out, terminal::Clear(ClearType::All))?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        let span = match prev {
            Some(prev) => changed_span(prev.row(y), row),
            None => Some((0, row.len())),
        };
        let Some((start, end)) = span else {
            continue;
        };

        queue!(out, cursor::MoveTo(start as u16, y))?;
        for cell in &row[start..end] {
            pen.switch(out, cell.style)?;
            queue!(out, Print(cell.ch))?;
        }
    }

    if pen.used() {
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// First and one-past-last differing column; `None` when the rows match.
fn changed_span(old: &[Cell], new: &[Cell]) -> Option<(usize, usize)> {
    let start = old.iter().zip(new).position(|(a, b)| a != b)?;
    let from_end = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .position(|(a, b)| a != b)
        .unwrap_or(0);
    Some((start, new.len() - from_end))
}

/// Style last sent to the terminal. Only the parts that change are re-sent.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn switch(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let last = self.current.replace(style);
        if last == Some(style) {
            return Ok(());
        }
        if last.map(|s| s.fg) != Some(style.fg) {
            queue!(out, SetForegroundColor(color(style.fg)))?;
        }
        if last.map(|s| s.bg) != Some(style.bg) {
            queue!(out, SetBackgroundColor(color(style.bg)))?;
        }
        if last.map(|s| s.weight) != Some(style.weight) {
            queue!(out, SetAttribute(Attribute::NormalIntensity))?;
            match style.weight {
                Weight::Normal => {}
                Weight::Bold => queue!(out, SetAttribute(Attribute::Bold))?,
                Weight::Dim => queue!(out, SetAttribute(Attribute::Dim))?,
            }
        }
        Ok(())
    }

    fn used(&self) -> bool {
        self.current.is_some()
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
