//! Board module - the grid of settled cells
//!
//! The board is a `width x height` grid of color indices (`0` = empty).
//! Uses a flat row-major array for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! The board is only ever mutated by [`Board::merge`] (settling a piece) and
//! [`Board::clear_full_rows`] (removing completed rows). Every cell holds
//! `EMPTY` or a piece color index; constructors and [`Board::set`] refuse
//! anything else.

use crate::pieces::Piece;
use crate::types::{is_valid_cell, Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Result of settling a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Cells written into the board
    pub written: usize,
    /// Cells still above row 0, dropped instead of written
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions are fixed for the board's lifetime.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    /// Build a board from explicit rows (top row first).
    ///
    /// Returns `None` when the rows are ragged or empty, or a cell is not a
    /// color index.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let height = u8::try_from(rows.len()).ok()?;
        let width = u8::try_from(rows.first()?.len()).ok()?;
        if width == 0 || rows.iter().any(|row| row.len() != width as usize) {
            return None;
        }
        if !rows.iter().flatten().all(|&cell| is_valid_cell(cell)) {
            return None;
        }

        let cells = rows.iter().flatten().copied().collect();
        Some(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or `cell` is not a color index
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) if is_valid_cell(cell) => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell != EMPTY)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// Cells of row `y`, or `None` past the floor.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Settle a piece: write its color into every occupied cell at row >= 0.
    ///
    /// Cells above the top edge are dropped rather than written; a landing
    /// that drops cells means the stack has reached the top.
    pub fn merge(&mut self, piece: &Piece) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for (x, y, cell) in piece.cells() {
            if y < 0 {
                outcome.dropped += 1;
                continue;
            }
            if self.set(x, y, cell) {
                outcome.written += 1;
            }
        }
        outcome
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top; surviving rows are compacted downwards
    /// in place (two-pointer, no allocation) and the freed rows at the top are
    /// emptied, so the height never changes.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
