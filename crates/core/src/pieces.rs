//! Pieces module - tetromino shape matrices and the active piece
//!
//! A shape is a small matrix of color indices (`0` = hole inside the bounding
//! box). Rotation transposes the matrix and reverses the row order, which
//! turns it 90° clockwise about its bounding box. There is no kick table: a
//! rotation either fits where the piece already is, or it does not happen.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{is_valid_cell, Cell, PieceKind, Rotation, EMPTY};

/// Largest side of a shape matrix (the I piece).
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupied cells of a piece in board coordinates: (x, y, color).
pub type PieceCells = ArrayVec<(i8, i8, Cell), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Immutable shape matrix, at most 4x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[Cell; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Spawn matrix of a catalog piece.
    pub fn spawn(kind: PieceKind) -> Self {
        let c = kind.color_index();
        let rows: &[&[Cell]] = match kind {
            PieceKind::I => &[&[0, 0, 0, 0], &[c, c, c, c], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            PieceKind::J => &[&[c, 0, 0], &[c, c, c], &[0, 0, 0]],
            PieceKind::L => &[&[0, 0, c], &[c, c, c], &[0, 0, 0]],
            PieceKind::O => &[&[c, c], &[c, c]],
            PieceKind::S => &[&[0, c, c], &[c, c, 0], &[0, 0, 0]],
            PieceKind::T => &[&[0, c, 0], &[c, c, c], &[0, 0, 0]],
            PieceKind::Z => &[&[c, c, 0], &[0, c, c], &[0, 0, 0]],
        };
        Self::fill(rows)
    }

    /// Build a shape from rows of equal length, top row first.
    ///
    /// Returns `None` for empty, ragged or larger-than-4x4 input, and for
    /// cells that are not piece colors.
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0
            || width > MAX_SHAPE_DIM
            || height > MAX_SHAPE_DIM
            || rows.iter().any(|row| row.len() != width)
            || !rows.iter().all(|row| row.iter().all(|&cell| is_valid_cell(cell)))
        {
            return None;
        }
        Some(Self::fill(rows))
    }

    fn fill(rows: &[&[Cell]]) -> Self {
        let mut cells = [[EMPTY; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..row.len()].copy_from_slice(row);
        }
        Self {
            width: rows.first().map_or(0, |row| row.len() as u8),
            height: rows.len() as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at matrix column `x`, row `y` (`0` outside the matrix).
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return EMPTY;
        }
        self.cells[y][x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells[..self.height as usize]
            .iter()
            .map(|row| &row[..self.width as usize])
    }

    /// 90° clockwise: row `r` of the result is column `r` read bottom-up.
    pub fn rotated(&self) -> Self {
        let mut cells = [[EMPTY; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let (w, h) = (self.width as usize, self.height as usize);
        for (r, out_row) in cells.iter_mut().enumerate().take(w) {
            for (c, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Occupied matrix cells as (column, row, color).
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8, Cell)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &cell)| cell != EMPTY)
                .map(move |(x, &cell)| (x as u8, y as u8, cell))
        })
    }
}

/// The falling, player-controlled piece.
///
/// The shape never changes in place; moves and rotations build a candidate
/// piece that the caller commits only if it does not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    rotation: Rotation,
    x: i8,
    y: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, shape: Shape, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// A fresh catalog piece centered horizontally on a board of `board_width`, at row 0.
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let shape = Shape::spawn(kind);
        let x = (board_width / 2) as i8 - (shape.width() / 2) as i8;
        Self::new(kind, shape, x, 0)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Same piece shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same position, shape turned 90° clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    /// Occupied cells in board coordinates
    pub fn cells(&self) -> PieceCells {
        self.shape
            .occupied()
            .map(|(cx, cy, cell)| (self.x + cx as i8, self.y + cy as i8, cell))
            .collect()
    }
}
