use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, Shape};
use crate::types::{Cell, LifecycleState, PieceKind, Rotation, EMPTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub shape: Shape,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x: value.x(),
            y: value.y(),
            shape: *value.shape(),
        }
    }
}

/// Everything a presentation adapter may read in one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Settled cells, row-major, top row first
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub state: LifecycleState,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    pub tick_interval_ms: u32,
    pub piece_id: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Settled cell at (x, y); empty outside the board.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return EMPTY;
        }
        self.board[y as usize * self.width as usize + x as usize]
    }

    /// Settled cell with the active piece drawn over it.
    pub fn composed_cell(&self, x: i8, y: i8) -> Cell {
        if let Some(active) = &self.active {
            let (cx, cy) = (x - active.x, y - active.y);
            if cx >= 0 && cy >= 0 {
                let cell = active.shape.get(cx as usize, cy as usize);
                if cell != EMPTY {
                    return cell;
                }
            }
        }
        self.cell(x, y)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.board.chunks(self.width.max(1) as usize)
    }

    pub fn playable(&self) -> bool {
        self.state.is_running()
    }
}
