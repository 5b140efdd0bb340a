//! Collision detection between the active piece and the board.
//!
//! Pure queries only: every mutating operation builds a candidate piece, asks
//! [`collides`], and commits the candidate only when the answer is `false`.

use crate::board::Board;
use crate::pieces::{Piece, MAX_SHAPE_DIM};

/// True when any occupied cell of `piece` is outside `[0, width)`, at or
/// below the floor, or on a filled board cell.
///
/// Cells above the top edge (row < 0) are not checked against the board so
/// that pieces may spawn partly off-screen; they are still checked against
/// the side walls.
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece.cells().iter().any(|&(x, y, _)| {
        x < 0
            || x as u8 >= board.width()
            || (y >= 0 && y as u8 >= board.height())
            || (y >= 0 && board.is_occupied(x, y))
    })
}

/// Rows the piece can still fall before it would collide.
pub fn drop_distance(board: &Board, piece: &Piece) -> i8 {
    // A shape without cells never collides; bound the scan by the board.
    let limit = board.height() as i8 + MAX_SHAPE_DIM as i8;
    let mut distance = 0;
    while distance < limit && !collides(board, &piece.translated(0, distance + 1)) {
        distance += 1;
    }
    distance
}

/// Final resting place of a straight drop.
pub fn landing_position(board: &Board, piece: &Piece) -> Piece {
    piece.translated(0, drop_distance(board, piece))
}
