//! Board tests - grid, merge and line clearing

use block_arcade::core::{Board, Piece, Shape};
use block_arcade::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

fn fill_row(board: &mut Board, y: i8, color: u8) {
    for x in 0..board.width() as i8 {
        board.set(x, y, color);
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(EMPTY), "cell ({x}, {y}) should be empty");
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, PieceKind::T.color_index()));
    assert_eq!(board.get(5, 10), Some(6));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, EMPTY));
    assert!(!board.is_occupied(5, 10));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::default();

    assert!(!board.set(-1, 0, 1));
    assert!(!board.set(0, -1, 1));
    assert!(!board.set(BOARD_WIDTH as i8, 0, 1));
    assert!(!board.set(0, BOARD_HEIGHT as i8, 1));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_from_rows_rejects_ragged_input() {
    assert!(Board::from_rows(&[vec![0, 1], vec![0]]).is_none());
    assert!(Board::from_rows(&[]).is_none());
    assert!(Board::from_rows(&[vec![]]).is_none());

    let board = Board::from_rows(&[vec![0, 1, 0], vec![2, 2, 2]]).unwrap();
    assert_eq!((board.width(), board.height()), (3, 2));
    assert!(board.is_row_full(1));
    assert!(!board.is_row_full(0));
}

#[test]
fn test_merge_writes_piece_colors() {
    let mut board = Board::default();
    let piece = Piece::spawn(PieceKind::O, BOARD_WIDTH).translated(0, 18);

    let outcome = board.merge(&piece);

    assert_eq!(outcome.written, 4);
    assert_eq!(outcome.dropped, 0);
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(board.get(x, y), Some(PieceKind::O.color_index()));
    }
}

#[test]
fn test_merge_drops_cells_above_top() {
    let mut board = Board::default();
    // Vertical I with its top two cells above row 0.
    let shape = Shape::spawn(PieceKind::I).rotated();
    let piece = Piece::new(PieceKind::I, shape, 0, -2);

    let outcome = board.merge(&piece);

    assert_eq!(outcome.written, 2);
    assert_eq!(outcome.dropped, 2);
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_single_line() {
    let mut board = Board::default();
    fill_row(&mut board, 19, 1);
    board.set(3, 18, 5);

    assert_eq!(board.clear_full_rows(), 1);

    // The lone cell above moves down by one.
    assert_eq!(board.get(3, 19), Some(5));
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.row(0), Some(&[EMPTY; 10][..]));
}

#[test]
fn test_clear_non_adjacent_lines() {
    let mut board = Board::default();
    fill_row(&mut board, 19, 1);
    board.set(0, 18, 2);
    fill_row(&mut board, 17, 3);
    board.set(9, 16, 4);

    assert_eq!(board.clear_full_rows(), 2);

    assert_eq!(board.get(0, 19), Some(2));
    assert_eq!(board.get(9, 18), Some(4));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_four_lines_keeps_height() {
    let mut board = Board::default();
    for y in 16..20 {
        fill_row(&mut board, y, 1);
    }

    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.rows().count(), BOARD_HEIGHT as usize);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_clear_every_row() {
    let mut board = Board::new(4, 6);
    for y in 0..6 {
        fill_row(&mut board, y, 7);
    }

    // More than four rows at once is still just a count.
    assert_eq!(board.clear_full_rows(), 6);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut board = Board::default();
    board.set(0, 19, 1);
    let before = board.clone();

    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}
