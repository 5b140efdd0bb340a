//! Pieces module tests - spawn matrices, spawn placement and rotation

use block_arcade::core::collision::{collides, drop_distance, landing_position};
use block_arcade::core::{Board, Piece, Shape};
use block_arcade::types::{PieceKind, Rotation, BOARD_WIDTH};

fn shape(rows: &[&[u8]]) -> Shape {
    Shape::from_rows(rows).unwrap()
}

// ============== Shape Tests ==============

#[test]
fn test_i_piece_rotation_cycle() {
    let north = Shape::spawn(PieceKind::I);
    assert_eq!(
        north,
        shape(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]])
    );

    let east = north.rotated();
    assert_eq!(
        east,
        shape(&[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]])
    );

    let south = east.rotated();
    assert_eq!(
        south,
        shape(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0]])
    );

    let west = south.rotated();
    assert_eq!(
        west,
        shape(&[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]])
    );
}

#[test]
fn test_o_piece_rotation_is_identity() {
    let o = Shape::spawn(PieceKind::O);
    assert_eq!(o, shape(&[&[4, 4], &[4, 4]]));
    assert_eq!(o.rotated(), o);
}

#[test]
fn test_t_piece_points_right_after_rotation() {
    let t = Shape::spawn(PieceKind::T);
    assert_eq!(t, shape(&[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]]));
    assert_eq!(t.rotated(), shape(&[&[0, 6, 0], &[0, 6, 6], &[0, 6, 0]]));
}

#[test]
fn test_j_piece_rotation() {
    let j = Shape::spawn(PieceKind::J);
    assert_eq!(j, shape(&[&[2, 0, 0], &[2, 2, 2], &[0, 0, 0]]));
    assert_eq!(j.rotated(), shape(&[&[0, 2, 2], &[0, 2, 0], &[0, 2, 0]]));
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in PieceKind::ALL {
        let spawn = Shape::spawn(kind);
        let turned = spawn.rotated().rotated().rotated().rotated();
        assert_eq!(turned, spawn, "{kind:?}");
    }
}

#[test]
fn test_every_shape_has_four_cells_in_its_color() {
    for kind in PieceKind::ALL {
        let cells: Vec<_> = Shape::spawn(kind).occupied().collect();
        assert_eq!(cells.len(), 4, "{kind:?}");
        assert!(cells.iter().all(|&(_, _, c)| c == kind.color_index()));
    }
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_is_centered_on_row_zero() {
    let expected = [
        (PieceKind::I, 3),
        (PieceKind::J, 4),
        (PieceKind::L, 4),
        (PieceKind::O, 4),
        (PieceKind::S, 4),
        (PieceKind::T, 4),
        (PieceKind::Z, 4),
    ];
    for (kind, x) in expected {
        let piece = Piece::spawn(kind, BOARD_WIDTH);
        assert_eq!((piece.x(), piece.y()), (x, 0), "{kind:?}");
        assert_eq!(piece.rotation(), Rotation::North);
    }
}

#[test]
fn test_piece_rotation_tracks_orientation() {
    let piece = Piece::spawn(PieceKind::T, BOARD_WIDTH);
    let turned = piece.rotated();
    assert_eq!(turned.rotation(), Rotation::East);
    assert_eq!((turned.x(), turned.y()), (piece.x(), piece.y()));
    assert_eq!(turned.rotated().rotated().rotated().rotation(), Rotation::North);
}

// ============== Collision Tests ==============

#[test]
fn test_walls_and_floor_collide() {
    let board = Board::default();
    let o = Piece::spawn(PieceKind::O, BOARD_WIDTH);

    assert!(!collides(&board, &o));
    assert!(collides(&board, &o.translated(-5, 0)));
    assert!(collides(&board, &o.translated(5, 0)));
    assert!(collides(&board, &o.translated(0, 19)));
    assert!(!collides(&board, &o.translated(0, 18)));
}

#[test]
fn test_rows_above_board_do_not_collide() {
    let board = Board::default();
    let o = Piece::spawn(PieceKind::O, BOARD_WIDTH).translated(0, -3);
    assert!(!collides(&board, &o));
}

#[test]
fn test_landing_position_rests_on_stack() {
    let mut board = Board::default();
    board.set(4, 10, 1);
    let o = Piece::spawn(PieceKind::O, BOARD_WIDTH);

    assert_eq!(drop_distance(&board, &o), 8);
    let landed = landing_position(&board, &o);
    assert_eq!(landed.y(), 8);
    assert!(collides(&board, &landed.translated(0, 1)));
}
