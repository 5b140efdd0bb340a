//! Integration tests for the game loop: lifecycle, landing cycle, pacing and
//! the high score hand-off.

use block_arcade::core::{
    Board, FixedSequence, GameCommand, GameConfig, GameId, GameLoop, GameState, HighScoreStore,
    Lifecycle, LifecycleState, MemoryStore,
};
use block_arcade::types::{PieceKind, EMPTY};

fn loop_with(kinds: &[PieceKind]) -> GameLoop<FixedSequence, MemoryStore> {
    GameLoop::with_parts(
        GameConfig::default(),
        FixedSequence::new(kinds.to_vec()).unwrap(),
        MemoryStore::new(),
    )
    .unwrap()
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameLoop::new(12345);
    assert_eq!(game.lifecycle(), LifecycleState::NotStarted);
    assert!(game.state().active().is_none());

    assert!(game.start());
    assert_eq!(game.lifecycle(), LifecycleState::Playing);
    assert!(game.state().active().is_some());

    assert!(game.pause());
    assert_eq!(game.lifecycle(), LifecycleState::Paused);
    assert!(game.resume());
    assert_eq!(game.lifecycle(), LifecycleState::Playing);

    assert!(game.restart());
    assert_eq!(game.lifecycle(), LifecycleState::NotStarted);
}

#[test]
fn test_rejected_commands_change_nothing() {
    let mut game = GameLoop::new(7);
    for command in GameCommand::ALL {
        if command == GameCommand::Start {
            continue;
        }
        let before = game.snapshot();
        assert!(!game.apply(command), "{command:?} accepted before start");
        assert_eq!(game.snapshot(), before);
    }
}

#[test]
fn test_apply_never_accepts_what_lifecycle_rejects() {
    let states = [
        LifecycleState::NotStarted,
        LifecycleState::Playing,
        LifecycleState::Paused,
    ];
    for target in states {
        for command in GameCommand::ALL {
            let mut game = GameLoop::new(99);
            if target != LifecycleState::NotStarted {
                game.start();
            }
            if target == LifecycleState::Paused {
                game.pause();
            }
            let before = game.snapshot();

            if !game.state().accepts(command) {
                assert!(!game.apply(command), "{command:?} in {target:?}");
                assert_eq!(game.snapshot(), before, "{command:?} in {target:?}");
            }
        }
    }
}

#[test]
fn test_gating_matches_standalone_lifecycle() {
    let mut lifecycle = Lifecycle::new();
    let mut game = GameLoop::new(5);
    for command in GameCommand::ALL {
        assert_eq!(game.state().accepts(command), lifecycle.accepts(command));
    }

    lifecycle.start();
    game.start();
    lifecycle.pause();
    game.pause();
    for command in GameCommand::ALL {
        assert_eq!(game.state().accepts(command), lifecycle.accepts(command));
    }
    assert!(!game.apply(GameCommand::HardDrop));
    assert!(game.apply(GameCommand::TogglePause));
    assert_eq!(game.lifecycle(), LifecycleState::Playing);
}

#[test]
fn test_square_stack_in_one_column_does_not_end_game() {
    let mut game = loop_with(&[PieceKind::O]);
    game.start();

    for _ in 0..4 {
        assert!(game.hard_drop());
    }

    // Fifth piece spawned at the same column, eight rows of room left.
    assert_eq!(game.lifecycle(), LifecycleState::Playing);
    assert_eq!(game.state().piece_id(), 5);
    assert_eq!(game.state().board().filled_count(), 16);
    for y in 12..20 {
        assert!(game.state().board().is_occupied(4, y));
        assert!(game.state().board().is_occupied(5, y));
    }
    assert_eq!(game.state().score(), 0);
}

#[test]
fn test_completing_bottom_row_scores_single() {
    let mut game = loop_with(&[PieceKind::I]);
    game.start();

    // Horizontal bars across columns 0-3 and 4-7.
    for _ in 0..3 {
        game.move_left();
    }
    game.hard_drop();
    game.move_right();
    game.hard_drop();

    // Vertical bar in column 8.
    game.rotate();
    for _ in 0..3 {
        game.move_right();
    }
    assert_eq!(game.state().active().unwrap().x(), 6);
    game.hard_drop();
    assert_eq!(game.state().score(), 0);
    game.take_last_event();

    // Vertical bar in column 9 completes row 19.
    game.rotate();
    for _ in 0..4 {
        game.move_right();
    }
    game.hard_drop();

    let event = game.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.points, 40);
    assert_eq!(game.state().score(), 40);
    assert_eq!(game.state().lines(), 1);

    let board = game.state().board();
    assert_eq!(board.height(), 20);
    // Two columns of three cells remain, shifted down by one row.
    assert_eq!(board.filled_count(), 6);
    for y in 17..20 {
        assert!(board.is_occupied(8, y));
        assert!(board.is_occupied(9, y));
    }
    assert!(!board.is_occupied(0, 19));
}

#[test]
fn test_pause_freezes_and_resume_restarts_counter() {
    let mut game = loop_with(&[PieceKind::T]);
    game.start();
    game.frame(0);
    game.frame(800);

    game.pause();
    let y = game.state().active().unwrap().y();
    for t in [2_000, 5_000, 60_000] {
        assert!(!game.frame(t));
    }
    assert_eq!(game.state().active().unwrap().y(), y);

    game.resume();
    assert_eq!(game.scheduler().accumulated_ms(), 0);
    // Counting starts over: 800ms before the pause does not carry.
    assert!(!game.frame(61_000));
    assert!(!game.frame(61_900));
    assert!(!game.frame(62_000));
    assert!(game.frame(62_001));
    assert_eq!(game.state().active().unwrap().y(), y + 1);
}

#[test]
fn test_blocked_spawn_ends_game_without_new_high_score() {
    let mut near_full = Board::default();
    for y in 0..20 {
        for x in 0..9 {
            near_full.set(x, y, 1);
        }
    }
    let state = GameState::with_source(GameConfig::default(), FixedSequence::repeat(PieceKind::T))
        .unwrap()
        .with_initial_board(near_full)
        .unwrap();
    let store = MemoryStore::with_value(GameId::Tetris.high_score_key(), 250);
    let mut game = GameLoop::from_state(state, store);

    assert!(game.start());
    assert_eq!(game.lifecycle(), LifecycleState::GameOver);
    assert_eq!(game.store().writes(), 0);
    assert_eq!(game.store().get("tetrisHighScore"), Some(250));

    // Only restart is accepted now.
    assert!(!game.move_left());
    assert!(!game.pause());
    assert!(!game.start());
    assert!(game.restart());
    assert_eq!(game.lifecycle(), LifecycleState::NotStarted);
}

#[test]
fn test_restart_then_start_resets_world() {
    let mut game = loop_with(&[PieceKind::O]);
    game.start();
    game.hard_drop();
    game.hard_drop();
    assert_eq!(game.state().board().filled_count(), 8);

    game.restart();
    assert_eq!(game.state().board().filled_count(), 0);
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().level(), 1);

    game.start();
    assert_eq!(game.state().board().filled_count(), 0);
    assert_eq!(game.state().episode_id(), 1);
}

#[test]
fn test_level_up_shortens_interval() {
    // Narrow board: one horizontal I clears a row.
    let config = GameConfig {
        width: 4,
        height: 8,
        lines_per_level: 2,
        ..GameConfig::default()
    };
    let mut game = GameLoop::with_parts(config, FixedSequence::repeat(PieceKind::I), MemoryStore::new()).unwrap();
    game.start();
    assert_eq!(game.state().tick_interval_ms(), 1000);

    game.hard_drop();
    assert_eq!(game.state().score(), 40);
    assert_eq!(game.state().level(), 1);

    game.hard_drop();
    // Second clear still scores at level 1, then the level goes up.
    assert_eq!(game.state().score(), 80);
    assert_eq!(game.state().level(), 2);
    assert_eq!(game.state().tick_interval_ms(), 900);

    game.hard_drop();
    assert_eq!(game.state().score(), 160);
}

#[test]
fn test_preset_board_only_takes_piece_colors() {
    let mut rows = vec![vec![EMPTY; 10]; 20];
    rows[19][0] = 200;
    assert!(Board::from_rows(&rows).is_none());

    let mut board = Board::default();
    assert!(!board.set(0, 19, 200));
    assert!(board.set(1, 19, PieceKind::T.color_index()));

    let state = GameState::with_source(GameConfig::default(), FixedSequence::repeat(PieceKind::O))
        .unwrap()
        .with_initial_board(board)
        .unwrap();
    let mut game = GameLoop::from_state(state, MemoryStore::new());
    assert!(game.start());

    let snap = game.snapshot();
    assert_eq!(snap.cell(0, 19), EMPTY);
    assert_eq!(snap.cell(1, 19), PieceKind::T.color_index());
    assert!(snap
        .board
        .iter()
        .all(|&cell| cell == EMPTY || PieceKind::from_color_index(cell).is_some()));
}
