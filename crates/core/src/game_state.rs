//! Game state module - the falling-piece simulation
//!
//! Owns the board, the active piece, score/level/lines and the lifecycle.
//! Every operation is a synchronous step over this state; nothing in here
//! knows about time or rendering (see [`crate::game_loop`] for pacing).
//!
//! A landing runs the full cycle in order: merge, clear full rows, apply the
//! scoring policy, spawn the next piece. A spawn that collides immediately is
//! the one and only game-over trigger.

use anyhow::{ensure, Result};

use crate::board::Board;
use crate::collision::{collides, landing_position};
use crate::config::GameConfig;
use crate::lifecycle::Lifecycle;
use crate::pieces::Piece;
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::{score_clear, tick_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameCommand, LifecycleState, START_LEVEL};

/// What happened on the last landing (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingEvent {
    pub lines_cleared: u32,
    pub points: u32,
    /// Level after the clear was applied
    pub level: u32,
    pub leveled_up: bool,
    /// Piece cells that were still above the board when it landed
    pub dropped_cells: u32,
    /// The follow-up spawn had no room
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    /// Layout every new game starts from (empty unless preset).
    initial_board: Board,
    board: Board,
    active: Option<Piece>,
    lifecycle: Lifecycle,
    source: R,
    score: u32,
    level: u32,
    lines: u32,
    tick_interval_ms: u32,
    /// Monotonic count of spawned pieces across the session.
    piece_id: u32,
    /// Increments on restart.
    episode_id: u32,
    last_event: Option<LandingEvent>,
}

impl GameState<SimpleRng> {
    /// Standard 10x20 game drawing pieces from a seeded LCG.
    pub fn new(seed: u32) -> Self {
        Self::from_parts(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: PieceSource> GameState<R> {
    /// Build a game from a configuration and a piece source.
    ///
    /// Fails fast on an invalid configuration.
    pub fn with_source(config: GameConfig, source: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, source))
    }

    fn from_parts(config: GameConfig, source: R) -> Self {
        let board = Board::new(config.width, config.height);
        Self {
            config,
            initial_board: board.clone(),
            board,
            active: None,
            lifecycle: Lifecycle::new(),
            source,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            tick_interval_ms: tick_interval_ms(&config, START_LEVEL),
            piece_id: 0,
            episode_id: 0,
            last_event: None,
        }
    }

    /// Start every game from `board` instead of an empty grid.
    ///
    /// The board must match the configured dimensions.
    pub fn with_initial_board(mut self, board: Board) -> Result<Self> {
        ensure!(
            board.width() == self.config.width && board.height() == self.config.height,
            "initial board is {}x{}, expected {}x{}",
            board.width(),
            board.height(),
            self.config.width,
            self.config.height
        );
        if self.lifecycle.state() == LifecycleState::NotStarted {
            self.board = board.clone();
        }
        self.initial_board = board;
        Ok(self)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Take and clear the last landing event.
    pub fn take_last_event(&mut self) -> Option<LandingEvent> {
        self.last_event.take()
    }

    /// Begin a game: fresh board and counters, first piece spawned.
    pub fn start(&mut self) -> bool {
        if !self.lifecycle.start() {
            return false;
        }
        self.reset_world();
        log::info!("game {} started", self.episode_id);
        self.spawn_piece();
        true
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.lifecycle.pause();
        if paused {
            log::debug!("paused at score {}", self.score);
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.lifecycle.resume();
        if resumed {
            log::debug!("resumed");
        }
        resumed
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    /// Abandon the current game and return to not-started with everything reset.
    pub fn restart(&mut self) -> bool {
        if !self.lifecycle.restart() {
            return false;
        }
        self.reset_world();
        self.episode_id = self.episode_id.wrapping_add(1);
        log::info!("restarted, next game is {}", self.episode_id);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate 90° clockwise in place. A rotation that would collide is
    /// dropped and the piece keeps its shape and position.
    pub fn rotate(&mut self) -> bool {
        if !self.lifecycle.state().is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.rotated();
        if collides(&self.board, &candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Player-requested single step down.
    pub fn soft_drop(&mut self) -> bool {
        self.step_down()
    }

    /// Automatic step down, paced by the game loop.
    pub fn tick(&mut self) -> bool {
        self.step_down()
    }

    /// Fall to the lowest legal row and land there.
    pub fn hard_drop(&mut self) -> bool {
        if !self.lifecycle.state().is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.active = Some(landing_position(&self.board, &active));
        self.land();
        true
    }

    /// Whether the lifecycle lets `command` through in the current state.
    pub fn accepts(&self, command: GameCommand) -> bool {
        self.lifecycle.accepts(command)
    }

    /// Dispatch a command. Returns whether it was accepted.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        if !self.accepts(command) {
            log::trace!("{} ignored while {}", command.as_str(), self.state().as_str());
            return false;
        }
        match command {
            GameCommand::Start => self.start(),
            GameCommand::Pause => self.pause(),
            GameCommand::Resume => self.resume(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Restart => self.restart(),
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.state = self.lifecycle.state();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.tick_interval_ms = self.tick_interval_ms;
        out.piece_id = self.piece_id;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// One step down; a blocked step lands the piece. Returns false only
    /// when there is nothing to move.
    fn step_down(&mut self) -> bool {
        if !self.lifecycle.state().is_running() || self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.land();
        }
        true
    }

    /// Try to translate the active piece; a colliding move is discarded.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.lifecycle.state().is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.translated(dx, dy);
        if collides(&self.board, &candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Merge, clear, score, respawn.
    fn land(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let merged = self.board.merge(&active);
        let cleared = self.board.clear_full_rows();

        let result = score_clear(
            &self.config,
            cleared,
            self.level,
            self.lines,
            self.tick_interval_ms,
        );
        self.score = self.score.saturating_add(result.points);
        self.lines = result.total_lines;
        self.level = result.level;
        self.tick_interval_ms = result.tick_interval_ms;

        if cleared > 0 {
            log::debug!(
                "cleared {} line(s) for {} points, score {}",
                cleared,
                result.points,
                self.score
            );
        }
        if result.leveled_up {
            log::info!(
                "level {} reached, drop interval {}ms",
                self.level,
                self.tick_interval_ms
            );
        }

        let spawned = self.spawn_piece();

        self.last_event = Some(LandingEvent {
            lines_cleared: cleared as u32,
            points: result.points,
            level: self.level,
            leveled_up: result.leveled_up,
            dropped_cells: merged.dropped as u32,
            game_over: !spawned,
        });
    }

    /// Draw the next kind and place it centered on row 0.
    ///
    /// Returns false (and ends the game) when the new piece has no room.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_kind();
        let piece = Piece::spawn(kind, self.board.width());
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if collides(&self.board, &piece) {
            self.lifecycle.end();
            log::info!(
                "game over: no room to spawn {:?}, final score {} at level {}",
                kind,
                self.score,
                self.level
            );
            return false;
        }
        true
    }

    fn reset_world(&mut self) {
        self.board = self.initial_board.clone();
        self.active = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.tick_interval_ms = tick_interval_ms(&self.config, START_LEVEL);
        self.last_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSequence;
    use crate::types::PieceKind;

    fn game_with(kinds: &[PieceKind]) -> GameState<FixedSequence> {
        GameState::with_source(
            GameConfig::default(),
            FixedSequence::new(kinds.to_vec()).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.state(), LifecycleState::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.tick_interval_ms, 1000);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_game_start_spawns_piece() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(state.start());
        assert_eq!(state.state(), LifecycleState::Playing);
        let active = state.active.unwrap();
        assert_eq!(active.kind(), PieceKind::T);
        assert_eq!((active.x(), active.y()), (4, 0));
        assert_eq!(state.piece_id, 1);

        // Second start is rejected.
        assert!(!state.start());
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut state = GameState::new(1);
        assert!(!state.move_left());
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert!(!state.hard_drop());
        assert!(!state.tick());
        assert!(state.active.is_none());
    }

    #[test]
    fn test_try_move() {
        let mut state = game_with(&[PieceKind::T]);
        state.start();
        let initial_x = state.active.unwrap().x();

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x(), initial_x + 1);
        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x(), initial_x);

        // Rows above the board are not blocked.
        assert!(state.try_move(0, -1));
    }

    #[test]
    fn test_try_move_stops_at_wall() {
        let mut state = game_with(&[PieceKind::O]);
        state.start();

        let moved = (0..10).filter(|_| state.move_left()).count();
        // O spawns at x = 4 and is two wide.
        assert_eq!(moved, 4);
        assert_eq!(state.active.unwrap().x(), 0);
    }

    #[test]
    fn test_soft_drop_lands_on_floor() {
        let mut state = game_with(&[PieceKind::O]);
        state.start();

        for _ in 0..18 {
            assert!(state.soft_drop());
        }
        assert_eq!(state.active.unwrap().y(), 18);
        assert_eq!(state.piece_id, 1);

        // Blocked step lands and respawns.
        assert!(state.soft_drop());
        assert_eq!(state.piece_id, 2);
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.active.unwrap().y(), 0);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.game_over);
    }

    #[test]
    fn test_hard_drop_lands_at_bottom() {
        let mut state = game_with(&[PieceKind::I]);
        state.start();

        assert!(state.hard_drop());

        for x in 3..7 {
            assert_eq!(state.board.get(x, 19), Some(PieceKind::I.color_index()));
        }
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_rotate_blocked_by_wall_keeps_piece() {
        let mut state = game_with(&[PieceKind::I]);
        state.start();
        // Stand the bar up (column 2 of the 4x4 box) and push it to the left wall.
        assert!(state.rotate());
        while state.move_left() {}
        let before = state.active.unwrap();
        assert_eq!(before.x(), -2);

        // Lying down again would need columns -2..2.
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_pause_blocks_movement() {
        let mut state = game_with(&[PieceKind::T]);
        state.start();
        assert!(state.pause());
        let before = state.active;

        assert!(!state.move_left());
        assert!(!state.rotate());
        assert!(!state.tick());
        assert!(!state.hard_drop());
        assert_eq!(state.active, before);

        assert!(state.resume());
        assert!(state.move_left());
    }

    #[test]
    fn test_apply_goes_through_lifecycle() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(!state.accepts(GameCommand::Rotate));
        assert!(!state.apply(GameCommand::Rotate));
        assert!(state.apply(GameCommand::Start));
        assert!(!state.accepts(GameCommand::Start));

        assert!(state.apply(GameCommand::Pause));
        assert!(!state.accepts(GameCommand::MoveLeft));
        assert!(!state.apply(GameCommand::MoveLeft));
        assert!(state.apply(GameCommand::Restart));
        assert_eq!(state.state(), LifecycleState::NotStarted);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = game_with(&[PieceKind::I]);
        state.start();
        state.hard_drop();
        state.score = 500;
        state.level = 3;
        state.lines = 25;

        assert!(state.restart());

        assert_eq!(state.state(), LifecycleState::NotStarted);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.tick_interval_ms, 1000);
        assert_eq!(state.episode_id, 1);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut board = Board::default();
        for x in 0..9 {
            board.set(x, 0, 1);
            board.set(x, 1, 1);
        }
        let mut state = game_with(&[PieceKind::O])
            .with_initial_board(board)
            .unwrap();

        assert!(state.start());
        assert_eq!(state.state(), LifecycleState::GameOver);
        assert!(!state.move_left());
        assert!(!state.hard_drop());
    }

    #[test]
    fn test_initial_board_dimension_check() {
        let state = GameState::new(1);
        assert!(state.with_initial_board(Board::new(4, 4)).is_err());
    }

    #[test]
    fn test_with_source_rejects_bad_config() {
        let config = GameConfig {
            width: 2,
            ..GameConfig::default()
        };
        assert!(GameState::with_source(config, SimpleRng::new(1)).is_err());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = game_with(&[PieceKind::L]);
        state.start();
        let snap = state.snapshot();

        assert_eq!((snap.width, snap.height), (10, 20));
        assert_eq!(snap.board.len(), 200);
        assert_eq!(snap.state, LifecycleState::Playing);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::L);
        // L spawn matrix puts its corner at column 2 of the box.
        assert_eq!(snap.composed_cell(active.x + 2, 0), 3);
        assert_eq!(snap.cell(active.x + 2, 0), 0);
    }
}
