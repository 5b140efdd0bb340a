//! Game loop - pacing, lifecycle side effects and the high score
//!
//! [`GameLoop`] wraps a [`GameState`] with the pieces that depend on the
//! outside world: a [`TickScheduler`] driven by host frame timestamps and a
//! [`HighScoreStore`]. The rules themselves stay in `GameState`.
//!
//! Side effects hang off lifecycle transitions:
//! - start: read the stored high score, arm the scheduler
//! - pause: cancel the schedule; resume: arm a fresh one
//! - restart: cancel, reset
//! - game over: cancel, persist the score if it beats the stored one

use anyhow::Result;

use crate::config::GameConfig;
use crate::game_state::{GameState, LandingEvent};
use crate::highscore::{load_high_score, HighScoreStore, MemoryStore};
use crate::rng::{PieceSource, SimpleRng};
use crate::scheduler::{ScheduleHandle, TickScheduler};
use crate::snapshot::GameSnapshot;
use crate::types::{GameCommand, GameId, LifecycleState};

#[derive(Debug)]
pub struct GameLoop<R = SimpleRng, S = MemoryStore> {
    game_id: GameId,
    state: GameState<R>,
    scheduler: TickScheduler,
    store: S,
    high_score: u32,
}

impl GameLoop<SimpleRng, MemoryStore> {
    /// Default-sized game with an in-memory store.
    pub fn new(seed: u32) -> Self {
        Self::from_state(GameState::new(seed), MemoryStore::new())
    }
}

impl<R: PieceSource, S: HighScoreStore> GameLoop<R, S> {
    pub fn with_parts(config: GameConfig, source: R, store: S) -> Result<Self> {
        Ok(Self::from_state(
            GameState::with_source(config, source)?,
            store,
        ))
    }

    pub fn from_state(state: GameState<R>, store: S) -> Self {
        let high_score = load_high_score(&store, GameId::Tetris);
        Self {
            game_id: GameId::Tetris,
            state,
            scheduler: TickScheduler::new(),
            store,
            high_score,
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state.state()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.high_score = load_high_score(&self.store, self.game_id);
        self.scheduler.arm();
        self.after_step();
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.state.pause() {
            return false;
        }
        self.scheduler.cancel();
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.state.resume() {
            return false;
        }
        self.scheduler.arm();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    pub fn restart(&mut self) -> bool {
        if !self.state.restart() {
            return false;
        }
        self.scheduler.cancel();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.state.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.state.move_right()
    }

    pub fn rotate(&mut self) -> bool {
        self.state.rotate()
    }

    /// Player step down. Restarts the automatic drop countdown.
    pub fn soft_drop(&mut self) -> bool {
        if !self.state.soft_drop() {
            return false;
        }
        self.scheduler.reset_counter();
        self.after_step();
        true
    }

    /// Player drop to the bottom. Restarts the automatic drop countdown.
    pub fn hard_drop(&mut self) -> bool {
        if !self.state.hard_drop() {
            return false;
        }
        self.scheduler.reset_counter();
        self.after_step();
        true
    }

    pub fn apply(&mut self, command: GameCommand) -> bool {
        if !self.state.accepts(command) {
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

    /// Host frame callback. Returns true when an automatic drop happened.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        match self.scheduler.handle() {
            Some(handle) => self.frame_for(handle, now_ms),
            None => false,
        }
    }

    /// The schedule a host callback should hold on to, `None` while not running.
    pub fn schedule_handle(&self) -> Option<ScheduleHandle> {
        self.scheduler.handle()
    }

    /// [`frame`](Self::frame) from a callback armed under `handle`. Callbacks
    /// that outlived a pause or restart find their handle released and do nothing.
    pub fn frame_for(&mut self, handle: ScheduleHandle, now_ms: u64) -> bool {
        if !self.state.state().is_running() {
            return false;
        }
        let interval_ms = self.state.tick_interval_ms();
        if !self.scheduler.advance_for(handle, now_ms, interval_ms) {
            return false;
        }
        self.state.tick();
        self.after_step();
        true
    }

    /// Last landing since the previous call.
    pub fn take_last_event(&mut self) -> Option<LandingEvent> {
        self.state.take_last_event()
    }

    /// Release the schedule when the host goes away. The store is left as is.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.scheduler.cancel() {
            log::debug!("released schedule {}", handle.id());
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
        out.high_score = self.high_score;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn after_step(&mut self) {
        if self.state.state() != LifecycleState::GameOver || !self.scheduler.is_armed() {
            return;
        }
        self.scheduler.cancel();

        let score = self.state.score();
        if score > self.high_score {
            log::info!("new high score {} (was {})", score, self.high_score);
            self.high_score = score;
            self.store.set(self.game_id.high_score_key(), score);
        }
    }
}
