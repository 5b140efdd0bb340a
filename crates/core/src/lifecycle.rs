//! Lifecycle state machine shared by every game in the catalog.
//!
//! Transitions return `true` when taken and leave the state untouched
//! otherwise, so callers can attach side effects (spawning, scheduling,
//! persisting the high score) to exactly the transitions that happened.

use crate::types::{GameCommand, LifecycleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// NotStarted -> Playing
    pub fn start(&mut self) -> bool {
        self.transition(LifecycleState::NotStarted, LifecycleState::Playing)
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(LifecycleState::Playing, LifecycleState::Paused)
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        self.transition(LifecycleState::Paused, LifecycleState::Playing)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    /// Playing -> GameOver. Internal trigger only, never a player command.
    pub fn end(&mut self) -> bool {
        self.transition(LifecycleState::Playing, LifecycleState::GameOver)
    }

    /// Playing | Paused | GameOver -> NotStarted
    pub fn restart(&mut self) -> bool {
        if self.state == LifecycleState::NotStarted {
            return false;
        }
        self.state = LifecycleState::NotStarted;
        true
    }

    /// Whether `command` can have any effect in the current state.
    pub fn accepts(&self, command: GameCommand) -> bool {
        use GameCommand::*;
        use LifecycleState::*;

        match (self.state, command) {
            (NotStarted, Start) => true,
            (Playing, Pause | TogglePause | Restart) => true,
            (Playing, cmd) => cmd.is_piece_command(),
            (Paused, Resume | TogglePause | Restart) => true,
            (GameOver, Restart) => true,
            _ => false,
        }
    }

    fn transition(&mut self, from: LifecycleState, to: LifecycleState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }
}
