//! Key mapping from terminal events to game commands.
//!
//! What a key means depends on the lifecycle: Space starts a game that has
//! not started and hard drops during play; everything else is ignored until
//! the game runs.

use crate::types::{GameCommand, LifecycleState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a command for the current lifecycle state.
pub fn handle_key_event(key: KeyEvent, state: LifecycleState) -> Option<GameCommand> {
    match state {
        LifecycleState::NotStarted => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(GameCommand::Start),
            _ => None,
        },
        LifecycleState::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),
            _ => None,
        },
        LifecycleState::Paused => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::TogglePause),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),
            _ => None,
        },
        LifecycleState::Playing => playing_command(key.code),
    }
}

fn playing_command(code: KeyCode) -> Option<GameCommand> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameCommand::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameCommand::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameCommand::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameCommand::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameCommand::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
