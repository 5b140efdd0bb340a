//! Touch mapping for pointer-style hosts.
//!
//! The play surface is split into thirds: a tap on the left third moves
//! left, the right third moves right, the middle rotates. Lifting the finger
//! hard drops. Any tap before the game has started starts it.

use crate::types::{GameCommand, LifecycleState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Finger down at `x` on a surface `width` wide (same units)
    Start { x: f32, width: f32 },
    /// Finger lifted
    End,
}

pub fn handle_touch_event(event: TouchEvent, state: LifecycleState) -> Option<GameCommand> {
    match (state, event) {
        (LifecycleState::NotStarted, TouchEvent::Start { .. }) => Some(GameCommand::Start),
        (LifecycleState::Playing, TouchEvent::Start { x, width }) => {
            let third = width / 3.0;
            if x < third {
                Some(GameCommand::MoveLeft)
            } else if x > third * 2.0 {
                Some(GameCommand::MoveRight)
            } else {
                Some(GameCommand::Rotate)
            }
        }
        (LifecycleState::Playing, TouchEvent::End) => Some(GameCommand::HardDrop),
        _ => None,
    }
}
