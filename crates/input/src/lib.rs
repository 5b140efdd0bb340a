//! Input adapters (engine-facing).
//!
//! Decoding only: keyboard and touch events become [`GameCommand`]s for the
//! current lifecycle state. Nothing here touches game state.

pub mod map;
pub mod touch;

pub use block_arcade_types as types;
pub use types::GameCommand;

pub use map::{handle_key_event, should_quit};
pub use touch::{handle_touch_event, TouchEvent};
