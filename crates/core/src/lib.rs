//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game and nothing else.
//! It has no dependency on a terminal, a clock, or persistent storage:
//! time comes in as frame timestamps and randomness and high scores come in
//! through injected collaborators.
//!
//! # Module Structure
//!
//! - [`board`]: settled cells, merging and full-row clearing
//! - [`pieces`]: the seven shapes, spawn placement and clockwise rotation
//! - [`collision`]: walls, floor and occupied-cell checks
//! - [`scoring`]: line clear points, levels and the drop interval curve
//! - [`lifecycle`]: NotStarted / Playing / Paused / GameOver transitions
//! - [`game_state`]: the simulation (move, rotate, drop, land, respawn)
//! - [`scheduler`]: frame-driven fixed-timestep pacing
//! - [`game_loop`]: state + scheduler + high score side effects
//! - [`rng`]: the [`PieceSource`] capability and its implementations
//! - [`highscore`]: the [`HighScoreStore`] capability
//!
//! # Example
//!
//! ```
//! use block_arcade_core::{GameLoop, LifecycleState};
//!
//! let mut game = GameLoop::new(12345);
//! game.start();
//! assert_eq!(game.lifecycle(), LifecycleState::Playing);
//!
//! // Frames drive automatic drops; the first one only records the time.
//! game.frame(0);
//! assert!(game.frame(1001));
//!
//! game.hard_drop();
//! assert_eq!(game.state().board().filled_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_loop;
pub mod game_state;
pub mod highscore;
pub mod lifecycle;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use block_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MergeOutcome};
pub use collision::{collides, drop_distance, landing_position};
pub use config::GameConfig;
pub use game_loop::GameLoop;
pub use game_state::{GameState, LandingEvent};
pub use highscore::{load_high_score, HighScoreStore, MemoryStore};
pub use lifecycle::Lifecycle;
pub use pieces::{Piece, Shape};
pub use rng::{FixedSequence, PieceSource, RandSource, SimpleRng};
pub use scheduler::{ScheduleHandle, TickScheduler};
pub use scoring::{score_clear, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use types::{GameCommand, GameId, LifecycleState, PieceKind};
