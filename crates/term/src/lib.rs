//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders a
//! read-only [`GameSnapshot`](core::GameSnapshot) into a framebuffer and
//! flushes that to the terminal through crossterm.
//!
//! Rendering never mutates the game; the same snapshot always produces the
//! same framebuffer.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_arcade_core as core;
pub use block_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};
pub use game_view::{cell_color, piece_color, AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
