//! Game configuration - board dimensions and the speed curve
//!
//! All values are fixed tuning; they are checked once when a game is built so
//! that nothing has to be re-validated at tick time.

use anyhow::{ensure, Result};

use crate::pieces::Shape;
use crate::types::{
    PieceKind, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS,
    LINES_PER_LEVEL,
};

/// Largest board side accepted. Piece coordinates are `i8`.
pub const MAX_BOARD_DIM: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Automatic drop interval at level 1
    pub base_interval_ms: u32,
    /// Lower bound of the automatic drop interval
    pub floor_interval_ms: u32,
    /// Interval reduction per level gained
    pub interval_step_ms: u32,
    pub lines_per_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            base_interval_ms: BASE_DROP_MS,
            floor_interval_ms: DROP_INTERVAL_FLOOR_MS,
            interval_step_ms: DROP_STEP_MS,
            lines_per_level: LINES_PER_LEVEL,
        }
    }
}

impl GameConfig {
    /// Fail fast on a configuration the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "board must have at least one cell, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.width <= MAX_BOARD_DIM && self.height <= MAX_BOARD_DIM,
            "board {}x{} exceeds the {}-cell limit",
            self.width,
            self.height,
            MAX_BOARD_DIM
        );
        ensure!(self.floor_interval_ms > 0, "floor interval must be positive");
        ensure!(
            self.floor_interval_ms <= self.base_interval_ms,
            "floor interval {}ms is above the base interval {}ms",
            self.floor_interval_ms,
            self.base_interval_ms
        );
        ensure!(self.lines_per_level > 0, "lines per level must be positive");

        for kind in PieceKind::ALL {
            let shape = Shape::spawn(kind);
            ensure!(
                shape.width() <= self.width && shape.height() <= self.height,
                "{:?} shape ({}x{}) does not fit a {}x{} board",
                kind,
                shape.width(),
                shape.height(),
                self.width,
                self.height
            );
        }

        Ok(())
    }
}
