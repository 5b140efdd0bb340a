//! Scoring module - line clear points, leveling and the speed curve
//!
//! Classic rules:
//! - Line clear points come from [`LINE_SCORES`] and are multiplied by the
//!   level in effect *before* the clear is applied.
//! - `level = total_lines / lines_per_level + 1`.
//! - When the level goes up the drop interval becomes
//!   `max(floor, base - (level - 1) * step)`.

use crate::config::GameConfig;
use crate::types::LINE_SCORES;

/// Result of applying one landing's line clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    /// Points added to the score
    pub points: u32,
    /// Running total of lines after this clear
    pub total_lines: u32,
    pub level: u32,
    /// Whether this clear raised the level
    pub leveled_up: bool,
    /// Automatic drop interval for the (possibly new) level
    pub tick_interval_ms: u32,
}

/// Points for removing `lines` rows at once (0 for anything outside 1..=4)
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Level for a running line total (levels start at 1)
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// Automatic drop interval for a level, bounded below by the floor
pub fn tick_interval_ms(config: &GameConfig, level: u32) -> u32 {
    let reduction = level
        .saturating_sub(1)
        .saturating_mul(config.interval_step_ms);
    config
        .base_interval_ms
        .saturating_sub(reduction)
        .max(config.floor_interval_ms)
}

/// Apply the policy for one landing.
///
/// `current_interval_ms` is kept unless the level goes up, so the interval
/// only ever changes on a level increase.
pub fn score_clear(
    config: &GameConfig,
    lines_removed: usize,
    level: u32,
    total_lines: u32,
    current_interval_ms: u32,
) -> ScoreResult {
    let points = line_clear_points(lines_removed, level);
    let total_lines = total_lines.saturating_add(lines_removed as u32);
    let new_level = level_for_lines(total_lines, config.lines_per_level).max(level);
    let leveled_up = new_level > level;

    ScoreResult {
        points,
        total_lines,
        level: new_level,
        leveled_up,
        tick_interval_ms: if leveled_up {
            tick_interval_ms(config, new_level)
        } else {
            current_interval_ms
        },
    }
}
