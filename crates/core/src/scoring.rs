//! Scoring module - line clear points, levels and gravity speed
//!
//! - Clearing 1/2/3/4 rows at once is worth 100/300/500/800 points, times the
//!   level the clear happened on.
//! - A hard drop is worth 2 points per row dropped.
//! - The level is `lines / 10 + 1`.
//! - Each level above 1 shortens the fall interval by 100ms, down to 100ms.

use crate::types::{
    FALL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES, MIN_FALL_MS,
};

/// Points for clearing `lines` rows at once on `level`.
///
/// Counts outside 1..=4 score nothing.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Points for a hard drop over `rows` rows
pub fn hard_drop_points(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level reached after clearing `total_lines` lines (starts at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Fall interval for a level, given the level-1 interval.
pub fn fall_interval_ms(base_fall_ms: u32, level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    base_fall_ms.saturating_sub(reduction).max(MIN_FALL_MS)
}
