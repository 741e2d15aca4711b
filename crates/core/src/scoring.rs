//! Scoring module - points, levels and gravity speed
//!
//! - Drop points accrue as the piece moves: 1 per soft-dropped cell, 2 per
//!   hard-dropped cell.
//! - Line clears add a flat bonus from [`LINE_SCORES`] (100/300/500/800); the
//!   bonus does not scale with level.
//! - Level is `lines / 10 + 1` and selects the gravity interval.

use crate::types::{
    DROP_SPEEDS_MS, DROP_SPEED_MIN_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Bonus for clearing `lines` rows at once (0 for anything outside 1..=4).
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Total points for one placement: drop points plus the line-clear bonus.
pub fn calculate_score(lines_cleared: usize, is_hard_drop: bool, drop_distance: u32) -> u32 {
    drop_score(drop_distance, is_hard_drop).saturating_add(line_clear_score(lines_cleared))
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds)
///
/// Levels below 1 are treated as level 1; past the table the interval stays
/// at [`DROP_SPEED_MIN_MS`].
pub fn drop_speed_ms(level: u32) -> u32 {
    let index = level.max(1) as usize - 1;
    DROP_SPEEDS_MS
        .get(index)
        .copied()
        .unwrap_or(DROP_SPEED_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
        assert_eq!(line_clear_score(5), 0);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(drop_score(10, false), 10); // Soft drop 10 cells
        assert_eq!(drop_score(10, true), 20); // Hard drop 10 cells
        assert_eq!(drop_score(0, true), 0);
    }

    #[test]
    fn test_calculate_score_combines_drop_and_bonus() {
        assert_eq!(calculate_score(0, true, 18), 36);
        assert_eq!(calculate_score(1, true, 18), 136);
        assert_eq!(calculate_score(4, false, 3), 803);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_speeds() {
        assert_eq!(drop_speed_ms(0), 1000);
        assert_eq!(drop_speed_ms(1), 1000);
        assert_eq!(drop_speed_ms(2), 800);
        assert_eq!(drop_speed_ms(9), 150);
        assert_eq!(drop_speed_ms(10), 100);
        assert_eq!(drop_speed_ms(11), 100);
        assert_eq!(drop_speed_ms(500), 100);
    }

    #[test]
    fn test_drop_speed_never_increases_with_level() {
        let mut previous = drop_speed_ms(1);
        for level in 2..40 {
            let current = drop_speed_ms(level);
            assert!(current <= previous, "level {level}");
            previous = current;
        }
    }
}
