//! Scoring module - line-clear points, levels and gravity speed
//!
//! Rules:
//! - A lock that clears `n` rows awards `100 * n²` (1 → 100, 2 → 400,
//!   3 → 900, 4 → 1600); multi-line clears are rewarded quadratically.
//! - Level is `lines / lines_per_level` (10 by default), starting at 0.
//! - Gravity interval shortens with level and bottoms out at 100ms.

use crate::types::{DROP_INTERVALS, DROP_INTERVAL_MIN_MS, LINE_CLEAR_BASE};

/// Points for clearing `lines` rows with a single lock
pub fn line_clear_score(lines: usize) -> u32 {
    let n = lines as u32;
    LINE_CLEAR_BASE.saturating_mul(n.saturating_mul(n))
}

/// Level reached after `total_lines` cleared lines
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1)
}

/// Get drop interval for a level (in milliseconds)
/// Returns interval based on level, clamped at the minimum
pub fn get_drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_MIN_MS)
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_is_quadratic() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 900);
        assert_eq!(line_clear_score(4), 1600);
    }

    #[test]
    fn test_calculate_level() {
        assert_eq!(calculate_level(0, 10), 0);
        assert_eq!(calculate_level(9, 10), 0);
        assert_eq!(calculate_level(10, 10), 1);
        assert_eq!(calculate_level(25, 10), 2);
        assert_eq!(calculate_level(25, 5), 5);
    }

    #[test]
    fn test_drop_interval_decreases_with_floor() {
        assert_eq!(get_drop_interval_ms(0), 1000);
        assert_eq!(get_drop_interval_ms(1), 800);
        assert_eq!(get_drop_interval_ms(9), 130);
        assert_eq!(get_drop_interval_ms(10), 100);
        assert_eq!(get_drop_interval_ms(500), 100);

        let mut prev = u32::MAX;
        for level in 0..20 {
            let ms = get_drop_interval_ms(level);
            assert!(ms <= prev);
            assert!(ms >= 100);
            prev = ms;
        }
    }
}
