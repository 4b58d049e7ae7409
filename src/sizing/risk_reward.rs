//! Risk/reward ratio for a user-selected direction.

use crate::models::Direction;

/// Ratio of the distance to target over the distance to stop.
///
/// Distances are signed by direction, so a target on the wrong side gives
/// a negative ratio. `None` when any price is not positive or the stop is
/// not on the losing side of the entry.
pub fn risk_reward(entry: f64, stop: f64, target: f64, direction: Direction) -> Option<f64> {
    if !(entry > 0.0 && stop > 0.0 && target > 0.0) {
        return None;
    }

    let (risk, reward) = match direction {
        Direction::Long => (entry - stop, target - entry),
        Direction::Short => (stop - entry, entry - target),
    };

    if risk > 0.0 {
        Some(reward / risk)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_ratio() {
        assert_eq!(risk_reward(2000.0, 1900.0, 2150.0, Direction::Long), Some(1.5));
    }

    #[test]
    fn test_short_ratio() {
        assert_eq!(risk_reward(2000.0, 2100.0, 1850.0, Direction::Short), Some(1.5));
    }

    #[test]
    fn test_stop_on_wrong_side() {
        assert_eq!(risk_reward(2000.0, 2100.0, 2150.0, Direction::Long), None);
        assert_eq!(risk_reward(2000.0, 2000.0, 2150.0, Direction::Long), None);
    }

    #[test]
    fn test_target_on_wrong_side_is_negative() {
        let b = risk_reward(2000.0, 1900.0, 1950.0, Direction::Long).unwrap();
        assert!(b < 0.0);
    }

    #[test]
    fn test_missing_prices() {
        assert_eq!(risk_reward(0.0, 1900.0, 2150.0, Direction::Long), None);
        assert_eq!(risk_reward(2000.0, f64::NAN, 2150.0, Direction::Long), None);
    }
}
