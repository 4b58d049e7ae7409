//! Kelly criterion fraction.
//!
//! f* = (b * p - q) / b
//! where:
//!   p = probability of winning (win rate)
//!   q = probability of losing (1 - p)
//!   b = risk/reward ratio (gain per unit risked)

/// Fraction of capital to risk for a given risk/reward ratio and win rate.
///
/// The win rate is clamped to [0, 1]. An undefined, non-finite or
/// non-positive `risk_reward` means there is no edge and yields 0.
/// The raw fraction is floored at 0 before half Kelly halves it, so the
/// result always lies in [0, 1].
pub fn kelly_fraction(risk_reward: Option<f64>, win_rate: f64, half_kelly: bool) -> f64 {
    let Some(b) = risk_reward.filter(|b| b.is_finite() && *b > 0.0) else {
        return 0.0;
    };

    let p = clamp_probability(win_rate);
    let q = 1.0 - p;

    let full = ((b * p - q) / b).max(0.0);

    if half_kelly {
        full / 2.0
    } else {
        full
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelly_fraction_reference() {
        let f = kelly_fraction(Some(1.5), 0.5, false);
        assert!((f - 0.25 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_negative_edge_floors_to_zero() {
        assert_eq!(kelly_fraction(Some(1.0), 0.3, false), 0.0);
        assert_eq!(kelly_fraction(Some(1.0), 0.3, true), 0.0);
    }

    #[test]
    fn test_half_kelly_halves_full() {
        for &(b, p) in &[(1.5, 0.5), (3.0, 0.4), (0.8, 0.7), (10.0, 0.95)] {
            let full = kelly_fraction(Some(b), p, false);
            let half = kelly_fraction(Some(b), p, true);
            assert_eq!(half, full / 2.0);
        }
    }

    #[test]
    fn test_stays_in_unit_interval() {
        for &p in &[-3.0, -0.1, 0.0, 0.25, 0.5, 0.99, 1.0, 1.7, f64::NAN] {
            for &b in &[0.1, 1.0, 2.5, 100.0] {
                let f = kelly_fraction(Some(b), p, false);
                assert!((0.0..=1.0).contains(&f), "f={} for p={} b={}", f, p, b);
            }
        }
        // Certain win bets everything
        assert_eq!(kelly_fraction(Some(2.0), 1.5, false), 1.0);
    }

    #[test]
    fn test_undefined_ratio_has_no_edge() {
        assert_eq!(kelly_fraction(None, 0.9, false), 0.0);
        assert_eq!(kelly_fraction(Some(0.0), 0.9, false), 0.0);
        assert_eq!(kelly_fraction(Some(f64::INFINITY), 0.9, false), 0.0);
    }
}
