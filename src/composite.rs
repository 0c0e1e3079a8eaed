//! Composite scoring
//!
//! Weighted blend of the four sub-scores into one rounded integer plus a
//! qualitative band. Weights are fixed constants summing to 1.0 and are not
//! configurable.

use crate::types::BalanceLabel;

pub const RECOVERY_WEIGHT: f64 = 0.35;
pub const SLEEP_WEIGHT: f64 = 0.25;
pub const STRAIN_WEIGHT: f64 = 0.2;
pub const SCREEN_WEIGHT: f64 = 0.2;

/// Blend the four sub-scores and round to an integer in [0, 100].
///
/// Rounding is half-up to the nearest integer; the label is always taken
/// from the rounded value.
pub fn composite_score(
    recovery_score: f64,
    sleep_score: f64,
    strain_score: f64,
    screen_score: f64,
) -> u8 {
    let blended = recovery_score * RECOVERY_WEIGHT
        + sleep_score * SLEEP_WEIGHT
        + strain_score * STRAIN_WEIGHT
        + screen_score * SCREEN_WEIGHT;

    // f64::round is half-away-from-zero, which matches half-up on the
    // non-negative clamped range.
    blended.clamp(0.0, 100.0).round() as u8
}

/// Band for a composite score.
pub fn label_for(composite: u8) -> BalanceLabel {
    BalanceLabel::for_score(composite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total = RECOVERY_WEIGHT + SLEEP_WEIGHT + STRAIN_WEIGHT + SCREEN_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_composite_bounds() {
        assert_eq!(composite_score(0.0, 0.0, 0.0, 0.0), 0);
        assert_eq!(composite_score(100.0, 100.0, 100.0, 100.0), 100);
    }

    #[test]
    fn test_composite_rounds_half_up() {
        // 50 * 0.35 + 50 * 0.25 + 50 * 0.2 + 52.5 * 0.2 = 50.5
        assert_eq!(composite_score(50.0, 50.0, 50.0, 52.5), 51);
    }

    #[test]
    fn test_worked_example() {
        // recovery 82, sleep 77, strain score 96.8, screen score ~88.7:
        // 28.7 + 19.25 + 19.36 + 17.75 = 85.06
        let screen = 100.0 * 0.8 + (100.0 - (3.1 / 5.5) * 100.0) * 0.2;
        let composite = composite_score(82.0, 77.0, 96.8, screen);
        assert_eq!(composite, 85);
        assert_eq!(label_for(composite), crate::types::BalanceLabel::Excellent);
    }
}
