//! Sub-score calculators
//!
//! Four independent dimensions, each scored on 0-100:
//! - Recovery and sleep performance pass through unchanged (already 0-100
//!   wellness percentages).
//! - Strain is a symmetric penalty around an ideal exertion target.
//! - Screen time has two strategy implementations behind one trait, selected
//!   by the caller's [`Variant`].

use crate::types::{ScreenMetrics, ValidatedInputs, Variant};

/// Healthiest day-strain value on the 0-21 scale.
const STRAIN_TARGET: f64 = 13.0;

/// Points lost per unit of strain deviation from the target.
const STRAIN_PENALTY_PER_UNIT: f64 = 8.0;

/// Reference phone use per waking hour, in minutes.
const BASELINE_PHONE_MINUTES_PER_WAKING_HOUR: f64 = 45.0;

/// Blend weights for the schedule-aware screen score.
const USAGE_BLEND_WEIGHT: f64 = 0.8;
const SOCIAL_BLEND_WEIGHT: f64 = 0.2;

/// Fixed-weight variant: hour multipliers and penalty per weighted hour.
const SOCIAL_HOUR_WEIGHT: f64 = 1.7;
const OTHER_HOUR_WEIGHT: f64 = 0.8;
const PENALTY_PER_WEIGHTED_HOUR: f64 = 7.0;

/// Symmetric strain penalty centered at the target.
///
/// Both under- and over-exertion reduce the score at a fixed linear rate,
/// zero-floored and 100-capped. Maximal exactly at the target.
pub fn strain_score(strain: f64) -> f64 {
    (100.0 - (strain - STRAIN_TARGET).abs() * STRAIN_PENALTY_PER_UNIT).clamp(0.0, 100.0)
}

/// Penalty signal for the proportion of screen time that is social.
///
/// Independent of absolute volume; zero total usage is a perfect signal,
/// which also keeps the division well-defined.
pub fn social_usage_signal(social_hours: f64, total_hours: f64) -> f64 {
    if total_hours <= 0.0 {
        return 100.0;
    }
    let social_ratio = social_hours / total_hours;
    (100.0 - social_ratio * 100.0).clamp(0.0, 100.0)
}

/// Screen-time scoring strategy.
pub trait ScreenScorer {
    fn score(&self, inputs: &ValidatedInputs) -> ScreenMetrics;
}

/// Schedule-aware strategy: scores the share of waking hours spent on the
/// phone against the baseline share, then blends in the social signal.
pub struct ShareBasedScorer;

impl ScreenScorer for ShareBasedScorer {
    fn score(&self, inputs: &ValidatedInputs) -> ScreenMetrics {
        let Some(waking_hours) = inputs.waking_hours() else {
            // Without a schedule there is no denominator; fall back to the
            // fixed-weight formula.
            return FixedWeightScorer.score(inputs);
        };

        let total = inputs.total_screen_hours();
        let baseline_share = BASELINE_PHONE_MINUTES_PER_WAKING_HOUR / 60.0;
        let actual_share = total / waking_hours;
        let over_baseline_ratio = actual_share / baseline_share;

        // At or below baseline keeps full score. Above baseline drops
        // linearly with the excess ratio.
        let usage_score =
            (100.0 - ((over_baseline_ratio - 1.0) * 100.0).max(0.0)).clamp(0.0, 100.0);
        let social_signal = social_usage_signal(inputs.social_hours, total);
        let blended = usage_score * USAGE_BLEND_WEIGHT + social_signal * SOCIAL_BLEND_WEIGHT;

        ScreenMetrics {
            score: blended.clamp(0.0, 100.0),
            actual_share: Some(actual_share),
            baseline_share: Some(baseline_share),
            social_signal,
        }
    }
}

/// Fixed-weight strategy: social hours are penalized more heavily than other
/// phone hours. The social signal is computed and surfaced but does not feed
/// back into the score.
pub struct FixedWeightScorer;

impl ScreenScorer for FixedWeightScorer {
    fn score(&self, inputs: &ValidatedInputs) -> ScreenMetrics {
        let weighted_hours =
            inputs.social_hours * SOCIAL_HOUR_WEIGHT + inputs.other_hours * OTHER_HOUR_WEIGHT;
        let score = (100.0 - weighted_hours * PENALTY_PER_WEIGHTED_HOUR).clamp(0.0, 100.0);
        let social_signal =
            social_usage_signal(inputs.social_hours, inputs.total_screen_hours());

        ScreenMetrics {
            score,
            actual_share: None,
            baseline_share: None,
            social_signal,
        }
    }
}

/// Pick the screen scorer for a variant, falling back to fixed weighting
/// when the schedule-aware variant has no usable schedule.
pub fn screen_scorer_for(variant: Variant, inputs: &ValidatedInputs) -> &'static dyn ScreenScorer {
    match variant {
        Variant::ScheduleAware if inputs.schedule.is_some() => &ShareBasedScorer,
        _ => &FixedWeightScorer,
    }
}
