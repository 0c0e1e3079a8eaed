//! Pipeline orchestration
//!
//! Public API for the scoring engine. One call runs
//! normalization → sub-scores → composite; each invocation is independent
//! and side-effect-free, so the pipeline is safe to call concurrently.

use crate::adapters::{self, ScreenTimePayload, WhoopPayload};
use crate::composite::{composite_score, label_for};
use crate::error::ScoreError;
use crate::normalizer::Normalizer;
use crate::subscores::{screen_scorer_for, strain_score, ScreenScorer};
use crate::types::{RawFields, ScoreBreakdown, Variant};

/// Score one day from raw field values.
///
/// # Example
/// ```ignore
/// let breakdown = compute_score(&fields, Variant::ScheduleAware)?;
/// println!("{} - {}", breakdown.composite, breakdown.label.message());
/// ```
pub fn compute_score(fields: &RawFields, variant: Variant) -> Result<ScoreBreakdown, ScoreError> {
    let inputs = Normalizer::normalize(fields, variant)?;

    // Recovery and sleep pass through; they are already 0-100 percentages.
    let recovery_score = inputs.recovery;
    let sleep_score = inputs.sleep_performance;
    let strain = strain_score(inputs.day_strain);
    let screen = screen_scorer_for(variant, &inputs).score(&inputs);

    let composite = composite_score(recovery_score, sleep_score, strain, screen.score);

    let waking_hours = if variant == Variant::ScheduleAware {
        inputs.waking_hours()
    } else {
        None
    };

    Ok(ScoreBreakdown {
        variant,
        recovery_score,
        sleep_score,
        strain_score: strain,
        screen,
        waking_hours,
        total_screen_hours: inputs.total_screen_hours(),
        composite,
        label: label_for(composite),
    })
}

/// Score one day from the two upstream JSON payloads.
pub fn score_payloads(
    whoop_json: &str,
    screen_json: &str,
    variant: Variant,
) -> Result<ScoreBreakdown, ScoreError> {
    let whoop = WhoopPayload::parse(whoop_json)?;
    let screen = ScreenTimePayload::parse(screen_json)?;
    compute_score(&adapters::to_raw_fields(&whoop, &screen), variant)
}

/// Engine with a caller-configured formula variant.
#[derive(Debug, Clone, Copy)]
pub struct BalanceEngine {
    variant: Variant,
}

impl BalanceEngine {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn score(&self, fields: &RawFields) -> Result<ScoreBreakdown, ScoreError> {
        compute_score(fields, self.variant)
    }

    pub fn score_payloads(
        &self,
        whoop_json: &str,
        screen_json: &str,
    ) -> Result<ScoreBreakdown, ScoreError> {
        score_payloads(whoop_json, screen_json, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BalanceLabel, FieldValue};

    fn sample_fields() -> RawFields {
        RawFields {
            recovery: FieldValue::Number(82.0),
            sleep_performance: FieldValue::Number(77.0),
            day_strain: FieldValue::Number(13.4),
            social_hours: FieldValue::Number(3.1),
            other_hours: FieldValue::Number(2.4),
            wake_time: Some("07:00".to_string()),
            bed_time: Some("23:30".to_string()),
        }
    }

    #[test]
    fn test_schedule_aware_worked_example() {
        let breakdown = compute_score(&sample_fields(), Variant::ScheduleAware).unwrap();

        assert_eq!(breakdown.recovery_score, 82.0);
        assert_eq!(breakdown.sleep_score, 77.0);
        assert!((breakdown.strain_score - 96.8).abs() < 1e-9);
        assert_eq!(breakdown.waking_hours, Some(16.5));
        assert_eq!(breakdown.total_screen_hours, 5.5);

        assert!((breakdown.screen.actual_share.unwrap() - 0.3333).abs() < 1e-3);
        assert_eq!(breakdown.screen.baseline_share, Some(0.75));
        assert!((breakdown.screen.social_signal - 43.636).abs() < 1e-2);
        assert!((breakdown.screen.score - 88.727).abs() < 1e-2);

        assert_eq!(breakdown.composite, 85);
        assert_eq!(breakdown.label, BalanceLabel::Excellent);
        assert_eq!(breakdown.label.message(), "Excellent balance today.");
    }

    #[test]
    fn test_fixed_weight_same_inputs() {
        let breakdown = compute_score(&sample_fields(), Variant::FixedWeight).unwrap();

        // (3.1*1.7 + 2.4*0.8) * 7 = 50.33 points lost
        assert!((breakdown.screen.score - 49.67).abs() < 1e-2);
        assert!(breakdown.waking_hours.is_none());
        assert!(breakdown.screen.actual_share.is_none());

        // Signal still reported, never folded in.
        assert!((breakdown.screen.social_signal - 43.636).abs() < 1e-2);
    }

    #[test]
    fn test_all_scores_in_range_for_extreme_inputs() {
        let extremes = [
            (0.0, 0.0, 0.0, 0.0, 0.0),
            (100.0, 100.0, 21.0, 12.0, 4.0),
            (1000.0, -50.0, 999.0, 8.0, -3.0), // clamped before scoring
        ];

        for (r, s, st, so, o) in extremes {
            let fields = RawFields {
                recovery: r.into(),
                sleep_performance: s.into(),
                day_strain: st.into(),
                social_hours: so.into(),
                other_hours: o.into(),
                wake_time: Some("06:00".to_string()),
                bed_time: Some("23:00".to_string()),
            };
            for variant in [Variant::ScheduleAware, Variant::FixedWeight] {
                let b = compute_score(&fields, variant).unwrap();
                assert!((0.0..=100.0).contains(&b.recovery_score));
                assert!((0.0..=100.0).contains(&b.sleep_score));
                assert!((0.0..=100.0).contains(&b.strain_score));
                assert!((0.0..=100.0).contains(&b.screen.score));
                assert!((0.0..=100.0).contains(&b.screen.social_signal));
                assert!(b.composite <= 100);
            }
        }
    }

    #[test]
    fn test_schedule_aware_without_times_falls_back() {
        let mut fields = sample_fields();
        fields.wake_time = None;
        fields.bed_time = None;

        let breakdown = compute_score(&fields, Variant::ScheduleAware).unwrap();
        assert!(breakdown.waking_hours.is_none());
        assert!(breakdown.screen.actual_share.is_none());

        let fixed = compute_score(&fields, Variant::FixedWeight).unwrap();
        assert_eq!(breakdown.screen.score, fixed.screen.score);
    }

    #[test]
    fn test_score_payloads_end_to_end() {
        let breakdown = score_payloads(
            r#"{"recovery": 82, "sleepPerformance": 77, "dayStrain": 13.4,
                "wakeTime": "07:00", "bedTime": "23:30"}"#,
            r#"{"socialHours": 3.1, "otherHours": 2.4}"#,
            Variant::ScheduleAware,
        )
        .unwrap();

        assert_eq!(breakdown.composite, 85);
    }

    #[test]
    fn test_score_payloads_invalid_json() {
        let result = score_payloads("not json", r#"{"socialHours":1,"otherHours":1}"#, Variant::FixedWeight);
        assert!(matches!(result, Err(ScoreError::JsonError(_))));
    }

    #[test]
    fn test_rejected_screen_time() {
        let mut fields = sample_fields();
        fields.social_hours = FieldValue::Number(20.0);
        fields.other_hours = FieldValue::Number(10.0);
        fields.wake_time = None;
        fields.bed_time = None;

        for variant in [Variant::ScheduleAware, Variant::FixedWeight] {
            let err = compute_score(&fields, variant).unwrap_err();
            assert!(matches!(err, ScoreError::ScreenTimeExceedsDay));
        }
    }

    #[test]
    fn test_engine_holds_variant() {
        let engine = BalanceEngine::new(Variant::FixedWeight);
        assert_eq!(engine.variant(), Variant::FixedWeight);
        let breakdown = engine.score(&sample_fields()).unwrap();
        assert_eq!(breakdown.variant, Variant::FixedWeight);
    }

    #[test]
    fn test_breakdown_serializes_to_json() {
        let breakdown = compute_score(&sample_fields(), Variant::ScheduleAware).unwrap();
        let json = serde_json::to_value(&breakdown).unwrap();

        assert_eq!(json["variant"], "schedule_aware");
        assert_eq!(json["composite"], 85);
        assert_eq!(json["label"], "excellent");
        assert!(json["screen"]["actual_share"].is_number());
    }
}
