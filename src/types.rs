//! Core types for the balance scoring pipeline
//!
//! This module defines the data that flows through one scoring call: raw
//! field values, validated inputs, per-dimension sub-scores, and the final
//! breakdown. Nothing here persists beyond a single computation.

use serde::{Deserialize, Serialize};

use crate::schedule::SleepSchedule;

/// Formula variant selected by the caller.
///
/// The two variants are parallel evolutions of the same engine and are kept
/// as distinct, explicitly selected strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Screen score from the share of waking hours spent on the phone,
    /// blended with the social signal. Requires a wake/bed schedule.
    ScheduleAware,
    /// Screen score from fixed per-hour penalties; the social signal is
    /// reported but never folded into the score.
    FixedWeight,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::ScheduleAware => "schedule_aware",
            Variant::FixedWeight => "fixed_weight",
        }
    }
}

/// A raw field value as it arrives from a form or JSON payload.
///
/// Upstream sources are inconsistent about whether numeric fields are JSON
/// numbers or strings, so both are accepted and parsed uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Parse this value as a finite float, naming the field on failure.
    pub fn as_f64(&self, field: &str) -> Result<f64, crate::error::ScoreError> {
        let parsed = match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        };

        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(crate::error::ScoreError::InvalidNumber {
                field: field.to_string(),
            }),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Raw inputs for one scoring request, before parsing and clamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFields {
    pub recovery: FieldValue,
    pub sleep_performance: FieldValue,
    pub day_strain: FieldValue,
    pub social_hours: FieldValue,
    pub other_hours: FieldValue,
    /// "HH:MM" wake time; only meaningful for the schedule-aware variant.
    pub wake_time: Option<String>,
    /// "HH:MM" bed time; only meaningful for the schedule-aware variant.
    pub bed_time: Option<String>,
}

/// Parsed and clamped inputs, ready for the sub-score calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInputs {
    /// Recovery percentage, clamped to [0, 100].
    pub recovery: f64,
    /// Sleep performance percentage, clamped to [0, 100].
    pub sleep_performance: f64,
    /// Day strain, clamped to [0, 21].
    pub day_strain: f64,
    /// Social screen time in hours, clamped to [0, 24].
    pub social_hours: f64,
    /// Other screen time in hours, clamped to [0, 24].
    pub other_hours: f64,
    /// Wake/bed schedule when both times were supplied and well-formed.
    pub schedule: Option<SleepSchedule>,
}

impl ValidatedInputs {
    /// Total phone time for the day in hours.
    pub fn total_screen_hours(&self) -> f64 {
        self.social_hours + self.other_hours
    }

    /// Hours awake derived from the schedule, when one is present.
    pub fn waking_hours(&self) -> Option<f64> {
        self.schedule.as_ref().map(|s| s.waking_hours())
    }
}

/// Screen-time sub-score with the auxiliary metrics surfaced for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// Screen-time sub-score in [0, 100].
    pub score: f64,
    /// Phone time per waking hour (schedule-aware variant only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_share: Option<f64>,
    /// Reference phone time per waking hour (schedule-aware variant only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_share: Option<f64>,
    /// Penalty signal for the social share of screen time, in [0, 100].
    /// Informational in the fixed-weight variant.
    pub social_signal: f64,
}

/// Qualitative band for a composite score. Closed set, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceLabel {
    Excellent,
    Good,
    Mixed,
    NeedsAttention,
}

impl BalanceLabel {
    /// Band for a rounded composite score.
    pub fn for_score(score: u8) -> Self {
        if score >= 85 {
            BalanceLabel::Excellent
        } else if score >= 70 {
            BalanceLabel::Good
        } else if score >= 50 {
            BalanceLabel::Mixed
        } else {
            BalanceLabel::NeedsAttention
        }
    }

    /// Human-readable message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            BalanceLabel::Excellent => "Excellent balance today.",
            BalanceLabel::Good => "Good overall balance.",
            BalanceLabel::Mixed => "Mixed day — room to improve.",
            BalanceLabel::NeedsAttention => {
                "Needs attention — recovery habits may need support."
            }
        }
    }
}

/// Immutable result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Formula variant that produced this breakdown.
    pub variant: Variant,
    /// Recovery sub-score in [0, 100].
    pub recovery_score: f64,
    /// Sleep sub-score in [0, 100].
    pub sleep_score: f64,
    /// Strain sub-score in [0, 100].
    pub strain_score: f64,
    /// Screen-time sub-score and auxiliary metrics.
    pub screen: ScreenMetrics,
    /// Hours awake, when a schedule was in play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waking_hours: Option<f64>,
    /// Total phone time for the day in hours.
    pub total_screen_hours: f64,
    /// Weighted composite, rounded to an integer in [0, 100].
    pub composite: u8,
    /// Qualitative band for the composite.
    pub label: BalanceLabel,
}
