//! Input normalization
//!
//! Parses raw field values into validated numeric domains:
//! - Non-numeric input is rejected; out-of-range numeric input is silently
//!   clamped after parsing.
//! - Malformed wake/bed times are treated as absent, never as errors.
//! - Screen-time totals are checked against the day and, in schedule-aware
//!   mode, against the waking window.

use crate::error::ScoreError;
use crate::schedule::SleepSchedule;
use crate::types::{RawFields, ValidatedInputs, Variant};

/// Valid waking-hours window; anything outside is a degenerate schedule.
const MAX_WAKING_HOURS: f64 = 24.0;

/// Normalizer for converting raw fields to validated inputs
pub struct Normalizer;

impl Normalizer {
    /// Parse, clamp, and validate one scoring request.
    pub fn normalize(fields: &RawFields, variant: Variant) -> Result<ValidatedInputs, ScoreError> {
        let recovery = fields.recovery.as_f64("recovery")?.clamp(0.0, 100.0);
        let sleep_performance = fields
            .sleep_performance
            .as_f64("sleep performance")?
            .clamp(0.0, 100.0);
        let day_strain = fields.day_strain.as_f64("day strain")?.clamp(0.0, 21.0);
        let social_hours = fields.social_hours.as_f64("social hours")?.clamp(0.0, 24.0);
        let other_hours = fields.other_hours.as_f64("other hours")?.clamp(0.0, 24.0);

        let schedule =
            SleepSchedule::from_times(fields.wake_time.as_deref(), fields.bed_time.as_deref());

        let inputs = ValidatedInputs {
            recovery,
            sleep_performance,
            day_strain,
            social_hours,
            other_hours,
            schedule,
        };

        let total_screen = inputs.total_screen_hours();
        if total_screen > 24.0 {
            return Err(ScoreError::ScreenTimeExceedsDay);
        }

        if variant == Variant::ScheduleAware {
            if let Some(waking_hours) = inputs.waking_hours() {
                if waking_hours <= 0.0 || waking_hours > MAX_WAKING_HOURS {
                    return Err(ScoreError::InvalidSchedule);
                }
                if total_screen > waking_hours {
                    return Err(ScoreError::ScreenTimeExceedsWakingHours);
                }
            }
        }

        Ok(inputs)
    }
}
