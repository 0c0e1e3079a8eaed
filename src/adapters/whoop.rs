//! WHOOP-like payload adapter
//!
//! Wire shape: `{recovery, sleepPerformance, dayStrain, wakeTime?, bedTime?}`.
//! Numeric fields may arrive as JSON numbers or strings.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::schedule::ClockTime;
use crate::types::FieldValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoopPayload {
    pub recovery: FieldValue,
    pub sleep_performance: FieldValue,
    pub day_strain: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_time: Option<String>,
}

impl WhoopPayload {
    pub fn parse(raw_json: &str) -> Result<Self, ScoreError> {
        Ok(serde_json::from_str(raw_json)?)
    }

    /// Ingest-side validation: all three metrics numeric, and both times
    /// present and pattern-valid. Stricter than the scoring path, which
    /// tolerates absent times.
    pub fn validate_for_ingest(&self) -> Result<(), ScoreError> {
        self.recovery.as_f64("recovery")?;
        self.sleep_performance.as_f64("sleepPerformance")?;
        self.day_strain.as_f64("dayStrain")?;

        let times_valid = matches!(
            (self.wake_time.as_deref(), self.bed_time.as_deref()),
            (Some(wake), Some(bed))
                if ClockTime::parse(wake).is_some() && ClockTime::parse(bed).is_some()
        );
        if !times_valid {
            return Err(ScoreError::InvalidSchedule);
        }

        Ok(())
    }
}
