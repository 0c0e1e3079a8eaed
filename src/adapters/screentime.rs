//! Screen-time payload adapter
//!
//! Wire shape: `{socialHours, otherHours}`, numbers or numeric strings.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::types::FieldValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenTimePayload {
    pub social_hours: FieldValue,
    pub other_hours: FieldValue,
}

impl ScreenTimePayload {
    pub fn parse(raw_json: &str) -> Result<Self, ScoreError> {
        Ok(serde_json::from_str(raw_json)?)
    }

    /// Ingest-side validation: both fields numeric.
    pub fn validate_for_ingest(&self) -> Result<(), ScoreError> {
        self.social_hours.as_f64("socialHours")?;
        self.other_hours.as_f64("otherHours")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_validate() {
        let payload =
            ScreenTimePayload::parse(r#"{"socialHours": 3.1, "otherHours": "2.4"}"#).unwrap();
        assert!(payload.validate_for_ingest().is_ok());
        assert_eq!(payload.other_hours.as_f64("otherHours").unwrap(), 2.4);
    }

    #[test]
    fn test_validate_rejects_non_numeric() {
        let payload =
            ScreenTimePayload::parse(r#"{"socialHours": "lots", "otherHours": 2}"#).unwrap();
        assert!(payload.validate_for_ingest().is_err());
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        assert!(ScreenTimePayload::parse(r#"{"socialHours": 3.1}"#).is_err());
    }
}
