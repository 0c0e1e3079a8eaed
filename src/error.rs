//! Error types for the balance scoring engine

use thiserror::Error;

/// Errors that can occur while validating input or scoring a day.
///
/// Out-of-range numeric input is never an error: the normalizer clamps it
/// silently. Only malformed input (non-numeric fields, impossible screen time,
/// degenerate schedules) and upstream failures are rejected.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("{field} is not a valid number")]
    InvalidNumber { field: String },

    #[error("Social + other screen time must be 24 hours or less")]
    ScreenTimeExceedsDay,

    #[error("Phone time cannot exceed waking hours")]
    ScreenTimeExceedsWakingHours,

    #[error("Wake/bed schedule is invalid")]
    InvalidSchedule,

    #[error("Request failed ({status}) for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Request to {url} failed: {reason}")]
    UpstreamFetch { url: String, reason: String },

    #[error("Synced payload contained invalid values: {0}")]
    UpstreamData(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScoreError {
    /// Whether this error came from an upstream source rather than local input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ScoreError::UpstreamStatus { .. }
                | ScoreError::UpstreamFetch { .. }
                | ScoreError::UpstreamData(_)
        )
    }
}
