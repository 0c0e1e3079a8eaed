//! Upstream payload adapters
//!
//! The engine consumes two JSON payloads: a WHOOP-like physiology payload and
//! a screen-time payload. Each adapter parses its wire shape and the pair is
//! merged into one set of raw fields for the normalizer.

pub mod screentime;
pub mod whoop;

pub use screentime::ScreenTimePayload;
pub use whoop::WhoopPayload;

use crate::types::RawFields;

/// Merge the two upstream payloads into one scoring request.
pub fn to_raw_fields(whoop: &WhoopPayload, screen: &ScreenTimePayload) -> RawFields {
    RawFields {
        recovery: whoop.recovery.clone(),
        sleep_performance: whoop.sleep_performance.clone(),
        day_strain: whoop.day_strain.clone(),
        social_hours: screen.social_hours.clone(),
        other_hours: screen.other_hours.clone(),
        wake_time: whoop.wake_time.clone(),
        bed_time: whoop.bed_time.clone(),
    }
}
