//! Wake/bed schedule handling
//!
//! Clock times arrive as "HH:MM" strings. Validation is pattern-only (two
//! digits, a colon, two digits); degenerate pairs are caught downstream by
//! the waking-hours range check, not here.

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// A 24-hour clock time parsed from an "HH:MM" string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Parse a strict "HH:MM" value. Anything that does not match the
    /// two-digit/colon/two-digit pattern yields `None`; callers treat that
    /// as an absent time.
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        if ![bytes[0], bytes[1], bytes[3], bytes[4]]
            .iter()
            .all(|b| b.is_ascii_digit())
        {
            return None;
        }

        Some(ClockTime {
            hour: (bytes[0] - b'0') * 10 + (bytes[1] - b'0'),
            minute: (bytes[3] - b'0') * 10 + (bytes[4] - b'0'),
        })
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> f64 {
        self.hour as f64 * 60.0 + self.minute as f64
    }
}

/// A wake/bed pair defining the waking window for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepSchedule {
    pub wake: ClockTime,
    pub bed: ClockTime,
}

impl SleepSchedule {
    /// Build a schedule from two optional "HH:MM" strings. Returns `None`
    /// unless both are present and pattern-valid.
    pub fn from_times(wake: Option<&str>, bed: Option<&str>) -> Option<Self> {
        let wake = ClockTime::parse(wake?)?;
        let bed = ClockTime::parse(bed?)?;
        Some(SleepSchedule { wake, bed })
    }

    /// Hours awake between wake time and the next bed time.
    ///
    /// Bed time is always treated as occurring on the next clock face at or
    /// after wake time, so a bed time numerically earlier than the wake time
    /// wraps past midnight.
    pub fn waking_hours(&self) -> f64 {
        let mut delta = self.bed.minutes() - self.wake.minutes();
        if delta <= 0.0 {
            delta += MINUTES_PER_DAY;
        }
        delta / 60.0
    }
}

/// Hours awake between two "HH:MM" strings, when both are pattern-valid.
pub fn waking_hours_between(wake: &str, bed: &str) -> Option<f64> {
    SleepSchedule::from_times(Some(wake), Some(bed)).map(|s| s.waking_hours())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_time() {
        let t = ClockTime::parse("07:30").unwrap();
        assert_eq!(t.minutes(), 450.0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(ClockTime::parse("7:30").is_none());
        assert!(ClockTime::parse("07:3").is_none());
        assert!(ClockTime::parse("0730").is_none());
        assert!(ClockTime::parse("ab:cd").is_none());
        assert!(ClockTime::parse("07:30 ").is_none());
        assert!(ClockTime::parse("").is_none());
    }

    #[test]
    fn test_parse_is_pattern_only() {
        // Out-of-range digits still match the pattern; the waking-hours
        // range check downstream rejects the schedules they produce.
        assert!(ClockTime::parse("25:00").is_some());
        assert!(ClockTime::parse("07:75").is_some());
    }

    #[test]
    fn test_waking_hours_same_day() {
        assert_eq!(waking_hours_between("07:00", "23:30"), Some(16.5));
    }

    #[test]
    fn test_waking_hours_wraps_past_midnight() {
        assert_eq!(waking_hours_between("23:00", "07:00"), Some(8.0));
    }

    #[test]
    fn test_waking_hours_equal_times_wrap_to_full_day() {
        assert_eq!(waking_hours_between("08:00", "08:00"), Some(24.0));
    }

    #[test]
    fn test_schedule_requires_both_times() {
        assert!(SleepSchedule::from_times(Some("07:00"), None).is_none());
        assert!(SleepSchedule::from_times(None, Some("23:00")).is_none());
        assert!(SleepSchedule::from_times(Some("7:00"), Some("23:00")).is_none());
    }
}
