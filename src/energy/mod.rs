//! Energized-status evaluation.
//!
//! A circuit has energy when the current time of day falls inside its daily
//! window. Times are compared as zero-padded `HH:MM:SS` strings, which orders
//! them exactly like the times they encode.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Format used for stored window bounds and for the comparison clock.
pub const HMS_FORMAT: &str = "%H:%M:%S";

/// How a window whose end precedes its start is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowPolicy {
    /// Inclusive `start <= now <= end`; a window crossing midnight never matches.
    #[default]
    Naive,
    /// A window with `end < start` covers `[start, 24:00)` and `[00:00, end]`.
    WrapMidnight,
}

impl WindowPolicy {
    /// Evaluate a window under this policy.
    pub fn evaluate(self, now: &str, start: &str, end: &str) -> bool {
        match self {
            WindowPolicy::Naive => is_energized(now, start, end),
            WindowPolicy::WrapMidnight if end < start => now >= start || now <= end,
            WindowPolicy::WrapMidnight => is_energized(now, start, end),
        }
    }
}

/// Inclusive lexicographic window check on `HH:MM:SS` strings.
pub fn is_energized(now: &str, start: &str, end: &str) -> bool {
    start <= now && now <= end
}

/// Render a time of day the way window bounds are stored.
pub fn format_hms(time: NaiveTime) -> String {
    time.format(HMS_FORMAT).to_string()
}

/// Parse and normalize a window bound to zero-padded `HH:MM:SS`.
pub fn normalize_hms(raw: &str) -> Option<String> {
    NaiveTime::parse_from_str(raw.trim(), HMS_FORMAT)
        .ok()
        .map(format_hms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_boundaries_are_inclusive() {
        assert!(is_energized("08:00:00", "08:00:00", "18:00:00"));
        assert!(!is_energized("07:59:59", "08:00:00", "18:00:00"));
        assert!(is_energized("18:00:00", "08:00:00", "18:00:00"));
        assert!(!is_energized("18:00:01", "08:00:00", "18:00:00"));
        assert!(is_energized("12:30:00", "08:00:00", "18:00:00"));
    }

    #[test]
    fn test_midnight_window_never_matches_naively() {
        assert!(!is_energized("23:00:00", "22:00:00", "02:00:00"));
        assert!(!is_energized("01:00:00", "22:00:00", "02:00:00"));
        assert!(!WindowPolicy::Naive.evaluate("23:00:00", "22:00:00", "02:00:00"));
    }

    #[test]
    fn test_wrap_midnight_policy() {
        let policy = WindowPolicy::WrapMidnight;
        assert!(policy.evaluate("23:00:00", "22:00:00", "02:00:00"));
        assert!(policy.evaluate("02:00:00", "22:00:00", "02:00:00"));
        assert!(!policy.evaluate("12:00:00", "22:00:00", "02:00:00"));
        // Ordinary windows behave as before.
        assert!(policy.evaluate("08:00:00", "08:00:00", "18:00:00"));
        assert!(!policy.evaluate("18:00:01", "08:00:00", "18:00:00"));
    }

    #[test]
    fn test_normalize_hms() {
        assert_eq!(normalize_hms("08:05:09").as_deref(), Some("08:05:09"));
        assert_eq!(normalize_hms(" 23:59:59 ").as_deref(), Some("23:59:59"));
        assert_eq!(normalize_hms("25:00:00"), None);
        assert_eq!(normalize_hms("8 o'clock"), None);
        assert_eq!(normalize_hms(""), None);
    }

    #[test]
    fn test_format_hms_zero_pads() {
        let t = NaiveTime::from_hms_opt(7, 4, 3).unwrap();
        assert_eq!(format_hms(t), "07:04:03");
    }
}
