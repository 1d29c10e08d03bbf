//! Date and time handling for feed values.
//!
//! This module provides [`ParsedDateTime`] for representing a `DTSTART`-style
//! value after it has been placed on the display timezone's wall clock, and
//! the parsing and formatting helpers used by the feed engine.
//!
//! Feed values come in three shapes:
//! - `20260106` - an all-day date
//! - `20260107T220000Z` - a UTC instant, converted to [`DISPLAY_TIMEZONE`]
//! - `20260106T183000` - a floating time, taken as-is in [`DISPLAY_TIMEZONE`]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The timezone every parsed value is expressed in.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::America::Detroit;

/// A civil date with an optional time of day.
///
/// The time of day is present if and only if the value is not all-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedDateTime {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl ParsedDateTime {
    /// Creates an all-day value.
    pub fn all_day(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Creates a value with a time of day.
    pub fn timed(dt: NaiveDateTime) -> Self {
        Self {
            date: dt.date(),
            time: Some(dt.time()),
        }
    }

    /// Returns the civil date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time of day, if this is not an all-day value.
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Returns `true` if this is an all-day value.
    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }

    /// Returns the wall-clock datetime, using midnight for all-day values.
    pub fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

/// Parses a compact iCalendar date or date-time value.
///
/// Only the year, month, day, hour and minute digits are read; seconds are
/// ignored. Returns `None` when the digits do not form a valid value.
pub fn parse_ical_datetime(value: &str) -> Option<ParsedDateTime> {
    let value = value.trim();
    let is_utc = value.ends_with('Z');
    let digits = value.strip_suffix('Z').unwrap_or(value);

    let date = NaiveDate::from_ymd_opt(
        number(digits, 0..4)?,
        number(digits, 4..6)?,
        number(digits, 6..8)?,
    )?;

    if digits.len() == 8 {
        return Some(ParsedDateTime::all_day(date));
    }

    // Position 8 holds the separator and is not inspected.
    let time = NaiveTime::from_hms_opt(number(digits, 9..11)?, number(digits, 11..13)?, 0)?;
    let wall = date.and_time(time);

    if is_utc {
        let local = Utc.from_utc_datetime(&wall).with_timezone(&DISPLAY_TIMEZONE);
        return Some(ParsedDateTime::timed(local.naive_local()));
    }

    Some(ParsedDateTime::timed(wall))
}

fn number<T: std::str::FromStr>(digits: &str, range: std::ops::Range<usize>) -> Option<T> {
    let slice = digits.get(range)?;
    if !slice.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    slice.parse().ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a time of day on a 12-hour clock, e.g. `6:30 PM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn eight_digits_is_all_day() {
            let parsed = parse_ical_datetime("20260106").unwrap();
            assert!(parsed.is_all_day());
            assert_eq!(parsed.date(), date(2026, 1, 6));
            assert_eq!(parsed.time(), None);
        }

        #[test]
        fn floating_value_is_taken_literally() {
            let parsed = parse_ical_datetime("20260106T183000").unwrap();
            assert!(!parsed.is_all_day());
            assert_eq!(parsed.date(), date(2026, 1, 6));
            assert_eq!(parsed.time(), Some(time(18, 30)));
        }

        #[test]
        fn utc_value_is_converted_in_winter() {
            // EST is UTC-5.
            let parsed = parse_ical_datetime("20260107T220000Z").unwrap();
            assert_eq!(parsed.date(), date(2026, 1, 7));
            assert_eq!(parsed.time(), Some(time(17, 0)));
        }

        #[test]
        fn utc_value_is_converted_in_summer() {
            // EDT is UTC-4.
            let parsed = parse_ical_datetime("20260715T160000Z").unwrap();
            assert_eq!(parsed.date(), date(2026, 7, 15));
            assert_eq!(parsed.time(), Some(time(12, 0)));
        }

        #[test]
        fn utc_value_can_cross_midnight() {
            let parsed = parse_ical_datetime("20260110T023000Z").unwrap();
            assert_eq!(parsed.date(), date(2026, 1, 9));
            assert_eq!(parsed.time(), Some(time(21, 30)));
        }

        #[test]
        fn utc_and_floating_differ_for_same_digits() {
            let utc = parse_ical_datetime("20260105T183000Z").unwrap();
            let floating = parse_ical_datetime("20260105T183000").unwrap();
            assert_ne!(utc, floating);
            assert_eq!(utc.time(), Some(time(13, 30)));
        }

        #[test]
        fn seconds_are_ignored() {
            let parsed = parse_ical_datetime("20260106T183045").unwrap();
            assert_eq!(parsed.time(), Some(time(18, 30)));
        }

        #[test]
        fn separator_is_positional() {
            let parsed = parse_ical_datetime("20260106X183000").unwrap();
            assert_eq!(parsed.time(), Some(time(18, 30)));
        }

        #[test]
        fn surrounding_whitespace_is_trimmed() {
            let parsed = parse_ical_datetime("  20260106\r").unwrap();
            assert_eq!(parsed.date(), date(2026, 1, 6));
        }

        #[test]
        fn garbage_is_rejected() {
            assert!(parse_ical_datetime("").is_none());
            assert!(parse_ical_datetime("2026").is_none());
            assert!(parse_ical_datetime("2026AB06").is_none());
            assert!(parse_ical_datetime("20261306").is_none());
            assert!(parse_ical_datetime("20260106T25").is_none());
            assert!(parse_ical_datetime("20260106T1").is_none());
        }
    }

    mod value {
        use super::*;

        #[test]
        fn naive_uses_midnight_for_all_day() {
            let parsed = ParsedDateTime::all_day(date(2026, 2, 1));
            assert_eq!(parsed.naive(), date(2026, 2, 1).and_time(NaiveTime::MIN));
        }

        #[test]
        fn timed_keeps_time() {
            let dt = date(2026, 2, 1).and_time(time(9, 15));
            let parsed = ParsedDateTime::timed(dt);
            assert_eq!(parsed.naive(), dt);
            assert!(!parsed.is_all_day());
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn dates_are_zero_padded() {
            assert_eq!(format_date(date(2026, 1, 5)), "2026-01-05");
        }

        #[test]
        fn times_use_twelve_hour_clock() {
            assert_eq!(format_time(time(18, 30)), "6:30 PM");
            assert_eq!(format_time(time(9, 5)), "9:05 AM");
            assert_eq!(format_time(time(0, 0)), "12:00 AM");
            assert_eq!(format_time(time(12, 0)), "12:00 PM");
            assert_eq!(format_time(time(23, 59)), "11:59 PM");
        }
    }
}
