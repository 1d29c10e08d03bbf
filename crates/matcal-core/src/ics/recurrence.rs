//! Bounded recurrence expansion for `DAILY` and `WEEKLY` rules.
//!
//! Expansion always terminates: every series is capped both by a date bound
//! (`UNTIL`, or [`DEFAULT_HORIZON_DAYS`] past the anchor) and by an
//! occurrence bound (`COUNT`, or [`DEFAULT_MAX_OCCURRENCES`]). Whichever is
//! reached first ends the series.
//!
//! Any other frequency produces the anchor alone.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use tracing::trace;

use crate::time::{ParsedDateTime, parse_ical_datetime};

/// Occurrence cap when the rule has no usable `COUNT`.
pub const DEFAULT_MAX_OCCURRENCES: usize = 200;

/// Date horizon, in days past the anchor, when the rule has no usable `UNTIL`.
pub const DEFAULT_HORIZON_DAYS: u64 = 365;

/// Recurrence frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    /// Any other (or missing) `FREQ`; not expanded.
    Other(String),
}

impl Frequency {
    fn parse(value: &str) -> Self {
        match value {
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A parsed `RRULE` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Step between occurrences, in days or weeks. Always at least 1.
    pub interval: u32,
    /// Latest allowed occurrence, on the display timezone's wall clock.
    pub until: Option<NaiveDateTime>,
    /// Maximum number of occurrences.
    pub count: Option<usize>,
    /// `BYDAY` codes, in the order given. `None` when absent or empty.
    pub by_day: Option<Vec<Weekday>>,
}

impl RecurrenceRule {
    /// Parses a `;`-separated list of `KEY=VALUE` pairs.
    ///
    /// Unusable values are dropped rather than rejected: a zero or invalid
    /// `INTERVAL` becomes 1, a zero or invalid `COUNT` or an invalid `UNTIL`
    /// leaves that bound unset, and unknown `BYDAY` codes are skipped.
    pub fn parse(rule: &str) -> Self {
        let mut parsed = Self {
            frequency: Frequency::Other(String::new()),
            interval: 1,
            until: None,
            count: None,
            by_day: None,
        };

        for part in rule.split(';') {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            match key.trim() {
                "FREQ" => parsed.frequency = Frequency::parse(value.trim()),
                "INTERVAL" => {
                    parsed.interval = value.trim().parse().ok().filter(|&n| n > 0).unwrap_or(1)
                }
                "COUNT" => parsed.count = value.trim().parse().ok().filter(|&n| n > 0),
                "UNTIL" => parsed.until = parse_ical_datetime(value).map(|dt| dt.naive()),
                "BYDAY" if !value.trim().is_empty() => {
                    parsed.by_day = Some(
                        value
                            .split(',')
                            .filter_map(|code| weekday(code.trim()))
                            .collect(),
                    )
                }
                _ => {}
            }
        }

        parsed
    }

    /// Returns `true` if this rule expands into a series.
    pub fn is_supported(&self) -> bool {
        matches!(self.frequency, Frequency::Daily | Frequency::Weekly)
    }
}

fn weekday(code: &str) -> Option<Weekday> {
    match code {
        "SU" => Some(Weekday::Sun),
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Civil dates removed from a series.
///
/// Membership is by date only; the time of day never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionSet {
    dates: HashSet<NaiveDate>,
}

impl ExceptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw `EXDATE` values, skipping unparseable ones.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .filter_map(|value| parse_ical_datetime(value.as_ref()))
            .map(|dt| dt.date())
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for ExceptionSet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Expands a series into its occurrences, in emission order.
///
/// Unsupported frequencies yield the anchor alone, without consulting the
/// exception set.
pub fn expand(
    anchor: &ParsedDateTime,
    rule: &RecurrenceRule,
    exceptions: &ExceptionSet,
) -> Vec<NaiveDateTime> {
    let start = anchor.naive();
    let max_date = rule.until.unwrap_or_else(|| {
        start
            .checked_add_days(Days::new(DEFAULT_HORIZON_DAYS))
            .unwrap_or(NaiveDateTime::MAX)
    });
    let max_count = rule.count.unwrap_or(DEFAULT_MAX_OCCURRENCES);

    let occurrences = match rule.frequency {
        Frequency::Daily => expand_daily(start, rule.interval, max_date, max_count, exceptions),
        Frequency::Weekly => {
            // Codes that were all unrecognised leave an empty set, which
            // produces no occurrences.
            let by_day = rule
                .by_day
                .clone()
                .unwrap_or_else(|| vec![start.weekday()]);
            expand_weekly(start, rule.interval, &by_day, max_date, max_count, exceptions)
        }
        Frequency::Other(ref freq) => {
            trace!(freq = %freq, "Unsupported frequency, keeping single occurrence");
            return vec![start];
        }
    };

    trace!(
        count = occurrences.len(),
        max_count,
        max_date = %max_date,
        "Expanded recurrence"
    );
    occurrences
}

fn expand_daily(
    start: NaiveDateTime,
    interval: u32,
    max_date: NaiveDateTime,
    max_count: usize,
    exceptions: &ExceptionSet,
) -> Vec<NaiveDateTime> {
    let step = Days::new(u64::from(interval));
    let mut dates = Vec::new();
    let mut current = Some(start);

    while let Some(candidate) = current {
        if candidate > max_date || dates.len() >= max_count {
            break;
        }
        if !exceptions.contains(candidate.date()) {
            dates.push(candidate);
        }
        current = candidate.checked_add_days(step);
    }

    dates
}

fn expand_weekly(
    start: NaiveDateTime,
    interval: u32,
    by_day: &[Weekday],
    max_date: NaiveDateTime,
    max_count: usize,
    exceptions: &ExceptionSet,
) -> Vec<NaiveDateTime> {
    let time = start.time();
    let step = Days::new(7 * u64::from(interval));
    let mut dates = Vec::new();

    // Weeks run Sunday through Saturday.
    let mut week_start = start
        .date()
        .checked_sub_days(Days::new(u64::from(start.weekday().num_days_from_sunday())));
    let max_weeks = max_count.saturating_mul(2);
    let mut weeks = 0;

    while weeks < max_weeks && dates.len() < max_count {
        let Some(sunday) = week_start else {
            break;
        };

        for day in by_day {
            let Some(date) =
                sunday.checked_add_days(Days::new(u64::from(day.num_days_from_sunday())))
            else {
                return dates;
            };
            let candidate = date.and_time(time);
            if candidate < start {
                continue;
            }
            if candidate > max_date {
                return dates;
            }
            if !exceptions.contains(candidate.date()) {
                dates.push(candidate);
            }
            if dates.len() >= max_count {
                return dates;
            }
        }

        week_start = sunday.checked_add_days(step);
        weeks += 1;
    }

    dates
}
