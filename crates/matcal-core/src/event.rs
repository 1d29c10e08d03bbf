//! Event types produced by the feed engine.
//!
//! This module provides the output model:
//! - [`CalendarEvent`]: One discrete, display-ready occurrence
//! - [`EventType`]: The category a title was classified into
//! - [`EventsResponse`] / [`ErrorResponse`]: The JSON envelopes returned to callers

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time::{format_date, format_time};

/// The category of a calendar event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Practice,
    Tournament,
    Match,
    #[default]
    Event,
}

impl EventType {
    /// Returns the serialized name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::Tournament => "tournament",
            Self::Match => "match",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "practice" => Ok(Self::Practice),
            "tournament" => Ok(Self::Tournament),
            "match" => Ok(Self::Match),
            "event" => Ok(Self::Event),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

/// A single calendar occurrence.
///
/// `date` is always `YYYY-MM-DD`. `time` is a 12-hour clock string such as
/// `6:30 PM`, or empty when the occurrence is all-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl CalendarEvent {
    /// Creates an event for one occurrence.
    ///
    /// Pass `None` for `time` when the occurrence is all-day.
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        event_type: EventType,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Self {
        Self {
            title: title.into(),
            date: format_date(date),
            time: time.map(format_time).unwrap_or_default(),
            location: location.into(),
            event_type,
        }
    }

    /// Returns `true` if this occurrence has no time of day.
    pub fn is_all_day(&self) -> bool {
        self.time.is_empty()
    }
}

/// Successful response body: `{"events": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<CalendarEvent>,
}

impl EventsResponse {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }
}

/// Failure response body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Message returned when the upstream feed could not be retrieved.
    pub const FETCH_FAILED: &'static str = "Failed to fetch calendar";

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// The response for an upstream fetch failure.
    pub fn fetch_failed() -> Self {
        Self::new(Self::FETCH_FAILED)
    }

    /// The response for a calendar name that is not registered.
    pub fn unknown_calendar(name: &str) -> Self {
        Self::new(format!("Unknown calendar: {}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timed_event_formats_fields() {
        let event = CalendarEvent::new(
            "Practice",
            "Main Gym",
            EventType::Practice,
            date(2026, 1, 5),
            NaiveTime::from_hms_opt(18, 30, 0),
        );
        assert_eq!(event.date, "2026-01-05");
        assert_eq!(event.time, "6:30 PM");
        assert!(!event.is_all_day());
    }

    #[test]
    fn all_day_event_has_empty_time() {
        let event = CalendarEvent::new("Weigh-ins", "", EventType::Event, date(2026, 1, 6), None);
        assert_eq!(event.time, "");
        assert!(event.is_all_day());
    }

    #[test]
    fn event_type_round_trips_through_str() {
        for ty in [
            EventType::Practice,
            EventType::Tournament,
            EventType::Match,
            EventType::Event,
        ] {
            assert_eq!(ty.as_str().parse::<EventType>(), Ok(ty));
        }
        assert!("scrimmage".parse::<EventType>().is_err());
        assert_eq!("MATCH".parse::<EventType>(), Ok(EventType::Match));
    }

    #[test]
    fn serializes_with_type_key() {
        let event = CalendarEvent::new(
            "Varsity Dual @ Howell",
            "Howell HS",
            EventType::Match,
            date(2026, 1, 8),
            NaiveTime::from_hms_opt(19, 0, 0),
        );
        insta::assert_json_snapshot!(EventsResponse::new(vec![event]), @r#"
        {
          "events": [
            {
              "title": "Varsity Dual @ Howell",
              "date": "2026-01-08",
              "time": "7:00 PM",
              "location": "Howell HS",
              "type": "match"
            }
          ]
        }
        "#);
    }

    #[test]
    fn error_responses() {
        let json = serde_json::to_string(&ErrorResponse::fetch_failed()).unwrap();
        assert_eq!(json, r#"{"error":"Failed to fetch calendar"}"#);
        assert_eq!(
            ErrorResponse::unknown_calendar("varsity").error,
            "Unknown calendar: varsity"
        );
    }
}
