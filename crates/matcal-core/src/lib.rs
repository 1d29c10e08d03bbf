//! Core types and the ICS feed engine.
//!
//! The entry point is [`parse_feed`]: raw feed text in, date-ordered
//! [`CalendarEvent`]s out. It performs no I/O and never fails; blocks it
//! cannot use are skipped.

pub mod event;
pub mod ics;
pub mod time;
pub mod tracing;

pub use event::{CalendarEvent, ErrorResponse, EventType, EventsResponse};
pub use ics::{
    EventFields, ExceptionSet, Frequency, RecurrenceRule, classify, expand, parse_feed,
};
pub use time::{DISPLAY_TIMEZONE, ParsedDateTime, format_date, format_time, parse_ical_datetime};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
