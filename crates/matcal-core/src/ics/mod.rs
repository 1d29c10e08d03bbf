//! ICS feed engine.
//!
//! Turns raw feed text into a flat, date-ordered list of [`CalendarEvent`]s:
//!
//! ```text
//! raw text ─► extract_blocks ─► unfold ─► EventFields
//!                                            │
//!                          parse_ical_datetime (DTSTART)
//!                                            │
//!                         expand (only when RRULE is present)
//!                                            │
//!                                  classify ─► sort
//! ```
//!
//! [`CalendarEvent`]: crate::event::CalendarEvent

pub mod classify;
pub mod feed;
pub mod fields;
pub mod recurrence;
pub mod unfold;

pub use classify::classify;
pub use feed::parse_feed;
pub use fields::{EventFields, unescape_text};
pub use recurrence::{ExceptionSet, Frequency, RecurrenceRule, expand};
pub use unfold::{extract_blocks, unfold};
