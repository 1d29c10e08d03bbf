//! Subcommand implementations.
//!
//! Commands write their JSON to the given writer so tests can capture it.

pub mod calendars;
pub mod config;
pub mod events;
pub mod parse;

use std::io::Write;

use matcal_core::{CalendarEvent, EventType};
use serde::Serialize;

use crate::error::ClientResult;

/// Writes `value` as one JSON document followed by a newline.
pub(crate) fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    pretty: bool,
) -> ClientResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Keeps only events of `event_type`, if given. Order is preserved.
pub(crate) fn filter_events(
    events: Vec<CalendarEvent>,
    event_type: Option<EventType>,
) -> Vec<CalendarEvent> {
    match event_type {
        Some(wanted) => events
            .into_iter()
            .filter(|e| e.event_type == wanted)
            .collect(),
        None => events,
    }
}
