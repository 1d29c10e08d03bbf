//! `matcal parse <path>`.

use std::io::{Read, Write};
use std::path::Path;

use matcal_core::{EventType, EventsResponse, parse_feed};
use tracing::debug;

use super::{filter_events, write_json};
use crate::error::ClientResult;

/// Reads feed text from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> ClientResult<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parses a local feed and writes the events envelope.
pub fn run<W: Write>(
    path: &Path,
    event_type: Option<EventType>,
    pretty: bool,
    out: &mut W,
) -> ClientResult<()> {
    let text = read_input(path)?;
    debug!(path = %path.display(), bytes = text.len(), "Parsing feed");

    let events = filter_events(parse_feed(&text), event_type);
    write_json(out, &EventsResponse::new(events), pretty)
}
