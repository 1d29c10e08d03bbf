//! `matcal calendars`.

use std::io::Write;

use matcal_providers::CalendarRegistry;
use serde::Serialize;
use url::Url;

use super::write_json;
use crate::error::ClientResult;

#[derive(Debug, Serialize)]
struct CalendarListing<'a> {
    name: &'a str,
    url: Url,
}

/// Writes every registered calendar with its resolved feed URL.
pub fn run<W: Write>(registry: &CalendarRegistry, pretty: bool, out: &mut W) -> ClientResult<()> {
    let listings = registry
        .iter()
        .map(|(name, entry)| {
            Ok(CalendarListing {
                name,
                url: entry.feed_url()?,
            })
        })
        .collect::<ClientResult<Vec<_>>>()?;

    write_json(out, &listings, pretty)
}
