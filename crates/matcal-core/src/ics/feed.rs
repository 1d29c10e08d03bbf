//! Feed parsing entry point.

use tracing::{debug, trace};

use crate::event::CalendarEvent;
use crate::time::parse_ical_datetime;

use super::classify::classify;
use super::fields::EventFields;
use super::recurrence::{ExceptionSet, RecurrenceRule, expand};
use super::unfold::{extract_blocks, unfold};

/// Parses feed text into a date-ordered list of events.
///
/// Blocks missing a title or a usable start value are skipped. Recurring
/// blocks contribute one event per expanded occurrence. Events are sorted by
/// date; events on the same date keep the order they were produced in.
pub fn parse_feed(text: &str) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for (index, block) in extract_blocks(text).into_iter().enumerate() {
        let unfolded = unfold(block);
        let fields = EventFields::from_block(&unfolded);
        if !fields.is_complete() {
            debug!(block = index, "Skipping event without title or start");
            continue;
        }

        let Some(start) = parse_ical_datetime(&fields.start) else {
            debug!(block = index, start = %fields.start, "Skipping event with invalid start");
            continue;
        };

        let event_type = classify(&fields.title);

        if !fields.is_recurring() {
            events.push(CalendarEvent::new(
                &fields.title,
                &fields.location,
                event_type,
                start.date(),
                start.time(),
            ));
            continue;
        }

        let rule = RecurrenceRule::parse(&fields.rrule);
        let exceptions = ExceptionSet::from_values(&fields.exdates);
        let occurrences = expand(&start, &rule, &exceptions);
        trace!(
            block = index,
            title = %fields.title,
            occurrences = occurrences.len(),
            excluded = exceptions.len(),
            "Expanded recurring event"
        );

        events.extend(occurrences.into_iter().map(|dt| {
            CalendarEvent::new(
                &fields.title,
                &fields.location,
                event_type,
                dt.date(),
                (!start.is_all_day()).then(|| dt.time()),
            )
        }));
    }

    // Stable: same-date events stay in emission order.
    events.sort_by(|a, b| a.date.cmp(&b.date));
    debug!(count = events.len(), "Parsed calendar feed");
    events
}
