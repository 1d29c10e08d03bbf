//! `matcal events <name>`.

use std::io::Write;

use matcal_core::{EventType, EventsResponse};
use matcal_providers::{CalendarService, FeedSource, error_response};
use tracing::debug;

use super::{filter_events, write_json};
use crate::error::ClientResult;

/// Options for the events command.
#[derive(Debug, Clone, Default)]
pub struct EventsOptions {
    pub no_cache: bool,
    pub event_type: Option<EventType>,
    pub pretty: bool,
}

/// Fetches calendar `name` and writes the events envelope.
///
/// On failure the error envelope is written instead and the error is
/// returned, so the process exits non-zero.
pub async fn run<S, W>(
    service: &CalendarService<S>,
    name: &str,
    options: &EventsOptions,
    out: &mut W,
) -> ClientResult<()>
where
    S: FeedSource,
    W: Write,
{
    let result = if options.no_cache {
        service.events_uncached(name).await
    } else {
        service.events(name).await
    };

    match result {
        Ok(events) => {
            let events = filter_events(events, options.event_type);
            debug!(calendar = %name, count = events.len(), "Writing events");
            write_json(out, &EventsResponse::new(events), options.pretty)
        }
        Err(err) => {
            write_json(out, &error_response(name, &err), options.pretty)?;
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use matcal_providers::{CalendarRegistry, ProviderErrorCode, StaticFeedSource};
    use std::time::Duration;

    const FEED: &str = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:Practice\n\
DTSTART:20260105T153000\n\
LOCATION:Main Gym\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
SUMMARY:@ Williamston\n\
DTSTART:20260107T180000\n\
END:VEVENT\n\
END:VCALENDAR\n";

    fn service(source: StaticFeedSource) -> CalendarService<StaticFeedSource> {
        CalendarService::new(source, CalendarRegistry::with_defaults(), Duration::from_secs(60))
    }

    async fn run_to_string(
        service: &CalendarService<StaticFeedSource>,
        name: &str,
        options: EventsOptions,
    ) -> (ClientResult<()>, String) {
        let mut out = Vec::new();
        let result = run(service, name, &options, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn prints_events_envelope() {
        let service = service(StaticFeedSource::new(FEED));
        let (result, out) = run_to_string(&service, "hs", EventsOptions::default()).await;

        assert!(result.is_ok());
        assert_eq!(
            out,
            concat!(
                r#"{"events":[{"title":"Practice","date":"2026-01-05","time":"3:30 PM","location":"Main Gym","type":"practice"},"#,
                r#"{"title":"@ Williamston","date":"2026-01-07","time":"6:00 PM","location":"","type":"match"}]}"#,
                "\n"
            )
        );
    }

    #[tokio::test]
    async fn type_filter_applies() {
        let service = service(StaticFeedSource::new(FEED));
        let options = EventsOptions {
            event_type: Some(EventType::Match),
            no_cache: true,
            ..Default::default()
        };
        let (_, out) = run_to_string(&service, "hs", options).await;

        let response: EventsResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.events.len(), 1);
        assert_eq!(response.events[0].title, "@ Williamston");
    }

    #[tokio::test]
    async fn unknown_calendar_prints_error_envelope() {
        let service = service(StaticFeedSource::new(FEED));
        let (result, out) = run_to_string(&service, "varsity", EventsOptions::default()).await;

        assert!(matches!(result, Err(ClientError::Provider(_))));
        assert_eq!(out, "{\"error\":\"Unknown calendar: varsity\"}\n");
    }

    #[tokio::test]
    async fn fetch_failure_prints_error_envelope() {
        let service = service(StaticFeedSource::failing(
            ProviderErrorCode::NetworkError,
            "connection refused",
        ));
        let (result, out) = run_to_string(&service, "ms", EventsOptions::default()).await;

        assert!(result.is_err());
        assert_eq!(out, "{\"error\":\"Failed to fetch calendar\"}\n");
    }
}
