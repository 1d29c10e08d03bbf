//! Calendar service: name lookup, fetch, parse, cache.

use std::time::Duration;

use matcal_core::{CalendarEvent, ErrorResponse, parse_feed};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::FeedCache;
use crate::config::FeedConfig;
use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};
use crate::registry::CalendarRegistry;
use crate::source::FeedSource;

/// Serves parsed events for registered calendars.
///
/// Safe to share across tasks behind an `Arc`; the cache is guarded by an
/// async mutex that is never held across a fetch.
#[derive(Debug)]
pub struct CalendarService<S> {
    source: S,
    registry: CalendarRegistry,
    cache: Option<Mutex<FeedCache>>,
}

impl<S: FeedSource> CalendarService<S> {
    /// Creates a service whose cache keeps entries for `cache_ttl`.
    /// A zero TTL disables caching.
    pub fn new(source: S, registry: CalendarRegistry, cache_ttl: Duration) -> Self {
        let cache = (!cache_ttl.is_zero()).then(|| Mutex::new(FeedCache::new(cache_ttl)));
        Self {
            source,
            registry,
            cache,
        }
    }

    pub fn with_config(source: S, registry: CalendarRegistry, config: &FeedConfig) -> Self {
        Self::new(source, registry, config.cache_ttl)
    }

    pub fn registry(&self) -> &CalendarRegistry {
        &self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the events of calendar `name`, serving from cache when fresh.
    pub async fn events(&self, name: &str) -> ProviderResult<Vec<CalendarEvent>> {
        if let Some(cache) = &self.cache {
            if let Some(events) = cache.lock().await.get_valid(name) {
                debug!(calendar = %name, count = events.len(), "Serving cached feed");
                return Ok(events.to_vec());
            }
        }

        let events = self.events_uncached(name).await?;

        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().await;
            cache.evict_expired();
            cache.insert(name, events.clone());
        }
        Ok(events)
    }

    /// Fetches and parses calendar `name`, bypassing the cache.
    ///
    /// A fetch failure is returned as is; the parser never runs on a failed
    /// response.
    pub async fn events_uncached(&self, name: &str) -> ProviderResult<Vec<CalendarEvent>> {
        let url = self.registry.resolve(name)?;
        debug!(calendar = %name, source = self.source.name(), "Fetching feed");

        let body = self.source.fetch_feed(&url).await.inspect_err(|e| {
            warn!(
                calendar = %name,
                error = %e,
                retryable = e.is_retryable(),
                "Failed to fetch calendar"
            );
        })?;

        let events = parse_feed(&body);
        debug!(calendar = %name, count = events.len(), "Parsed feed");
        Ok(events)
    }

    /// Number of calendars currently held in the cache, expired or not.
    pub async fn cached_len(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.lock().await.len(),
            None => 0,
        }
    }

    /// Drops any cached events for `name`.
    pub async fn invalidate(&self, name: &str) {
        if let Some(cache) = &self.cache {
            cache.lock().await.remove(name);
        }
    }
}

/// Maps a service error to the JSON error envelope returned to clients.
pub fn error_response(name: &str, err: &ProviderError) -> ErrorResponse {
    match err.code() {
        ProviderErrorCode::NotFound => ErrorResponse::unknown_calendar(name),
        _ => ErrorResponse::fetch_failed(),
    }
}

/// HTTP status code a service error is reported with.
pub fn error_status(err: &ProviderError) -> u16 {
    match err.code() {
        ProviderErrorCode::NotFound => 404,
        _ => 502,
    }
}
