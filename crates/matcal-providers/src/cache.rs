//! Parsed feed cache with TTL support.
//!
//! Entries are keyed by calendar name and hold the fully parsed, sorted
//! event list, so a cache hit skips both the fetch and the parse.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use matcal_core::CalendarEvent;
use tracing::{debug, trace};

use crate::config::FeedConfig;

/// Cache entry containing events and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub events: Vec<CalendarEvent>,
    /// When the entry expires (monotonic clock).
    expires_at: Instant,
}

impl CacheEntry {
    pub fn new(events: Vec<CalendarEvent>, ttl: Duration) -> Self {
        Self {
            events,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Feed cache keyed by calendar name.
#[derive(Debug)]
pub struct FeedCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(FeedConfig::DEFAULT_CACHE_TTL_SECS))
    }
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached events for `name`, if present and not expired.
    pub fn get_valid(&self, name: &str) -> Option<&[CalendarEvent]> {
        self.entries
            .get(name)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.events.as_slice())
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.get_valid(name).is_some()
    }

    /// Inserts or replaces the events for `name` and resets its TTL.
    pub fn insert(&mut self, name: impl Into<String>, events: Vec<CalendarEvent>) {
        let name = name.into();
        debug!(calendar = %name, count = events.len(), "Cached feed");
        self.entries.insert(name, CacheEntry::new(events, self.ttl));
    }

    pub fn remove(&mut self, name: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(name);
        if entry.is_some() {
            debug!(calendar = %name, "Removed cache entry");
        }
        entry
    }

    /// Removes all expired entries and returns how many were dropped.
    pub fn evict_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|name, entry| {
            let keep = !entry.is_expired();
            if !keep {
                trace!(calendar = %name, "Evicting expired cache entry");
            }
            keep
        });
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!(evicted, "Evicted expired cache entries");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use matcal_core::EventType;
    use std::thread;

    fn make_event(title: &str) -> CalendarEvent {
        CalendarEvent::new(
            title,
            "Main Gym",
            EventType::Practice,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveTime::from_hms_opt(15, 30, 0),
        )
    }

    #[test]
    fn default_ttl_is_one_hour() {
        assert_eq!(FeedCache::default().ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn entry_expiration() {
        let entry = CacheEntry::new(vec![make_event("Practice")], Duration::from_millis(50));
        assert!(!entry.is_expired());
        thread::sleep(Duration::from_millis(60));
        assert!(entry.is_expired());
    }

    #[test]
    fn insert_and_get() {
        let mut cache = FeedCache::new(Duration::from_secs(60));
        cache.insert("hs", vec![make_event("Practice")]);

        let events = cache.get_valid("hs").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Practice");
        assert!(cache.get_valid("ms").is_none());
    }

    #[test]
    fn expired_entries_are_not_served() {
        let mut cache = FeedCache::new(Duration::from_millis(50));
        cache.insert("hs", vec![make_event("Practice")]);
        assert!(cache.is_valid("hs"));

        thread::sleep(Duration::from_millis(60));
        assert!(!cache.is_valid("hs"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.evict_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces_events() {
        let mut cache = FeedCache::new(Duration::from_secs(60));
        cache.insert("hs", vec![make_event("Old")]);
        cache.insert("hs", vec![make_event("New"), make_event("Newer")]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_valid("hs").unwrap().len(), 2);
    }

    #[test]
    fn remove_entry() {
        let mut cache = FeedCache::new(Duration::from_secs(60));
        cache.insert("hs", vec![make_event("Practice")]);
        cache.insert("ms", vec![]);

        assert!(cache.remove("hs").is_some());
        assert!(cache.remove("hs").is_none());
        assert_eq!(cache.len(), 1);
        assert!(cache.is_valid("ms"));
    }
}
