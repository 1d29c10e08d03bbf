//! Calendar registry.
//!
//! Maps the short names clients ask for (`hs`, `youth-k3`, ...) to the feed
//! URL that serves them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Domain suffix of public Google group calendars.
const GOOGLE_GROUP_DOMAIN: &str = "group.calendar.google.com";

/// Built-in calendars: program name and public Google calendar id.
const DEFAULT_CALENDARS: [(&str, &str); 5] = [
    (
        "hs",
        "9f55d626e24928f89eb8094a54352ecdfbc555548fd551dbe1d9d259fbe8cf28",
    ),
    (
        "ms",
        "55a13336f44cac27c02c150420d279655fc4e9e2e55b4221966fc408222e84e1",
    ),
    (
        "youth-k3",
        "1b03eda3c06083f738cc1b9bbe5b110d38c23e626cf9f891b75eda5fe840a913",
    ),
    (
        "youth-48",
        "30e733c9abcffd8506881817b18c2f21239d78a7e0af6e32cc1d0b386c6e05d0",
    ),
    (
        "youth-gold",
        "0e73a02e0d56fd6493c4372439b6b750923614110a6acd3db5a2e79f67644782",
    ),
];

/// Where a registered calendar's feed lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEntry {
    /// A public Google group calendar id (without the `@group...` suffix).
    CalendarId(String),
    /// An explicit feed URL.
    Url(Url),
}

impl CalendarEntry {
    /// Returns the feed URL for this entry.
    pub fn feed_url(&self) -> ProviderResult<Url> {
        match self {
            Self::CalendarId(id) => google_feed_url(id),
            Self::Url(url) => Ok(url.clone()),
        }
    }
}

/// Builds the public basic ICS URL for a Google group calendar id.
pub fn google_feed_url(calendar_id: &str) -> ProviderResult<Url> {
    let address = format!("{}@{}", calendar_id, GOOGLE_GROUP_DOMAIN);
    let raw = format!(
        "https://calendar.google.com/calendar/ical/{}/public/basic.ics",
        urlencoding::encode(&address)
    );
    Url::parse(&raw).map_err(|e| {
        ProviderError::configuration(format!("Invalid calendar id '{}': {}", calendar_id, e))
            .with_source(e)
    })
}

/// Registered calendars, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRegistry {
    entries: BTreeMap<String, CalendarEntry>,
}

impl Default for CalendarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CalendarRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the built-in program calendars.
    pub fn with_defaults() -> Self {
        DEFAULT_CALENDARS
            .iter()
            .map(|(name, id)| (name.to_string(), CalendarEntry::CalendarId(id.to_string())))
            .collect()
    }

    /// Registers or replaces a calendar.
    pub fn insert(&mut self, name: impl Into<String>, entry: CalendarEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CalendarEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolves a calendar name to its feed URL.
    ///
    /// Names are matched exactly. An unknown name is a `NotFound` error.
    pub fn resolve(&self, name: &str) -> ProviderResult<Url> {
        self.entries
            .get(name)
            .ok_or_else(|| ProviderError::not_found(format!("Unknown calendar: {}", name)))?
            .feed_url()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CalendarEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CalendarEntry)> for CalendarRegistry {
    fn from_iter<I: IntoIterator<Item = (String, CalendarEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, CalendarEntry)> for CalendarRegistry {
    fn extend<I: IntoIterator<Item = (String, CalendarEntry)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
