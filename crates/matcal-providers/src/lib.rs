//! Feed retrieval for matcal.
//!
//! This crate sits between a calendar name and the parsed events:
//!
//! - [`FeedSource`] - fetches raw feed text for a URL
//! - [`HttpFeedSource`] - the `reqwest` implementation
//! - [`CalendarRegistry`] - short names to feed URLs
//! - [`FeedCache`] - parsed events with a TTL
//! - [`CalendarService`] - lookup, fetch, parse and cache in one call
//!
//! # Architecture
//!
//! ```text
//!   "hs" ──► CalendarRegistry ──► Url
//!                                  │
//!                                  ▼
//!                             FeedSource ──► feed text
//!                                                │
//!                                                ▼ matcal_core::parse_feed
//!                                        Vec<CalendarEvent> ──► FeedCache
//! ```
//!
//! # Example
//!
//! ```ignore
//! use matcal_providers::{CalendarRegistry, CalendarService, FeedConfig, HttpFeedSource};
//!
//! let config = FeedConfig::default();
//! let source = HttpFeedSource::new(&config)?;
//! let service = CalendarService::with_config(source, CalendarRegistry::default(), &config);
//! let events = service.events("hs").await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod registry;
pub mod service;
pub mod source;

pub use cache::{CacheEntry, FeedCache};
pub use config::FeedConfig;
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use http::HttpFeedSource;
pub use registry::{CalendarEntry, CalendarRegistry, google_feed_url};
pub use service::{CalendarService, error_response, error_status};
pub use source::{BoxFuture, FeedSource, StaticFeedSource};
