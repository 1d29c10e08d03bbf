//! Feed fetching configuration.

use std::time::Duration;

/// Configuration for [`HttpFeedSource`](crate::http::HttpFeedSource) and
/// [`CalendarService`](crate::service::CalendarService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,

    /// How long a parsed feed is served from cache.
    pub cache_ttl: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("matcal/{}", env!("CARGO_PKG_VERSION")),
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl FeedConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default cache lifetime in seconds (one hour).
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the cache lifetime. Zero disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Returns true if parsed feeds should be cached.
    pub fn caching_enabled(&self) -> bool {
        !self.cache_ttl.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert!(config.user_agent.starts_with("matcal/"));
        assert!(config.caching_enabled());
    }

    #[test]
    fn builder_methods() {
        let config = FeedConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent")
            .with_cache_ttl(Duration::ZERO);

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
        assert!(!config.caching_enabled());
    }
}
