//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/matcal/config.toml` by default. Every field is optional; a
//! missing file means the built-in calendars with default feed settings.
//!
//! ```toml
//! [feed]
//! timeout_secs = 10
//! cache_ttl_secs = 3600
//!
//! [calendars]
//! hs = { calendar_id = "9f55d6..." }
//! club = { url = "https://example.com/club.ics" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use matcal_providers::{CalendarEntry, CalendarRegistry, FeedConfig};

/// Errors raised while loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the matcal client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Feed fetching settings.
    pub feed: FeedSettings,

    /// Calendars added to, or replacing, the built-in ones.
    pub calendars: BTreeMap<String, CalendarEntry>,
}

/// Feed fetching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Lifetime of a parsed feed in seconds. Zero disables caching.
    pub cache_ttl_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            timeout_secs: FeedConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            cache_ttl_secs: FeedConfig::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matcal")
    }

    /// Builds the provider feed configuration.
    pub fn feed_config(&self) -> FeedConfig {
        let config = FeedConfig::new()
            .with_timeout(Duration::from_secs(self.feed.timeout_secs))
            .with_cache_ttl(Duration::from_secs(self.feed.cache_ttl_secs));
        match &self.feed.user_agent {
            Some(agent) => config.with_user_agent(agent),
            None => config,
        }
    }

    /// Built-in calendars with the configured ones layered on top.
    pub fn registry(&self) -> CalendarRegistry {
        let mut registry = CalendarRegistry::with_defaults();
        registry.extend(
            self.calendars
                .iter()
                .map(|(name, entry)| (name.clone(), entry.clone())),
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_is_default() {
        let file = write_config("");
        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.feed.timeout_secs, 30);
        assert_eq!(config.feed.cache_ttl_secs, 3600);
        assert_eq!(config.registry().len(), 5);
    }

    #[test]
    fn feed_settings() {
        let file = write_config(
            r#"
[feed]
timeout_secs = 5
user_agent = "matcal-test"
cache_ttl_secs = 0
"#,
        );
        let config = ClientConfig::load_from(file.path()).unwrap();
        let feed = config.feed_config();
        assert_eq!(feed.timeout, Duration::from_secs(5));
        assert_eq!(feed.user_agent, "matcal-test");
        assert!(!feed.caching_enabled());
    }

    #[test]
    fn calendars_extend_and_override_defaults() {
        let file = write_config(
            r#"
[calendars]
hs = { calendar_id = "override" }
club = { url = "https://example.com/club.ics" }
"#,
        );
        let config = ClientConfig::load_from(file.path()).unwrap();
        let registry = config.registry();

        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.get("hs"),
            Some(&CalendarEntry::CalendarId("override".into()))
        );
        assert_eq!(
            registry.resolve("club").unwrap().as_str(),
            "https://example.com/club.ics"
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let file = write_config("[feed\ntimeout_secs = ");
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn toml_output_reloads() {
        let mut config = ClientConfig::default();
        config
            .calendars
            .insert("club".into(), CalendarEntry::CalendarId("abc".into()));

        let file = write_config(&config.to_toml().unwrap());
        assert_eq!(ClientConfig::load_from(file.path()).unwrap(), config);
    }

    #[test]
    fn default_path_ends_with_matcal() {
        let path = ClientConfig::default_path();
        assert!(path.ends_with("matcal/config.toml"));
    }
}
