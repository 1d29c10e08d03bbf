//! Error types for feed retrieval.
//!
//! Parsing never fails, so every error here comes from getting the feed:
//! resolving a calendar name, or fetching its text from the provider.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Transport failure - connection refused, timeout, DNS resolution, TLS.
    NetworkError,
    /// The provider answered with a non-success status.
    UpstreamStatus,
    /// The provider answered but the body could not be read.
    InvalidResponse,
    /// The calendar name is not registered.
    NotFound,
    /// Configuration error - bad URL, unusable client settings.
    ConfigurationError,
}

impl ProviderErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::UpstreamStatus)
    }

    /// Returns true if the feed could not be retrieved from the provider.
    ///
    /// These are the failures callers report as "failed to fetch calendar";
    /// the parser is never run for them.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::UpstreamStatus | Self::InvalidResponse
        )
    }

    /// Returns a stable snake_case name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::UpstreamStatus => "upstream_status",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while resolving or fetching a feed.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// The source that produced this error (e.g. "http").
    provider: Option<String>,
    /// HTTP status returned by the provider, for `UpstreamStatus`.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            status: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an error for a non-success HTTP status.
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::UpstreamStatus, message);
        err.status = Some(status);
        err
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the HTTP status, if the provider answered with one.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    pub fn is_upstream_failure(&self) -> bool {
        self.code.is_upstream_failure()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        Ok(())
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
