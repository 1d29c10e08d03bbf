//! Client error types.

use thiserror::Error;

use matcal_providers::ProviderError;

use crate::config::ConfigError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_display() {
        let err: ClientError = ProviderError::not_found("Unknown calendar: varsity").into();
        assert_eq!(
            err.to_string(),
            "provider error: not_found: Unknown calendar: varsity"
        );
    }

    #[test]
    fn io_error_has_source() {
        use std::error::Error;
        let err: ClientError = std::io::Error::other("broken pipe").into();
        assert!(err.source().is_some());
    }
}
