//! HTTP feed source.
//!
//! Fetches public ICS feeds with a plain `GET`. Any transport error or
//! non-success status is an upstream failure.

use reqwest::{Client, Response};
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::FeedConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, FeedSource};

const NAME: &str = "http";

/// A [`FeedSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    /// Creates a new source with the given configuration.
    pub fn new(config: &FeedConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_provider(NAME)
            })?;

        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> ProviderResult<String> {
        trace!(url = %url, "Fetching feed");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            ProviderError::network(format!("Request failed: {}", e))
                .with_provider(NAME)
                .with_source(e)
        })?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if !status.is_success() {
            warn!(status = %status, url = %response.url(), "Feed request failed");
            return Err(ProviderError::upstream_status(
                status.as_u16(),
                format!("Feed request returned {}", status),
            )
            .with_provider(NAME));
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::invalid_response(format!("Failed to read response: {}", e))
                .with_provider(NAME)
                .with_source(e)
        })?;
        debug!(bytes = body.len(), "Fetched feed");
        Ok(body)
    }
}

impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        NAME
    }

    fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(self.get(url))
    }
}
