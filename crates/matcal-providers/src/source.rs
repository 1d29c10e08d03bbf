//! FeedSource trait definition.
//!
//! A [`FeedSource`] retrieves raw feed text for a URL. It knows nothing about
//! the feed format; parsing happens afterwards in `matcal_core`.

use std::future::Future;
use std::pin::Pin;

use url::Url;

use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so services can hold an
/// `Arc<dyn FeedSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves raw feed text from a calendar provider.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; one source is shared by every
///   request.
/// - A transport failure or a non-success status must be returned as an
///   error for which [`ProviderError::is_upstream_failure`] is true.
/// - No retries; the caller decides.
///
/// [`ProviderError::is_upstream_failure`]: crate::ProviderError::is_upstream_failure
pub trait FeedSource: Send + Sync {
    /// Returns the name of this source (e.g. "http").
    fn name(&self) -> &str;

    /// Fetches the feed body at `url`.
    fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, ProviderResult<String>>;
}

impl<T: FeedSource + ?Sized> FeedSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, ProviderResult<String>> {
        (**self).fetch_feed(url)
    }
}

/// A source that serves fixed text, or a fixed error, for every URL.
///
/// Useful for tests and for parsing local files through the same service.
#[derive(Debug)]
pub struct StaticFeedSource {
    body: Result<String, (ProviderErrorCode, String)>,
}

impl StaticFeedSource {
    /// A source that always returns `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Ok(body.into()),
        }
    }

    /// A source that always fails with the given code and message.
    pub fn failing(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            body: Err((code, message.into())),
        }
    }
}

impl FeedSource for StaticFeedSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_feed<'a>(&'a self, _url: &'a Url) -> BoxFuture<'a, ProviderResult<String>> {
        let result = match &self.body {
            Ok(body) => Ok(body.clone()),
            Err((code, message)) => {
                Err(ProviderError::new(*code, message.clone()).with_provider(self.name()))
            }
        };
        Box::pin(async move { result })
    }
}
