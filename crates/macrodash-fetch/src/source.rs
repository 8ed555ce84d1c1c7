//! Data provider abstraction.

use async_trait::async_trait;
use macrodash_types::RawSeries;
use thiserror::Error;

use crate::ParseError;

/// Errors a data provider can report for a single series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server returned an unexpected status.
    #[error("Server error: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The provider does not know the series code.
    #[error("Invalid series: {code}: {message}")]
    InvalidSeries {
        /// The rejected provider code.
        code: String,
        /// Provider explanation.
        message: String,
    },

    /// The provider kept rejecting requests after all retries.
    #[error("Rate limit exceeded after {0} attempts")]
    RateLimited(u32),

    /// The request did not complete in time.
    #[error("Request timed out")]
    Timeout,

    /// The response body could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No API key configured.
    #[error("FRED_API_KEY environment variable not set")]
    MissingApiKey,
}

/// The request URL carries the API key, so it is stripped from the message.
impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e.without_url().to_string())
        }
    }
}

/// Retrieves one series from a remote data provider.
///
/// Implementations must be shareable across the fetch worker pool.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetches all observations for the given provider code.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid codes, network failure or rate limiting.
    async fn get_series(&self, provider_code: &str) -> Result<RawSeries, SourceError>;
}

#[async_trait]
impl<S: SeriesSource + ?Sized> SeriesSource for std::sync::Arc<S> {
    async fn get_series(&self, provider_code: &str) -> Result<RawSeries, SourceError> {
        (**self).get_series(provider_code).await
    }
}
