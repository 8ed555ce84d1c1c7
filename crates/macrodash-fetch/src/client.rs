//! HTTP client for the FRED observations API.

use async_trait::async_trait;
use macrodash_types::RawSeries;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::parse::{parse_error_message, parse_observations};
use crate::url::{BASE_URL, observations_url};
use crate::{SeriesSource, SourceError};

/// Environment variable holding the FRED API key.
pub const API_KEY_ENV: &str = "FRED_API_KEY";

/// Configuration for the FRED client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// Maximum idle connections kept per host.
    pub pool_size: usize,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            pool_size: 10,
            user_agent: format!("macrodash/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// FRED client with connection pooling and retry logic.
///
/// Constructed explicitly and handed to the fetcher; there is no global
/// client instance.
#[derive(Clone)]
pub struct FredClient {
    client: Client,
    api_key: String,
    config: ClientConfig,
}

impl std::fmt::Debug for FredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredClient")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FredClient {
    /// Creates a new client with the given API key and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey);
        }

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Creates a client from `FRED_API_KEY`, loading `.env` if present.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] if the variable is not set.
    pub fn from_env(config: ClientConfig) -> Result<Self, SourceError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| SourceError::MissingApiKey)?;
        Self::new(api_key, config)
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads and parses the observations of one series.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries, the series
    /// code is unknown, or the body cannot be parsed.
    pub async fn observations(&self, series_id: &str) -> Result<RawSeries, SourceError> {
        let url = observations_url(&self.config.base_url, series_id, &self.api_key);
        let mut attempts = 0;

        loop {
            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
                        let body = response.bytes().await?;
                        let message = parse_error_message(&body)
                            .unwrap_or_else(|| status.to_string());
                        return Err(SourceError::InvalidSeries {
                            code: series_id.to_string(),
                            message,
                        });
                    }

                    // Retry on server errors (5xx) and rate limiting (429)
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            debug!(series_id, %status, attempts, ?delay, "retrying");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        if status == StatusCode::TOO_MANY_REQUESTS {
                            return Err(SourceError::RateLimited(attempts + 1));
                        }
                        return Err(SourceError::Status {
                            status: status.as_u16(),
                        });
                    }

                    if !status.is_success() {
                        return Err(SourceError::Status {
                            status: status.as_u16(),
                        });
                    }

                    let body = response.bytes().await?;
                    return Ok(parse_observations(&body)?);
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(series_id, error = %e.without_url(), attempts, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter within ±25%
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[async_trait]
impl SeriesSource for FredClient {
    async fn get_series(&self, provider_code: &str) -> Result<RawSeries, SourceError> {
        self.observations(provider_code).await
    }
}
