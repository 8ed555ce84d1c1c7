//! In-memory series source.

use async_trait::async_trait;
use macrodash_types::{Observation, RawSeries};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::{ParseError, SeriesSource, SourceError};

/// Serves series from memory instead of the network.
///
/// Used for offline runs from a fixture file and as a test double. Calls
/// are counted, and the source can be switched into an outage state where
/// every request fails.
#[derive(Debug, Default)]
pub struct StaticSource {
    series: HashMap<String, Result<RawSeries, SourceError>>,
    delay: Option<Duration>,
    code_delays: HashMap<String, Duration>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StaticSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a fixture document mapping provider codes to observations.
    ///
    /// ```json
    /// { "GDP": [ { "date": "2024-01-01", "value": 28269.2 } ] }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let doc: HashMap<String, Vec<Observation>> =
            serde_json::from_str(json).map_err(|e| ParseError::Malformed(e.to_string()))?;
        Ok(doc.into_iter().fold(Self::new(), |source, (code, obs)| {
            source.with_series(code, RawSeries::from_observations(obs))
        }))
    }

    /// Registers a series under a provider code.
    #[must_use]
    pub fn with_series(mut self, code: impl Into<String>, series: RawSeries) -> Self {
        self.series.insert(code.into(), Ok(series));
        self
    }

    /// Registers a failure for a provider code.
    #[must_use]
    pub fn with_failure(mut self, code: impl Into<String>, error: SourceError) -> Self {
        self.series.insert(code.into(), Err(error));
        self
    }

    /// Delays every response.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delays responses for one provider code.
    #[must_use]
    pub fn with_code_delay(mut self, code: impl Into<String>, delay: Duration) -> Self {
        self.code_delays.insert(code.into(), delay);
        self
    }

    /// Switches the outage state. While unavailable every call fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the number of calls served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the highest number of simultaneous calls observed.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Returns the number of registered provider codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if no code is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[async_trait]
impl SeriesSource for StaticSource {
    async fn get_series(&self, provider_code: &str) -> Result<RawSeries, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.code_delays.get(provider_code).copied().or(self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let result = if self.unavailable.load(Ordering::SeqCst) {
            Err(SourceError::Status { status: 503 })
        } else {
            self.series.get(provider_code).cloned().unwrap_or_else(|| {
                Err(SourceError::InvalidSeries {
                    code: provider_code.to_string(),
                    message: "unknown series".to_string(),
                })
            })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let source = StaticSource::from_json(
            r#"{
                "GDP": [{"date": "2024-01-01", "value": 1.0}, {"date": "2024-04-01", "value": null}],
                "CPIAUCSL": []
            }"#,
        )
        .unwrap();
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(StaticSource::from_json("[1, 2]").is_err());
    }

    #[tokio::test]
    async fn test_outage_switch() {
        let source = StaticSource::new().with_series("GDP", RawSeries::default());
        assert!(source.get_series("GDP").await.is_ok());

        source.set_unavailable(true);
        assert_eq!(
            source.get_series("GDP").await,
            Err(SourceError::Status { status: 503 })
        );

        source.set_unavailable(false);
        assert!(source.get_series("GDP").await.is_ok());
        assert_eq!(source.calls(), 3);
    }
}
