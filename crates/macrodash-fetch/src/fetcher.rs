//! Bounded-concurrency fetching of a frequency group.

use futures::stream::{self, StreamExt};
use macrodash_types::{RawSeries, SeriesSpec};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{SeriesSource, SourceError};

/// Configuration for group fetches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum number of series requested at the same time.
    ///
    /// A value of 1 fetches the group sequentially.
    pub concurrency: usize,
    /// Upper bound on the time spent fetching one series, retries included.
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl FetchConfig {
    /// Configuration that fetches one series at a time.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            concurrency: 1,
            ..Self::default()
        }
    }
}

/// Why a series was excluded from its table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The provider call failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The provider answered but the series has no usable observation.
    #[error("Series returned no usable observations")]
    Empty,
}

/// A series that could not be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    /// The series that failed.
    pub spec: SeriesSpec,
    /// The failure reason.
    pub error: FetchError,
}

impl FetchFailure {
    /// Returns the display name of the failed series.
    #[must_use]
    pub fn name(&self) -> &str {
        self.spec.display_name()
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.spec, self.error)
    }
}

/// Outcome of fetching one frequency group.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Successfully fetched series, in the order they were requested.
    pub series: Vec<(SeriesSpec, RawSeries)>,
    /// Series that failed or came back empty, in request order.
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    /// Looks up a fetched series by display name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawSeries> {
        self.series
            .iter()
            .find(|(spec, _)| spec.display_name() == name)
            .map(|(_, series)| series)
    }

    /// Returns the number of series attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.series.len() + self.failures.len()
    }

    /// Returns the number of series fetched successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.series.len()
    }

    /// Converts the successful series into named columns for alignment.
    #[must_use]
    pub fn into_columns(self) -> (Vec<(String, RawSeries)>, Vec<FetchFailure>) {
        let columns = self
            .series
            .into_iter()
            .map(|(spec, series)| (spec.display_name().to_string(), series))
            .collect();
        (columns, self.failures)
    }
}

/// Callback invoked once per completed series with its success flag.
pub type ProgressHook = Arc<dyn Fn(&SeriesSpec, bool) + Send + Sync>;

/// Fetches series groups from a [`SeriesSource`] with bounded concurrency.
///
/// The worker pool lives only for the duration of one
/// [`fetch_group`](Self::fetch_group) call; nothing outlives it.
pub struct Fetcher<S> {
    source: S,
    config: FetchConfig,
    progress: Option<ProgressHook>,
}

impl<S> std::fmt::Debug for Fetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: SeriesSource> Fetcher<S> {
    /// Creates a fetcher over the given source.
    #[must_use]
    pub const fn new(source: S, config: FetchConfig) -> Self {
        Self {
            source,
            config,
            progress: None,
        }
    }

    /// Installs a progress callback.
    #[must_use]
    pub fn with_progress(mut self, hook: ProgressHook) -> Self {
        self.progress = Some(hook);
        self
    }

    /// Returns the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the fetch configuration.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches every series of a group.
    ///
    /// Failures are isolated per series: a failing or empty series is
    /// recorded in [`FetchReport::failures`] and never aborts its siblings.
    /// Results are returned in the order of `specs` regardless of
    /// completion order.
    pub async fn fetch_group(&self, specs: &[SeriesSpec]) -> FetchReport {
        let concurrency = self.config.concurrency.max(1);
        debug!(series = specs.len(), concurrency, "fetching group");

        let mut outcomes: Vec<(usize, Result<RawSeries, FetchError>)> =
            stream::iter(specs.iter().enumerate())
                .map(|(index, spec)| async move { (index, self.fetch_one(spec).await) })
                .buffer_unordered(concurrency)
                .collect()
                .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let mut report = FetchReport::default();
        for (index, outcome) in outcomes {
            let spec = specs[index].clone();
            match outcome {
                Ok(series) => report.series.push((spec, series)),
                Err(error) => {
                    warn!(series = %spec, %error, "excluding series");
                    report.failures.push(FetchFailure { spec, error });
                }
            }
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failures.len(),
            "group fetched"
        );
        report
    }

    async fn fetch_one(&self, spec: &SeriesSpec) -> Result<RawSeries, FetchError> {
        let request = self.source.get_series(spec.provider_code());
        let result = match tokio::time::timeout(self.config.request_timeout, request).await {
            Ok(Ok(series)) if series.has_no_data() => Err(FetchError::Empty),
            Ok(Ok(series)) => Ok(series),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(SourceError::Timeout.into()),
        };

        if let Some(hook) = &self.progress {
            hook(spec, result.is_ok());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticSource;
    use chrono::NaiveDate;
    use macrodash_types::{Frequency, Observation};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn monthly(name: &str) -> SeriesSpec {
        SeriesSpec::new(name, name, Frequency::Monthly, "Value")
    }

    fn series(len: u32) -> RawSeries {
        RawSeries::from_pairs(
            (1..=len).map(|m| (NaiveDate::from_ymd_opt(2024, m, 1).unwrap(), f64::from(m))),
        )
    }

    #[tokio::test]
    async fn test_failure_isolation() {
        let source = StaticSource::new()
            .with_series("A", series(3))
            .with_series("B", series(3))
            .with_failure("C", SourceError::Status { status: 500 })
            .with_series("D", series(3))
            .with_series("E", series(3));
        let fetcher = Fetcher::new(source, FetchConfig::default());
        let specs: Vec<_> = ["A", "B", "C", "D", "E"].into_iter().map(monthly).collect();

        let report = fetcher.fetch_group(&specs).await;

        assert_eq!(report.succeeded(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name(), "C");
        assert!(report.get("C").is_none());
        for name in ["A", "B", "D", "E"] {
            assert_eq!(report.get(name).unwrap().usable_len(), 3);
        }
        assert_eq!(fetcher.source().calls(), 5);
    }

    #[tokio::test]
    async fn test_results_keep_request_order() {
        let source = StaticSource::new()
            .with_series("Z", series(2))
            .with_series("A", series(2))
            .with_series("M", series(2));
        let fetcher = Fetcher::new(source, FetchConfig::default());
        let specs: Vec<_> = ["Z", "A", "M"].into_iter().map(monthly).collect();

        let report = fetcher.fetch_group(&specs).await;
        let names: Vec<_> = report.series.iter().map(|(s, _)| s.display_name()).collect();
        assert_eq!(names, vec!["Z", "A", "M"]);
    }

    #[tokio::test]
    async fn test_empty_series_is_a_failure() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let source = StaticSource::new()
            .with_series("EMPTY", RawSeries::default())
            .with_series(
                "ALL_MISSING",
                RawSeries::from_observations(vec![Observation::new(date, None)]),
            )
            .with_series("OK", series(1));
        let fetcher = Fetcher::new(source, FetchConfig::default());
        let specs: Vec<_> = ["EMPTY", "ALL_MISSING", "OK"].into_iter().map(monthly).collect();

        let report = fetcher.fetch_group(&specs).await;
        assert_eq!(report.succeeded(), 1);
        assert!(report.failures.iter().all(|f| f.error == FetchError::Empty));
    }

    #[tokio::test]
    async fn test_unknown_code_is_isolated() {
        let source = StaticSource::new().with_series("A", series(1));
        let fetcher = Fetcher::new(source, FetchConfig::default());
        let report = fetcher.fetch_group(&[monthly("A"), monthly("TYPO")]).await;

        assert_eq!(report.succeeded(), 1);
        assert!(matches!(
            report.failures[0].error,
            FetchError::Source(SourceError::InvalidSeries { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let mut source = StaticSource::new().with_delay(Duration::from_millis(50));
        let names: Vec<String> = (0..8).map(|i| format!("S{i}")).collect();
        for name in &names {
            source = source.with_series(name, series(2));
        }
        let config = FetchConfig {
            concurrency: 3,
            ..FetchConfig::default()
        };
        let fetcher = Fetcher::new(source, config);
        let specs: Vec<_> = names.iter().map(|n| monthly(n)).collect();

        let report = fetcher.fetch_group(&specs).await;
        assert_eq!(report.succeeded(), 8);
        assert!(fetcher.source().max_in_flight() <= 3);
        assert!(fetcher.source().max_in_flight() >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_mode() {
        let source = StaticSource::new()
            .with_delay(Duration::from_millis(10))
            .with_series("A", series(1))
            .with_series("B", series(1));
        let fetcher = Fetcher::new(source, FetchConfig::sequential());

        let report = fetcher.fetch_group(&[monthly("A"), monthly("B")]).await;
        assert_eq!(report.succeeded(), 2);
        assert_eq!(fetcher.source().max_in_flight(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_does_not_cancel_siblings() {
        let source = StaticSource::new()
            .with_series("FAST", series(2))
            .with_series("SLOW", series(2))
            .with_code_delay("SLOW", Duration::from_secs(600));
        let config = FetchConfig {
            concurrency: 2,
            request_timeout: Duration::from_secs(5),
        };
        let fetcher = Fetcher::new(source, config);

        let report = fetcher.fetch_group(&[monthly("FAST"), monthly("SLOW")]).await;
        assert_eq!(report.succeeded(), 1);
        assert!(report.get("FAST").is_some());
        assert_eq!(
            report.failures[0].error,
            FetchError::Source(SourceError::Timeout)
        );
    }

    #[tokio::test]
    async fn test_progress_hook_called_per_series() {
        let source = StaticSource::new()
            .with_series("A", series(1))
            .with_failure("B", SourceError::Timeout);
        let done = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));
        let (d, f) = (Arc::clone(&done), Arc::clone(&failed));
        let fetcher = Fetcher::new(source, FetchConfig::default()).with_progress(Arc::new(
            move |_spec: &SeriesSpec, ok: bool| {
                d.fetch_add(1, Ordering::SeqCst);
                if !ok {
                    f.fetch_add(1, Ordering::SeqCst);
                }
            },
        ));

        fetcher.fetch_group(&[monthly("A"), monthly("B")]).await;
        assert_eq!(done.load(Ordering::SeqCst), 2);
        assert_eq!(failed.load(Ordering::SeqCst), 1);
    }
}
