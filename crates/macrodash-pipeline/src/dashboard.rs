//! Cached pipeline front end.

use macrodash_fetch::SeriesSource;
use macrodash_types::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::{Pipeline, Snapshot, TtlCache};

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// How long a snapshot is served before the pipeline runs again.
    pub ttl: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
        }
    }
}

/// Serves pipeline snapshots through a TTL cache.
#[derive(Debug)]
pub struct Dashboard<S> {
    pipeline: Pipeline<S>,
    cache: TtlCache<Snapshot>,
    config: DashboardConfig,
}

impl<S: SeriesSource> Dashboard<S> {
    /// Creates a dashboard with an empty cache.
    #[must_use]
    pub fn new(pipeline: Pipeline<S>, config: DashboardConfig) -> Self {
        Self {
            pipeline,
            cache: TtlCache::new(),
            config,
        }
    }

    /// Returns the underlying pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline<S> {
        &self.pipeline
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Returns the cached snapshot, running the pipeline when it is stale.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error when a refresh fails. The previous
    /// snapshot stays cached and is available from [`Self::last_known`].
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.cache
            .get_or_compute(self.config.ttl, || self.pipeline.run())
            .await
    }

    /// Like [`Self::snapshot`], but falls back to the last cached snapshot
    /// when the refresh fails.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error when nothing was ever cached.
    pub async fn snapshot_or_stale(&self) -> Result<Arc<Snapshot>> {
        match self.snapshot().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => match self.cache.peek().await {
                Some(stale) => {
                    warn!(error = %e, fetched_at = %stale.fetched_at, "serving stale snapshot");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Forces the next [`Self::snapshot`] call to run the pipeline.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Returns the last cached snapshot regardless of age.
    pub async fn last_known(&self) -> Option<Arc<Snapshot>> {
        self.cache.peek().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use macrodash_catalog::SeriesCatalog;
    use macrodash_fetch::{FetchConfig, Fetcher, StaticSource};
    use macrodash_types::{Frequency, MacroError, RawSeries, SeriesSpec};

    fn dashboard() -> (Dashboard<Arc<StaticSource>>, Arc<StaticSource>) {
        let catalog = SeriesCatalog::new(vec![
            SeriesSpec::new("Unemployment Rate", "UNRATE", Frequency::Monthly, "Percent"),
            SeriesSpec::new("Initial Claims", "ICSA", Frequency::Weekly, "Number"),
        ])
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let source = Arc::new(
            StaticSource::new()
                .with_series("UNRATE", RawSeries::from_pairs([(date, 3.7)]))
                .with_series("ICSA", RawSeries::from_pairs([(date, 220_000.0)])),
        );
        let pipeline = Pipeline::new(
            Arc::new(catalog),
            Fetcher::new(Arc::clone(&source), FetchConfig::default()),
        );
        (Dashboard::new(pipeline, DashboardConfig::default()), source)
    }

    #[tokio::test(start_paused = true)]
    async fn test_served_from_cache_within_ttl() {
        let (dashboard, source) = dashboard();
        dashboard.snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(1800)).await;
        dashboard.snapshot().await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_after_expiry() {
        let (dashboard, source) = dashboard();
        dashboard.snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(3601)).await;
        dashboard.snapshot().await.unwrap();
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_refetch_after_invalidate() {
        let (dashboard, source) = dashboard();
        dashboard.snapshot().await.unwrap();
        dashboard.invalidate().await;
        assert!(dashboard.last_known().await.is_none());
        dashboard.snapshot().await.unwrap();
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outage_keeps_previous_snapshot() {
        let (dashboard, source) = dashboard();
        let first = dashboard.snapshot().await.unwrap();

        tokio::time::advance(Duration::from_secs(3601)).await;
        source.set_unavailable(true);

        let err = dashboard.snapshot().await.unwrap_err();
        assert!(matches!(err, MacroError::ProviderOutage { attempted: 2 }));

        let kept = dashboard.last_known().await.unwrap();
        assert!(Arc::ptr_eq(&first, &kept));

        let stale = dashboard.snapshot_or_stale().await.unwrap();
        assert!(Arc::ptr_eq(&first, &stale));
    }

    #[tokio::test]
    async fn test_outage_without_cache_is_an_error() {
        let (dashboard, source) = dashboard();
        source.set_unavailable(true);
        assert!(dashboard.snapshot_or_stale().await.is_err());
    }
}
