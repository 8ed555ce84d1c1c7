//! Fetch, align and transform every frequency group.

use chrono::{DateTime, Utc};
use macrodash_catalog::SeriesCatalog;
use macrodash_fetch::{FetchFailure, Fetcher, SeriesSource};
use macrodash_frame::{FrequencyTable, Transformer, align};
use macrodash_types::{Frequency, MacroError, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// The output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Quarterly table.
    pub quarterly: FrequencyTable,
    /// Monthly table.
    pub monthly: FrequencyTable,
    /// Weekly table.
    pub weekly: FrequencyTable,
    /// Series excluded from their table, in catalog order.
    pub failures: Vec<FetchFailure>,
    /// When the run completed.
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Returns the table of a frequency group.
    #[must_use]
    pub const fn table(&self, frequency: Frequency) -> &FrequencyTable {
        match frequency {
            Frequency::Quarterly => &self.quarterly,
            Frequency::Monthly => &self.monthly,
            Frequency::Weekly => &self.weekly,
        }
    }

    /// Returns every table in frequency order.
    pub fn tables(&self) -> impl Iterator<Item = &FrequencyTable> {
        Frequency::all().iter().map(|f| self.table(*f))
    }

    /// Returns the failures of one frequency group.
    pub fn failures_in(&self, frequency: Frequency) -> impl Iterator<Item = &FetchFailure> {
        self.failures
            .iter()
            .filter(move |f| f.spec.frequency() == frequency)
    }

    /// Returns true if no series failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the fetch, align and transform stages over a catalog.
#[derive(Debug)]
pub struct Pipeline<S> {
    catalog: Arc<SeriesCatalog>,
    fetcher: Fetcher<S>,
}

impl<S: SeriesSource> Pipeline<S> {
    /// Creates a pipeline.
    #[must_use]
    pub const fn new(catalog: Arc<SeriesCatalog>, fetcher: Fetcher<S>) -> Self {
        Self { catalog, fetcher }
    }

    /// Returns the catalog.
    #[must_use]
    pub fn catalog(&self) -> &SeriesCatalog {
        &self.catalog
    }

    /// Returns the fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    /// Builds one frequency table.
    ///
    /// Returns the table, the group's failures and the number of series
    /// that were fetched successfully.
    pub async fn run_group(&self, frequency: Frequency) -> (FrequencyTable, Vec<FetchFailure>, usize) {
        let specs = self.catalog.group(frequency);
        let report = self.fetcher.fetch_group(&specs).await;
        let succeeded = report.succeeded();
        let (columns, failures) = report.into_columns();

        let table = Transformer::for_frequency(frequency).transform(align(frequency, columns));
        info!(
            %frequency,
            rows = table.len(),
            columns = table.width(),
            failed = failures.len(),
            "built table"
        );
        (table, failures, succeeded)
    }

    /// Runs every frequency group, quarterly then monthly then weekly.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::ProviderOutage`] if not a single series could
    /// be fetched.
    pub async fn run(&self) -> Result<Snapshot> {
        let start = Instant::now();
        let mut failures = Vec::new();
        let mut succeeded = 0;

        let (quarterly, failed, ok) = self.run_group(Frequency::Quarterly).await;
        failures.extend(failed);
        succeeded += ok;
        let (monthly, failed, ok) = self.run_group(Frequency::Monthly).await;
        failures.extend(failed);
        succeeded += ok;
        let (weekly, failed, ok) = self.run_group(Frequency::Weekly).await;
        failures.extend(failed);
        succeeded += ok;

        let attempted = succeeded + failures.len();
        if attempted > 0 && succeeded == 0 {
            warn!(attempted, "every series failed");
            return Err(MacroError::ProviderOutage { attempted });
        }

        info!(
            succeeded,
            failed = failures.len(),
            elapsed = ?start.elapsed(),
            "pipeline run complete"
        );
        Ok(Snapshot {
            quarterly,
            monthly,
            weekly,
            failures,
            fetched_at: Utc::now(),
        })
    }
}
