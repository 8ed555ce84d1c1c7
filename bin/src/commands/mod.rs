//! CLI command implementations.

pub(crate) mod catalog;
pub(crate) mod export;
pub(crate) mod fetch;
pub(crate) mod latest;

use anyhow::{Context, Result};
use macrodash_lib::prelude::*;
use macrodash_lib::ProgressHook;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Options shared by every command that runs the pipeline.
pub(crate) struct RunOptions {
    pub(crate) api_key: Option<String>,
    pub(crate) fixtures: Option<PathBuf>,
    pub(crate) concurrency: usize,
    pub(crate) timeout: Duration,
    pub(crate) quiet: bool,
}

/// Source chosen at runtime: FRED or a fixture file.
pub(crate) type DynSource = Arc<dyn SeriesSource>;

impl RunOptions {
    /// Opens the configured series source.
    pub(crate) fn source(&self) -> Result<DynSource> {
        if let Some(path) = &self.fixtures {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read fixtures: {}", path.display()))?;
            let source = StaticSource::from_json(&json)
                .with_context(|| format!("Invalid fixtures: {}", path.display()))?;
            tracing::info!(series = source.len(), path = %path.display(), "using fixtures");
            return Ok(Arc::new(source));
        }

        let config = ClientConfig::default();
        let client = match &self.api_key {
            Some(key) => FredClient::new(key.clone(), config),
            None => FredClient::from_env(config),
        }
        .context("Failed to create FRED client (set FRED_API_KEY or pass --api-key)")?;
        Ok(Arc::new(client))
    }

    /// Builds a pipeline over the builtin catalog.
    pub(crate) fn pipeline(&self, progress: Option<ProgressHook>) -> Result<Pipeline<DynSource>> {
        let config = FetchConfig {
            concurrency: self.concurrency.max(1),
            request_timeout: self.timeout,
        };
        let mut fetcher = Fetcher::new(self.source()?, config);
        if let Some(hook) = progress {
            fetcher = fetcher.with_progress(hook);
        }
        Ok(Pipeline::new(
            Arc::new(SeriesCatalog::builtin().clone()),
            fetcher,
        ))
    }
}

/// Parses a frequency argument.
pub(crate) fn parse_frequency(s: &str) -> Result<Frequency> {
    s.parse::<Frequency>()
        .map_err(|e| anyhow::anyhow!("{e}. Valid options: quarterly, monthly, weekly"))
}
