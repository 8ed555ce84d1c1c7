//! Macroeconomic time-series pipeline over the FRED API.
//!
//! This is a facade crate that re-exports functionality from the macrodash
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use macrodash_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FredClient::from_env(ClientConfig::default())?;
//!     let catalog = Arc::new(SeriesCatalog::builtin().clone());
//!     let pipeline = Pipeline::new(catalog, Fetcher::new(client, FetchConfig::default()));
//!     let dashboard = Dashboard::new(pipeline, DashboardConfig::default());
//!
//!     let snapshot = dashboard.snapshot().await?;
//!     if let Some(change) = latest_change(&snapshot.monthly, "Unemployment Rate") {
//!         println!("Unemployment Rate: {} ({:+.2}%)", change.current, change.delta);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrodash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use macrodash_types::*;

// Re-export the series catalog
pub use macrodash_catalog::{DEFAULT_UNIT_LABEL, SeriesCatalog, get_unit_label};

// Re-export tables and derivations
pub use macrodash_frame::{
    ChangeKind, Column, ColumnOrigin, Derivation, DerivedColumn, FrequencyTable, LatestChange,
    TableError, Transformer, align, latest_change, rolling_mean, transform,
};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use macrodash_fetch::{
    API_KEY_ENV, ClientConfig, FetchConfig, FetchError, FetchFailure, FetchReport, Fetcher,
    FredClient, ParseError, ProgressHook, SeriesSource, SourceError, StaticSource,
};

// Re-export orchestration
#[cfg(feature = "pipeline")]
pub use macrodash_pipeline::{Dashboard, DashboardConfig, Pipeline, Snapshot, TtlCache};

// Re-export formatters
#[cfg(feature = "format")]
pub use macrodash_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

/// Prelude module for convenient imports.
///
/// ```
/// use macrodash_lib::prelude::*;
/// ```
pub mod prelude {
    pub use macrodash_types::{
        Frequency, Indicator, MacroError, Observation, RawSeries, Result, SeriesSpec,
    };

    pub use macrodash_catalog::{SeriesCatalog, get_unit_label};

    pub use macrodash_frame::{FrequencyTable, Transformer, align, latest_change};

    #[cfg(feature = "fetch")]
    pub use macrodash_fetch::{
        ClientConfig, FetchConfig, Fetcher, FredClient, SeriesSource, StaticSource,
    };

    #[cfg(feature = "pipeline")]
    pub use macrodash_pipeline::{Dashboard, DashboardConfig, Pipeline, Snapshot};

    #[cfg(feature = "format")]
    pub use macrodash_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
