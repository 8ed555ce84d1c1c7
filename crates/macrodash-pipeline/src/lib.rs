//! Pipeline orchestration for the macrodash economic data pipeline.
//!
//! - [`Pipeline`] - Fetch, align and transform every frequency group
//! - [`TtlCache`] - Single-slot cache with single-flight refresh
//! - [`Dashboard`] - Pipeline snapshots served through the cache
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use macrodash_catalog::SeriesCatalog;
//! use macrodash_fetch::{ClientConfig, FetchConfig, Fetcher, FredClient};
//! use macrodash_pipeline::{Dashboard, DashboardConfig, Pipeline};
//! use macrodash_types::Frequency;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FredClient::from_env(ClientConfig::default())?;
//! let catalog = Arc::new(SeriesCatalog::builtin().clone());
//! let pipeline = Pipeline::new(catalog, Fetcher::new(client, FetchConfig::default()));
//! let dashboard = Dashboard::new(pipeline, DashboardConfig::default());
//!
//! let snapshot = dashboard.snapshot().await?;
//! println!("{} quarterly rows", snapshot.table(Frequency::Quarterly).len());
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrodash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod dashboard;
mod pipeline;

pub use cache::TtlCache;
pub use dashboard::{Dashboard, DashboardConfig};
pub use pipeline::{Pipeline, Snapshot};
