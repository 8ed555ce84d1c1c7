//! Aligned tables and derived indicators for the macrodash pipeline.
//!
//! This crate provides:
//!
//! - [`FrequencyTable`] - Date-indexed column store for one frequency group
//! - [`align`] - Inner join of raw series on completeness
//! - [`Transformer`] - Per-frequency derivations, idempotent on re-runs
//! - [`latest_change`] / [`rolling_mean`] - Dashboard metrics

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrodash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod align;
mod analysis;
mod table;
pub mod transform;

pub use align::align;
pub use analysis::{ChangeKind, LatestChange, latest_change, rolling_mean};
pub use table::{Column, ColumnOrigin, DerivedColumn, FrequencyTable, TableError};
pub use transform::{Derivation, Transformer};
