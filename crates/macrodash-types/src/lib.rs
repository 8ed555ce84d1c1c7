//! Core types for the macrodash economic data pipeline.
//!
//! This crate provides the fundamental data structures used throughout macrodash:
//!
//! - [`Frequency`] - Sampling frequency of a series group
//! - [`SeriesSpec`] - Catalog entry mapping a display name to a provider code
//! - [`Observation`] / [`RawSeries`] - Fetched data points for one series
//! - [`Indicator`] - Typed registry of series read by derivations
//! - [`MacroError`] - Workspace error type

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrodash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod frequency;
mod indicator;
mod series;

pub use error::{CatalogError, MacroError, Result};
pub use frequency::{Frequency, FrequencyParseError};
pub use indicator::Indicator;
pub use series::{Observation, RawSeries, SeriesSpec};
