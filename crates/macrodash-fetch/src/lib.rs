//! Data acquisition for the macrodash economic data pipeline.
//!
//! This crate provides the fetch side of the pipeline:
//!
//! - [`SeriesSource`] - Provider abstraction, one call per series
//! - [`FredClient`] - FRED HTTP client with connection pooling and retries
//! - [`StaticSource`] - In-memory source for fixtures and offline runs
//! - [`Fetcher`] - Bounded-concurrency group fetch with per-series failure isolation
//! - [`parse::parse_observations`] - FRED observations document parsing

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrodash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod fetcher;
mod fixture;
pub mod parse;
mod source;
pub mod url;

pub use client::{API_KEY_ENV, ClientConfig, FredClient};
pub use fetcher::{FetchConfig, FetchError, FetchFailure, FetchReport, Fetcher, ProgressHook};
pub use fixture::StaticSource;
pub use parse::{ParseError, parse_observations};
pub use source::{SeriesSource, SourceError};
