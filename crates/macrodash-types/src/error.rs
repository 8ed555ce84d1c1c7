//! Error types for macrodash.

use thiserror::Error;

use crate::Frequency;

/// Result type alias for macrodash operations.
pub type Result<T> = std::result::Result<T, MacroError>;

/// Errors that can abort a pipeline run or a caller-facing operation.
///
/// Per-series fetch failures are not represented here; they are collected
/// by the fetcher and reported alongside the tables.
#[derive(Error, Debug)]
pub enum MacroError {
    /// The series catalog is invalid.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The data provider could not be reached or configured.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Every series in every frequency group failed to fetch.
    #[error("Data provider unavailable: all {attempted} series failed to fetch")]
    ProviderOutage {
        /// Number of series attempted.
        attempted: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors detected while building or validating the series catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two series share a display name within one frequency group.
    #[error("Duplicate series '{name}' in {frequency} group")]
    DuplicateSeries {
        /// The repeated display name.
        name: String,
        /// The frequency group.
        frequency: Frequency,
    },

    /// A series read by a derivation has no catalog entry.
    #[error("Catalog has no series named '{name}' (expected in {frequency} group)")]
    MissingIndicator {
        /// The indicator's column name.
        name: &'static str,
        /// The frequency it must be declared in.
        frequency: Frequency,
    },

    /// A series read by a derivation is declared under the wrong frequency.
    #[error("Series '{name}' is declared {found} but derivations expect {expected}")]
    WrongFrequency {
        /// The indicator's column name.
        name: &'static str,
        /// The frequency derivations expect.
        expected: Frequency,
        /// The frequency found in the catalog.
        found: Frequency,
    },

    /// The catalog document could not be parsed.
    #[error("Invalid catalog document: {0}")]
    Parse(String),
}
