//! Series catalog for the macrodash economic data pipeline.
//!
//! This crate maps human-readable indicator names to FRED series codes,
//! partitioned by sampling frequency, along with the unit label of every
//! base and derived column.
//!
//! # Example
//!
//! ```
//! use macrodash_catalog::SeriesCatalog;
//! use macrodash_types::Frequency;
//!
//! let catalog = SeriesCatalog::builtin();
//!
//! for spec in catalog.by_frequency(Frequency::Monthly) {
//!     println!("{} -> {} [{}]", spec.display_name(), spec.provider_code(), spec.units());
//! }
//! assert_eq!(catalog.unit_label("CPI YoY Inflation"), "Fraction");
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrodash/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use macrodash_types::{CatalogError, Frequency, Indicator, SeriesSpec};
use serde::Deserialize;

/// The catalog document embedded at compile time.
const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Unit label used when a column has no registered unit.
pub const DEFAULT_UNIT_LABEL: &str = "Value";

/// Built-in catalog instance.
static BUILTIN: OnceLock<SeriesCatalog> = OnceLock::new();

#[derive(Deserialize)]
struct CatalogDocument {
    series: Vec<SeriesSpec>,
    #[serde(default)]
    derived_units: HashMap<String, String>,
    /// Labels for columns that are neither fetched nor derived here.
    #[serde(default)]
    column_units: HashMap<String, String>,
}

/// Fixed set of series specifications, in declaration order.
#[derive(Debug, Clone)]
pub struct SeriesCatalog {
    series: Vec<SeriesSpec>,
    derived_units: HashMap<String, String>,
}

impl SeriesCatalog {
    /// Returns the built-in catalog.
    ///
    /// The catalog is parsed and validated lazily on first access.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(Self::load)
    }

    /// Loads and validates the embedded catalog document.
    fn load() -> Self {
        let catalog = Self::from_json(CATALOG_JSON).expect("Invalid catalog.json");
        catalog
            .require_indicators()
            .expect("catalog.json does not cover every derived input");
        catalog
    }

    /// Builds a catalog from series specifications.
    ///
    /// # Errors
    ///
    /// Returns an error if a display name repeats within a frequency group.
    pub fn new(series: Vec<SeriesSpec>) -> Result<Self, CatalogError> {
        Self::with_derived_units(series, HashMap::new())
    }

    /// Builds a catalog with unit labels for derived columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a display name repeats within a frequency group.
    pub fn with_derived_units(
        series: Vec<SeriesSpec>,
        derived_units: HashMap<String, String>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for spec in &series {
            if !seen.insert((spec.frequency(), spec.display_name())) {
                return Err(CatalogError::DuplicateSeries {
                    name: spec.display_name().to_string(),
                    frequency: spec.frequency(),
                });
            }
        }
        Ok(Self {
            series,
            derived_units,
        })
    }

    /// Parses a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or contains duplicates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut units = doc.column_units;
        units.extend(doc.derived_units);
        Self::with_derived_units(doc.series, units)
    }

    /// Checks that every [`Indicator`] is declared under its frequency.
    ///
    /// # Errors
    ///
    /// Returns the first indicator that is missing or misplaced.
    pub fn require_indicators(&self) -> Result<(), CatalogError> {
        for indicator in Indicator::ALL {
            let expected = indicator.frequency();
            if self.get_in(expected, indicator.name()).is_some() {
                continue;
            }
            return Err(match self.get(indicator.name()) {
                Some(spec) => CatalogError::WrongFrequency {
                    name: indicator.name(),
                    expected,
                    found: spec.frequency(),
                },
                None => CatalogError::MissingIndicator {
                    name: indicator.name(),
                    frequency: expected,
                },
            });
        }
        Ok(())
    }

    /// Returns the series of one frequency group in declaration order.
    pub fn by_frequency(&self, frequency: Frequency) -> impl Iterator<Item = &SeriesSpec> {
        self.series
            .iter()
            .filter(move |s| s.frequency() == frequency)
    }

    /// Returns the series of one frequency group as an owned list.
    #[must_use]
    pub fn group(&self, frequency: Frequency) -> Vec<SeriesSpec> {
        self.by_frequency(frequency).cloned().collect()
    }

    /// Looks up a series by display name in any group.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SeriesSpec> {
        self.series.iter().find(|s| s.display_name() == name)
    }

    /// Looks up a series by display name within one group.
    #[must_use]
    pub fn get_in(&self, frequency: Frequency, name: &str) -> Option<&SeriesSpec> {
        self.by_frequency(frequency)
            .find(|s| s.display_name() == name)
    }

    /// Returns all series in declaration order.
    pub fn all(&self) -> impl Iterator<Item = &SeriesSpec> {
        self.series.iter()
    }

    /// Returns the total number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Searches series by display name or code (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&SeriesSpec> {
        let pattern = pattern.to_lowercase();
        self.series
            .iter()
            .filter(|s| {
                s.display_name().to_lowercase().contains(&pattern)
                    || s.provider_code().to_lowercase().contains(&pattern)
            })
            .collect()
    }

    /// Returns the unit label for a base or derived column.
    ///
    /// Unknown names fall back to [`DEFAULT_UNIT_LABEL`].
    #[must_use]
    pub fn unit_label(&self, name: &str) -> &str {
        self.get(name)
            .map(SeriesSpec::units)
            .or_else(|| self.derived_units.get(name).map(String::as_str))
            .unwrap_or(DEFAULT_UNIT_LABEL)
    }
}

/// Returns the unit label of a column in the built-in catalog.
#[must_use]
pub fn get_unit_label(name: &str) -> &'static str {
    SeriesCatalog::builtin().unit_label(name)
}
