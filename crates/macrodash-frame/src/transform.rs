//! Per-frequency derivations applied to an aligned table.

use macrodash_types::{Frequency, Indicator};
use tracing::debug;

use crate::table::{Column, ColumnOrigin, DerivedColumn, FrequencyTable};

/// Name of the GDP deflator column.
pub const GDP_DEFLATOR: &str = "GDP Deflator";
/// Name of the exports-to-imports ratio column.
pub const NET_EXPORTS: &str = "Net Exports";
/// Name of the CPI year-over-year column.
pub const CPI_YOY: &str = "CPI YoY Inflation";
/// Name of the PCE year-over-year column.
pub const PCE_YOY: &str = "PCE YoY Inflation";
/// Name of the job openings to unemployment ratio column.
pub const VACANCY_RATIO: &str = "Job Vacancy-to-Unemployment Ratio";

/// Millions to billions.
const DEBT_DIVISOR: f64 = 1000.0;

/// A single column-level operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derivation {
    /// Divides a base column in place. Skipped once the column is rescaled.
    Rescale {
        /// Column to rescale.
        source: Indicator,
        /// Divisor applied to each value.
        divisor: f64,
    },
    /// `scale * numerator / denominator`, row by row.
    Ratio {
        /// Output column name.
        output: &'static str,
        /// Numerator column.
        numerator: Indicator,
        /// Denominator column.
        denominator: Indicator,
        /// Multiplier applied to the quotient.
        scale: f64,
    },
    /// `(x[t] - x[t-lag]) / x[t-lag]`, absent for the first `lag` rows.
    PercentChange {
        /// Output column name.
        output: &'static str,
        /// Source column.
        source: Indicator,
        /// Number of rows to look back.
        lag: usize,
    },
}

impl Derivation {
    /// Returns the column this derivation writes.
    #[must_use]
    pub const fn output(&self) -> &'static str {
        match self {
            Self::Rescale { source, .. } => source.name(),
            Self::Ratio { output, .. } | Self::PercentChange { output, .. } => *output,
        }
    }

    /// Returns the columns this derivation reads.
    #[must_use]
    pub fn sources(&self) -> Vec<Indicator> {
        match self {
            Self::Rescale { source, .. } | Self::PercentChange { source, .. } => vec![*source],
            Self::Ratio {
                numerator,
                denominator,
                ..
            } => vec![*numerator, *denominator],
        }
    }

    /// Applies the derivation. Returns false when nothing was written.
    fn apply(&self, table: &mut FrequencyTable) -> bool {
        if let Some(missing) = self.sources().into_iter().find(|s| !table.contains(s.name())) {
            debug!(output = self.output(), missing = missing.name(), "skipping derivation");
            return false;
        }

        match *self {
            Self::Rescale { source, divisor } => match table.column_mut(source.name()) {
                Some(column) if *column.origin() == ColumnOrigin::Base => {
                    column.rescale(divisor);
                    true
                }
                _ => false,
            },
            Self::Ratio {
                output,
                numerator,
                denominator,
                scale,
            } => {
                let (Some(num), Some(den)) =
                    (table.values(numerator.name()), table.values(denominator.name()))
                else {
                    return false;
                };
                let values = num
                    .iter()
                    .zip(den)
                    .map(|(n, d)| divide(*n, *d).map(|q| q * scale).filter(|v| v.is_finite()))
                    .collect();
                let origin = derived(&[numerator, denominator], 0);
                table.upsert_column(Column::new(output, values, origin)).is_ok()
            }
            Self::PercentChange {
                output,
                source,
                lag,
            } => {
                let Some(src) = table.values(source.name()) else {
                    return false;
                };
                let values = (0..src.len())
                    .map(|t| {
                        let prior = (*src.get(t.checked_sub(lag)?)?)?;
                        divide(Some(src[t]? - prior), Some(prior))
                    })
                    .collect();
                let origin = derived(&[source], lag);
                table.upsert_column(Column::new(output, values, origin)).is_ok()
            }
        }
    }
}

fn divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    Some(n / d).filter(|v| v.is_finite())
}

fn derived(sources: &[Indicator], lookback: usize) -> ColumnOrigin {
    ColumnOrigin::Derived(DerivedColumn {
        sources: sources.iter().map(|s| s.name().to_string()).collect(),
        lookback,
    })
}

/// Ordered list of derivations for one frequency group.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformer {
    frequency: Frequency,
    derivations: Vec<Derivation>,
}

impl Transformer {
    /// Creates a transformer with a custom derivation list.
    #[must_use]
    pub const fn new(frequency: Frequency, derivations: Vec<Derivation>) -> Self {
        Self {
            frequency,
            derivations,
        }
    }

    /// Returns the built-in derivations for a frequency.
    #[must_use]
    pub fn for_frequency(frequency: Frequency) -> Self {
        let derivations = match frequency {
            Frequency::Quarterly => vec![
                Derivation::Rescale {
                    source: Indicator::FederalDebtTotal,
                    divisor: DEBT_DIVISOR,
                },
                Derivation::Rescale {
                    source: Indicator::FederalDebtHeldByPublic,
                    divisor: DEBT_DIVISOR,
                },
                Derivation::Rescale {
                    source: Indicator::FederalDebtHeldByAgencies,
                    divisor: DEBT_DIVISOR,
                },
                Derivation::Ratio {
                    output: GDP_DEFLATOR,
                    numerator: Indicator::Gdp,
                    denominator: Indicator::RealGdp,
                    scale: 100.0,
                },
                Derivation::Ratio {
                    output: NET_EXPORTS,
                    numerator: Indicator::Exports,
                    denominator: Indicator::Imports,
                    scale: 1.0,
                },
            ],
            Frequency::Monthly => {
                let lag = Frequency::Monthly.yoy_lag();
                vec![
                    Derivation::PercentChange {
                        output: CPI_YOY,
                        source: Indicator::Cpi,
                        lag,
                    },
                    Derivation::PercentChange {
                        output: PCE_YOY,
                        source: Indicator::Pce,
                        lag,
                    },
                    Derivation::Ratio {
                        output: VACANCY_RATIO,
                        numerator: Indicator::JobOpenings,
                        denominator: Indicator::UnemploymentLevel,
                        scale: 1.0,
                    },
                ]
            }
            Frequency::Weekly => Vec::new(),
        };
        Self::new(frequency, derivations)
    }

    /// Returns the frequency this transformer targets.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the derivations in application order.
    #[must_use]
    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }

    /// Applies every derivation in order and returns the columns written.
    ///
    /// Derived columns are replaced on re-runs and rescaled columns are
    /// only divided once, so applying twice leaves the table unchanged.
    pub fn apply(&self, table: &mut FrequencyTable) -> Vec<&'static str> {
        let written: Vec<&'static str> = self
            .derivations
            .iter()
            .filter(|d| d.apply(table))
            .map(Derivation::output)
            .collect();
        debug!(frequency = %self.frequency, rows = table.len(), ?written, "transformed table");
        written
    }

    /// Consuming variant of [`Transformer::apply`].
    #[must_use]
    pub fn transform(&self, mut table: FrequencyTable) -> FrequencyTable {
        self.apply(&mut table);
        table
    }
}
