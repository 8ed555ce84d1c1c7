//! Typed registry of the series read by derived indicators.

use crate::Frequency;

/// A catalog series that at least one derivation reads.
///
/// Derivations refer to their inputs through this enum rather than through
/// free-form strings, and the catalog is checked against it at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Nominal gross domestic product.
    Gdp,
    /// Real gross domestic product.
    RealGdp,
    /// Exports of goods and services.
    Exports,
    /// Imports of goods and services.
    Imports,
    /// Total public debt, reported in millions.
    FederalDebtTotal,
    /// Debt held by the public, reported in millions.
    FederalDebtHeldByPublic,
    /// Debt held by agencies and trust funds, reported in millions.
    FederalDebtHeldByAgencies,
    /// Consumer price index.
    Cpi,
    /// Personal consumption expenditures price index.
    Pce,
    /// JOLTS job openings.
    JobOpenings,
    /// Number of unemployed persons.
    UnemploymentLevel,
}

impl Indicator {
    /// All registered indicators.
    pub const ALL: [Self; 11] = [
        Self::Gdp,
        Self::RealGdp,
        Self::Exports,
        Self::Imports,
        Self::FederalDebtTotal,
        Self::FederalDebtHeldByPublic,
        Self::FederalDebtHeldByAgencies,
        Self::Cpi,
        Self::Pce,
        Self::JobOpenings,
        Self::UnemploymentLevel,
    ];

    /// Returns the column name this indicator is stored under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gdp => "GDP",
            Self::RealGdp => "Real GDP",
            Self::Exports => "Exports",
            Self::Imports => "Imports",
            Self::FederalDebtTotal => "Federal Debt Total Public Debt",
            Self::FederalDebtHeldByPublic => "Federal Debt Held by the Public",
            Self::FederalDebtHeldByAgencies => "Federal Debt Held by Agencies and Trusts",
            Self::Cpi => "CPI",
            Self::Pce => "PCE",
            Self::JobOpenings => "Job Openings Total Nonfarm",
            Self::UnemploymentLevel => "Unemployment Level",
        }
    }

    /// Returns the frequency group the indicator must be declared in.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        match self {
            Self::Gdp
            | Self::RealGdp
            | Self::Exports
            | Self::Imports
            | Self::FederalDebtTotal
            | Self::FederalDebtHeldByPublic
            | Self::FederalDebtHeldByAgencies => Frequency::Quarterly,
            Self::Cpi | Self::Pce | Self::JobOpenings | Self::UnemploymentLevel => {
                Frequency::Monthly
            }
        }
    }

    /// Looks up an indicator by its column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Indicator::ALL.iter().map(Indicator::name).collect();
        assert_eq!(names.len(), Indicator::ALL.len());
    }

    #[test]
    fn test_from_name_round_trip() {
        for indicator in Indicator::ALL {
            assert_eq!(Indicator::from_name(indicator.name()), Some(indicator));
        }
        assert_eq!(Indicator::from_name("Gdp"), None);
    }
}
