//! Sampling frequency of a series group.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared sampling frequency of a series.
///
/// Every series in the catalog belongs to exactly one frequency group, and
/// each group is aligned into its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One observation per calendar quarter.
    Quarterly,
    /// One observation per calendar month.
    Monthly,
    /// One observation per week.
    Weekly,
}

impl Frequency {
    /// Returns the frequency as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }

    /// Returns the number of periods in one year.
    #[must_use]
    pub const fn yoy_lag(&self) -> usize {
        match self {
            Self::Quarterly => 4,
            Self::Monthly => 12,
            Self::Weekly => 52,
        }
    }

    /// Formats an index date as a period label.
    ///
    /// Quarters render as `2024Q1`, months as `2024M1` and weeks as the ISO
    /// week `2025-W22`.
    #[must_use]
    pub fn period_label(&self, date: NaiveDate) -> String {
        match self {
            Self::Quarterly => format!("{}Q{}", date.year(), (date.month() - 1) / 3 + 1),
            Self::Monthly => format!("{}M{}", date.year(), date.month()),
            Self::Weekly => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
        }
    }

    /// Returns all frequencies in processing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Quarterly, Self::Monthly, Self::Weekly]
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quarterly" | "q" | "quarter" => Ok(Self::Quarterly),
            "monthly" | "m" | "month" => Ok(Self::Monthly),
            "weekly" | "w" | "week" => Ok(Self::Weekly),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid frequency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(String);

impl std::fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid frequency '{}', expected one of: quarterly, monthly, weekly",
            self.0
        )
    }
}

impl std::error::Error for FrequencyParseError {}
