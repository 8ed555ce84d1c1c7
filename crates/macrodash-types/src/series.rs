//! Series specifications and raw observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Frequency;

/// Describes one series in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Human-readable indicator name, used as the column name.
    #[serde(rename = "name")]
    display_name: String,
    /// Series code at the data provider (e.g., "CPIAUCSL").
    #[serde(rename = "code")]
    provider_code: String,
    /// Declared sampling frequency.
    frequency: Frequency,
    /// Unit label of the column after transformation.
    #[serde(default = "default_units")]
    units: String,
}

fn default_units() -> String {
    "Value".to_string()
}

impl SeriesSpec {
    /// Creates a new series specification.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        provider_code: impl Into<String>,
        frequency: Frequency,
        units: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            provider_code: provider_code.into(),
            frequency,
            units: units.into(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the provider series code.
    #[must_use]
    pub fn provider_code(&self) -> &str {
        &self.provider_code
    }

    /// Returns the declared frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the unit label.
    #[must_use]
    pub fn units(&self) -> &str {
        &self.units
    }
}

impl std::fmt::Display for SeriesSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.provider_code)
    }
}

/// A single dated observation. `None` is the provider's no-data marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date (period start).
    pub date: NaiveDate,
    /// Observed value, absent when the provider reports no data.
    pub value: Option<f64>,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// Observations for one series with strictly increasing dates.
///
/// Serialized as a plain list of observations; deserializing goes through
/// [`RawSeries::from_observations`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct RawSeries {
    observations: Vec<Observation>,
}

impl RawSeries {
    /// Builds a series from observations in any order.
    ///
    /// Observations are sorted by date; when a date repeats, the last
    /// occurrence wins. Non-finite values are treated as absent.
    #[must_use]
    pub fn from_observations(mut observations: Vec<Observation>) -> Self {
        for obs in &mut observations {
            obs.value = obs.value.filter(|v| v.is_finite());
        }
        // Stable sort keeps input order among equal dates, so the last one
        // seen is the last in its run.
        observations.sort_by_key(|o| o.date);
        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }
        Self {
            observations: deduped,
        }
    }

    /// Builds a series from `(date, value)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self::from_observations(
            pairs
                .into_iter()
                .map(|(date, value)| Observation::new(date, Some(value)))
                .collect(),
        )
    }

    /// Returns the observations in date order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the number of observations, including absent ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the number of observations carrying a value.
    #[must_use]
    pub fn usable_len(&self) -> usize {
        self.observations.iter().filter(|o| o.value.is_some()).count()
    }

    /// Returns true if the series carries no usable value at all.
    #[must_use]
    pub fn has_no_data(&self) -> bool {
        self.usable_len() == 0
    }

    /// Returns the value observed at `date`, if any.
    #[must_use]
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .and_then(|i| self.observations[i].value)
    }
}

impl From<Vec<Observation>> for RawSeries {
    fn from(observations: Vec<Observation>) -> Self {
        Self::from_observations(observations)
    }
}

impl From<RawSeries> for Vec<Observation> {
    fn from(series: RawSeries) -> Self {
        series.observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_spec_accessors() {
        let spec = SeriesSpec::new("CPI", "CPIAUCSL", Frequency::Monthly, "Index");
        assert_eq!(spec.display_name(), "CPI");
        assert_eq!(spec.provider_code(), "CPIAUCSL");
        assert_eq!(spec.frequency(), Frequency::Monthly);
        assert_eq!(spec.to_string(), "CPI (CPIAUCSL)");
    }

    #[test]
    fn test_spec_deserialize_defaults_units() {
        let spec: SeriesSpec =
            serde_json::from_str(r#"{"name":"GDP","code":"GDP","frequency":"quarterly"}"#)
                .unwrap();
        assert_eq!(spec.units(), "Value");
        assert_eq!(spec.frequency(), Frequency::Quarterly);
    }

    #[test]
    fn test_raw_series_sorted_and_deduped() {
        let series = RawSeries::from_observations(vec![
            Observation::new(date(2024, 3, 1), Some(3.0)),
            Observation::new(date(2024, 1, 1), Some(1.0)),
            Observation::new(date(2024, 2, 1), Some(2.0)),
            Observation::new(date(2024, 1, 1), Some(1.5)),
        ]);

        let dates: Vec<_> = series.observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);
        assert_eq!(series.value_at(date(2024, 1, 1)), Some(1.5));
    }

    #[test]
    fn test_usable_len_ignores_absent_and_non_finite() {
        let series = RawSeries::from_observations(vec![
            Observation::new(date(2024, 1, 1), None),
            Observation::new(date(2024, 2, 1), Some(f64::NAN)),
            Observation::new(date(2024, 3, 1), Some(4.0)),
        ]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.usable_len(), 1);
        assert!(!series.has_no_data());

        let empty = RawSeries::from_observations(vec![Observation::new(date(2024, 1, 1), None)]);
        assert!(empty.has_no_data());
    }

    #[test]
    fn test_deserialize_restores_order() {
        let series: RawSeries = serde_json::from_str(
            r#"[
                {"date":"2024-02-01","value":2.0},
                {"date":"2024-01-01","value":1.0},
                {"date":"2024-02-01","value":2.5}
            ]"#,
        )
        .unwrap();

        let dates: Vec<_> = series.observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 2, 1)]);
        assert_eq!(series.value_at(date(2024, 2, 1)), Some(2.5));

        let json = serde_json::to_string(&series).unwrap();
        assert!(json.starts_with(r#"[{"date":"2024-01-01""#));
    }
}
