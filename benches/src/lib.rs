//! Synthetic inputs for the macrodash benchmarks.
//!
//! Run with: `cargo bench --package macrodash-bench`

use chrono::{Months, NaiveDate};
use macrodash_lib::{Frequency, Indicator, RawSeries};

/// Shape of a synthetic frequency group.
#[derive(Debug, Clone, Copy)]
pub struct GroupShape {
    /// Frequency of the generated series.
    pub frequency: Frequency,
    /// Number of series, including the derivation inputs.
    pub series: usize,
    /// Number of periods per series.
    pub periods: usize,
    /// Every `gap_every`-th period of the extra series is missing.
    pub gap_every: usize,
}

fn date(frequency: Frequency, period: usize) -> NaiveDate {
    let start = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap_or_default();
    let period = u32::try_from(period).unwrap_or(u32::MAX);
    match frequency {
        Frequency::Quarterly => start + Months::new(3 * period),
        Frequency::Monthly => start + Months::new(period),
        Frequency::Weekly => start + chrono::Days::new(7 * u64::from(period)),
    }
}

/// Generates named series for one group.
///
/// The derivation inputs of the group come first under their real names,
/// followed by filler series with periodic gaps so alignment drops rows.
#[must_use]
pub fn synthetic_group(shape: GroupShape) -> Vec<(String, RawSeries)> {
    let inputs: Vec<&'static str> = Indicator::ALL
        .iter()
        .filter(|i| i.frequency() == shape.frequency)
        .map(Indicator::name)
        .collect();

    (0..shape.series)
        .map(|s| {
            let name = inputs
                .get(s)
                .map_or_else(|| format!("Series {s}"), |n| (*n).to_string());
            let filler = s >= inputs.len();
            let pairs = (0..shape.periods)
                .filter(|p| !(filler && shape.gap_every > 0 && p % shape.gap_every == s % shape.gap_every))
                .map(|p| {
                    let value = 1000.0 + (s as f64) * 10.0 + (p as f64) * 1.5;
                    (date(shape.frequency, p), value)
                });
            (name, RawSeries::from_pairs(pairs))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_first() {
        let group = synthetic_group(GroupShape {
            frequency: Frequency::Monthly,
            series: 6,
            periods: 24,
            gap_every: 0,
        });
        assert_eq!(group.len(), 6);
        assert_eq!(group[0].0, "CPI");
        assert_eq!(group[5].0, "Series 5");
        assert!(group.iter().all(|(_, s)| s.len() == 24));
    }
}
