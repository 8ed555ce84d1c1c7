//! Latest-value metrics and smoothing over table columns.

use chrono::NaiveDate;

use crate::table::FrequencyTable;

/// Markers of columns already expressed as a rate or index level.
const LEVEL_MARKERS: [&str; 4] = ["inflation", "cpi", "pce", "deflator"];

/// How the change between the last two observations is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// `current - previous`.
    Absolute,
    /// `100 * (current - previous) / previous`.
    Percent,
}

impl ChangeKind {
    /// Picks the change kind for a column name.
    #[must_use]
    pub fn for_column(name: &str) -> Self {
        let lower = name.to_lowercase();
        if LEVEL_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Absolute
        } else {
            Self::Percent
        }
    }
}

/// The latest observation of a column and its change from the one before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestChange {
    /// Date of the latest observation.
    pub date: NaiveDate,
    /// Latest value.
    pub current: f64,
    /// Value before the latest.
    pub previous: f64,
    /// Change between the two, see [`LatestChange::kind`].
    pub delta: f64,
    /// How `delta` is expressed.
    pub kind: ChangeKind,
}

/// Computes the latest-change metric of a column.
///
/// Only non-absent values are considered. Returns `None` when the column
/// is missing or has fewer than two values.
#[must_use]
pub fn latest_change(table: &FrequencyTable, column: &str) -> Option<LatestChange> {
    let observed = table.observed(column);
    let [.., (_, previous), (date, current)] = observed.as_slice() else {
        return None;
    };
    let (current, previous, date) = (*current, *previous, *date);

    let kind = ChangeKind::for_column(column);
    let delta = match kind {
        ChangeKind::Absolute => current - previous,
        ChangeKind::Percent if previous == 0.0 => 0.0,
        ChangeKind::Percent => (current - previous) / previous * 100.0,
    };

    Some(LatestChange {
        date,
        current,
        previous,
        delta,
        kind,
    })
}

/// Trailing mean over `window` rows, requiring at least one value.
///
/// Absent values are skipped; a window with no value yields `None`.
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            let (sum, count) = values[start..=end]
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}
