//! Inner-join alignment of raw series onto a shared index.

use chrono::NaiveDate;
use macrodash_types::{Frequency, RawSeries};
use std::collections::BTreeMap;
use tracing::debug;

use crate::table::{Column, ColumnOrigin, FrequencyTable};

/// Joins the series of one frequency group into a table.
///
/// The index is the union of every series' dates, restricted to the rows
/// where every column holds a value. Columns keep their input order. An
/// empty input yields an empty table.
#[must_use]
pub fn align(frequency: Frequency, series: Vec<(String, RawSeries)>) -> FrequencyTable {
    if series.is_empty() {
        return FrequencyTable::empty(frequency);
    }

    let width = series.len();
    let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (col, (_, raw)) in series.iter().enumerate() {
        for obs in raw.observations() {
            rows.entry(obs.date).or_insert_with(|| vec![None; width])[col] = obs.value;
        }
    }

    let union = rows.len();
    rows.retain(|_, values| values.iter().all(Option::is_some));
    let dropped = union - rows.len();
    if dropped > 0 {
        debug!(%frequency, union, dropped, "dropped incomplete rows");
    }

    let index: Vec<NaiveDate> = rows.keys().copied().collect();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(index.len()); width];
    for values in rows.into_values() {
        for (col, value) in values.into_iter().enumerate() {
            columns[col].push(value);
        }
    }

    let mut table = FrequencyTable::from_sorted_index(frequency, index);
    for ((name, _), values) in series.into_iter().zip(columns) {
        if let Err(e) = table.upsert_column(Column::new(name, values, ColumnOrigin::Base)) {
            debug!(error = %e, "skipping column");
        }
    }
    table
}
