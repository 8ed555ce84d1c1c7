//! Display utilities and output formatting for the macrodash CLI.

use anyhow::Result;
use clap::ValueEnum;
use macrodash_lib::prelude::*;
use macrodash_lib::{ChangeKind, FetchFailure, LatestChange};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for exported tables.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl Format {
    pub(crate) const fn output_format(self) -> OutputFormat {
        match self {
            Self::Csv => OutputFormat::Csv,
            Self::Json => OutputFormat::Json,
            Self::Ndjson => OutputFormat::Ndjson,
        }
    }

    /// Returns the file extension for this format.
    pub(crate) const fn extension(self) -> &'static str {
        self.output_format().extension()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write a table to a file in the specified format.
pub(crate) fn write_table(
    table: &FrequencyTable,
    output: &Path,
    format: Format,
    period_labels: bool,
) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    format
        .output_format()
        .write_table(table, writer, period_labels)?;
    Ok(())
}

/// First and last period of a table, e.g. `1990Q1 -> 2025Q2`.
pub(crate) fn period_range(table: &FrequencyTable) -> String {
    table.date_range().map_or_else(
        || "-".to_string(),
        |(first, last)| {
            let frequency = table.frequency();
            format!(
                "{} -> {}",
                frequency.period_label(first),
                frequency.period_label(last)
            )
        },
    )
}

/// One summary line per table.
pub(crate) fn print_table_summary(table: &FrequencyTable, failures: &[&FetchFailure]) {
    println!(
        "{:<10} {:>6} rows {:>4} columns  {}",
        table.frequency().to_string(),
        table.len(),
        table.width(),
        period_range(table)
    );
    for failure in failures {
        println!("  missing: {failure}");
    }
}

/// Renders a latest-change metric.
pub(crate) fn format_change(change: &LatestChange) -> String {
    match change.kind {
        ChangeKind::Absolute => format!("{:+.4}", change.delta),
        ChangeKind::Percent => format!("{:+.2}%", change.delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use macrodash_lib::{Column, ColumnOrigin};

    fn table() -> FrequencyTable {
        let index = vec![
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        ];
        let mut table = FrequencyTable::new(Frequency::Quarterly, index).unwrap();
        table
            .push_column(Column::new("GDP", vec![Some(1.0), Some(2.0)], ColumnOrigin::Base))
            .unwrap();
        table
    }

    #[test]
    fn test_period_range() {
        assert_eq!(period_range(&table()), "1990Q1 -> 2025Q2");
        assert_eq!(
            period_range(&FrequencyTable::empty(Frequency::Weekly)),
            "-"
        );
    }

    #[test]
    fn test_write_table_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quarterly.csv");

        write_table(&table(), &path, Format::Csv, true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "date,GDP\n1990Q1,1\n2025Q2,2\n");
    }

    #[test]
    fn test_write_ndjson_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quarterly.ndjson");

        write_table(&table(), &path, Format::Ndjson, false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.starts_with(r#"{"date":"1990-01-01","GDP":1.0}"#));
    }
}
