//! CSV output format.

use macrodash_frame::FrequencyTable;
use std::io::Write;

use crate::formatter::date_key;
use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Writes a `date` column followed by one column per series, in table
/// order. Absent values are empty fields.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Whether to include header row.
    include_header: bool,
    /// Whether to write `2024Q1`-style labels instead of ISO dates.
    period_labels: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
            period_labels: false,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets whether to label rows by period instead of date.
    #[must_use]
    pub const fn with_period_labels(mut self, period_labels: bool) -> Self {
        self.period_labels = period_labels;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self::new().with_delimiter(b'\t')
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &FrequencyTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        if self.include_header {
            wtr.write_record(std::iter::once("date").chain(table.column_names()))?;
        }

        for (row, date) in table.index().iter().enumerate() {
            let mut record = Vec::with_capacity(table.width() + 1);
            record.push(date_key(table, *date, self.period_labels));
            record.extend(
                table
                    .columns()
                    .iter()
                    .map(|c| c.values()[row].map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use macrodash_frame::{Column, ColumnOrigin};
    use macrodash_types::Frequency;
    use std::io::Cursor;

    fn create_test_table() -> FrequencyTable {
        let index = vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        ];
        let mut table = FrequencyTable::new(Frequency::Quarterly, index).unwrap();
        table
            .push_column(Column::new("GDP", vec![Some(28269.2), Some(28624.1)], ColumnOrigin::Base))
            .unwrap();
        table
            .push_column(Column::new(
                "Debt, Total",
                vec![None, Some(34.5)],
                ColumnOrigin::Base,
            ))
            .unwrap();
        table
    }

    fn render(formatter: &CsvFormatter) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter
            .write_table(&create_test_table(), &mut output)
            .unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_csv_table() {
        let result = render(&CsvFormatter::new());
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "date,GDP,\"Debt, Total\"");
        assert_eq!(lines[1], "2024-01-01,28269.2,");
        assert_eq!(lines[2], "2024-04-01,28624.1,34.5");
    }

    #[test]
    fn test_csv_period_labels() {
        let result = render(&CsvFormatter::new().with_period_labels(true));
        assert!(result.contains("\n2024Q1,"));
        assert!(result.contains("\n2024Q2,"));
    }

    #[test]
    fn test_csv_no_header() {
        let result = render(&CsvFormatter::new().with_header(false));
        assert!(!result.contains("date,"));
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_tsv() {
        let result = render(&CsvFormatter::tsv());
        assert!(result.starts_with("date\tGDP\tDebt, Total"));
    }

    #[test]
    fn test_csv_reads_back() {
        let result = render(&CsvFormatter::new());
        let mut reader = csv::Reader::from_reader(result.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 3);
        assert_eq!(&headers[2], "Debt, Total");
        assert_eq!(reader.records().count(), 2);
    }
}
