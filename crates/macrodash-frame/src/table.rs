//! Timestamp-indexed column store for one frequency group.

use chrono::NaiveDate;
use macrodash_types::Frequency;
use thiserror::Error;

/// Errors raised when a table invariant would be violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The index is not strictly increasing.
    #[error("Index is not strictly increasing at position {0}")]
    UnsortedIndex(usize),

    /// A column's length differs from the index length.
    #[error("Column '{name}' has {found} values but the index has {expected}")]
    LengthMismatch {
        /// Column name.
        name: String,
        /// Index length.
        expected: usize,
        /// Column length.
        found: usize,
    },

    /// A column with this name already exists.
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Provenance metadata of a derived column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumn {
    /// Columns the values were computed from.
    pub sources: Vec<String>,
    /// Prior periods needed before a value can be produced.
    pub lookback: usize,
}

/// Where a column's values come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOrigin {
    /// Fetched from the provider unchanged.
    Base,
    /// Fetched from the provider and divided by `divisor` in place.
    Rescaled {
        /// Divisor applied to every value.
        divisor: f64,
    },
    /// Computed from other columns of the same table.
    Derived(DerivedColumn),
}

/// A named column of optional values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Option<f64>>,
    origin: ColumnOrigin,
}

impl Column {
    /// Creates a new column.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>, origin: ColumnOrigin) -> Self {
        Self {
            name: name.into(),
            values,
            origin,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values, one per index row.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Returns the column provenance.
    #[must_use]
    pub const fn origin(&self) -> &ColumnOrigin {
        &self.origin
    }

    /// Returns true if the column was computed from other columns.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self.origin, ColumnOrigin::Derived(_))
    }

    pub(crate) fn rescale(&mut self, divisor: f64) {
        for value in &mut self.values {
            *value = value.map(|v| v / divisor);
        }
        self.origin = ColumnOrigin::Rescaled { divisor };
    }
}

/// Table keyed by a sorted, unique date index with one column per series.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    frequency: Frequency,
    index: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl FrequencyTable {
    /// Creates a table with no rows and no columns.
    #[must_use]
    pub const fn empty(frequency: Frequency) -> Self {
        Self {
            frequency,
            index: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Creates a table over the given index with no columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not strictly increasing.
    pub fn new(frequency: Frequency, index: Vec<NaiveDate>) -> Result<Self, TableError> {
        if let Some(pos) = index.windows(2).position(|w| w[0] >= w[1]) {
            return Err(TableError::UnsortedIndex(pos + 1));
        }
        Ok(Self {
            frequency,
            index,
            columns: Vec::new(),
        })
    }

    /// Index must already be strictly increasing.
    pub(crate) const fn from_sorted_index(frequency: Frequency, index: Vec<NaiveDate>) -> Self {
        Self {
            frequency,
            index,
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns an error on a length mismatch or a duplicate name.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        self.check_length(&column)?;
        if self.column(column.name()).is_some() {
            return Err(TableError::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Replaces the column with the same name, or appends it.
    ///
    /// # Errors
    ///
    /// Returns an error on a length mismatch.
    pub fn upsert_column(&mut self, column: Column) -> Result<(), TableError> {
        self.check_length(&column)?;
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    fn check_length(&self, column: &Column) -> Result<(), TableError> {
        if column.values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                name: column.name.clone(),
                expected: self.index.len(),
                found: column.values.len(),
            });
        }
        Ok(())
    }

    /// Returns the table frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the date index.
    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns all columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Returns true if the table has a column with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Returns the values of a column.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column(name).map(Column::values)
    }

    /// Returns the first and last index dates.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.index.first()?, *self.index.last()?))
    }

    /// Returns the non-absent `(date, value)` pairs of a column.
    #[must_use]
    pub fn observed(&self, name: &str) -> Vec<(NaiveDate, f64)> {
        self.values(name)
            .map(|values| {
                self.index
                    .iter()
                    .zip(values)
                    .filter_map(|(date, value)| value.map(|v| (*date, v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the columns whose name starts with `prefix`.
    #[must_use]
    pub fn columns_with_prefix(&self, prefix: &str) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.name.starts_with(prefix))
            .collect()
    }
}
