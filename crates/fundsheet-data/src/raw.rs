//! Raw Sharadar rows and the period-indexed frame built from them.

use crate::error::{DataError, Result};
use crate::frame::{DATE_KEY, date_column, read_dates};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One reporting period of raw field values for one ticker.
///
/// A field mapped to `None` was reported by the provider with no value. A
/// field absent from `values` was not reported at all; both read as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Period-end date
    pub datekey: NaiveDate,
    /// Field code to value
    pub values: BTreeMap<String, Option<f64>>,
}

impl RawRow {
    /// Create an empty row for a period.
    pub const fn new(datekey: NaiveDate) -> Self {
        Self {
            datekey,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), Some(value));
        self
    }

    /// Builder-style setter for a field reported without a value.
    pub fn with_null(mut self, field: impl Into<String>) -> Self {
        self.values.insert(field.into(), None);
        self
    }
}

/// All raw rows for one ticker and dimension, as a polars frame.
///
/// The frame holds [`DATE_KEY`] as a `Date` column followed by one `Float64`
/// column per field. Rows are in ascending date order.
#[derive(Debug, Clone)]
pub struct RawTable {
    frame: DataFrame,
}

impl RawTable {
    /// Build a table from rows in any order.
    ///
    /// The field universe is the union of all rows' fields, including fields
    /// that are null in every row; a field missing from one row is null there.
    pub fn from_rows(ticker: &str, dimension: impl ToString, mut rows: Vec<RawRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(DataError::not_found(ticker, dimension));
        }
        rows.sort_by_key(|row| row.datekey);

        let fields: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.values.keys().map(String::as_str))
            .collect();

        let dates: Vec<NaiveDate> = rows.iter().map(|row| row.datekey).collect();
        let mut columns = Vec::with_capacity(fields.len() + 1);
        columns.push(date_column(DATE_KEY, &dates)?);
        for field in fields {
            let values: Vec<Option<f64>> = rows.iter().map(|row| row.values.get(field).copied().flatten()).collect();
            columns.push(Series::new(field.into(), values).into());
        }

        Ok(Self {
            frame: DataFrame::new(columns)?,
        })
    }

    /// Keep only the most recent `periods` rows.
    pub fn most_recent(self, periods: usize) -> Self {
        Self {
            frame: self.frame.tail(Some(periods)),
        }
    }

    /// Number of reporting periods.
    pub fn periods(&self) -> usize {
        self.frame.height()
    }

    /// Period-end dates, ascending.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        read_dates(&self.frame)
    }

    /// Field codes present, excluding the date key.
    pub fn fields(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != DATE_KEY)
            .map(|name| name.to_string())
            .collect()
    }

    /// Borrow the underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }
}
