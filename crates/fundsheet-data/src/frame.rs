//! Helpers for moving between chrono dates and polars `Date` columns.

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Name of the period-end date column carried by every fundamentals frame.
pub const DATE_KEY: &str = "datekey";

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// Days since the Unix epoch, the physical representation of a polars `Date`.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

/// Inverse of [`epoch_days`].
pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_FROM_CE)?)
}

/// Build a polars `Date` column from chrono dates.
pub fn date_column(name: &str, dates: &[NaiveDate]) -> Result<Column> {
    let days: Vec<i32> = dates.iter().copied().map(epoch_days).collect();
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(series.into())
}

/// Read the [`DATE_KEY`] column of a frame back into chrono dates.
pub fn read_dates(frame: &DataFrame) -> Result<Vec<NaiveDate>> {
    let days = frame.column(DATE_KEY)?.cast(&DataType::Int32)?;
    days.i32()?
        .into_iter()
        .map(|day| {
            day.and_then(from_epoch_days)
                .ok_or_else(|| DataError::Parse(format!("null or out of range {DATE_KEY}")))
        })
        .collect()
}

/// Read a numeric column as nullable `f64` values, casting integer columns.
pub fn float_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}
