//! Transpose-and-present transform.
//!
//! Statement and ratio frames are period-indexed: one row per period, one
//! column per indicator. The workbook wants the opposite, one row per
//! indicator and one column per period, with the period-end dates as text
//! headers.

use crate::error::Result;
use chrono::NaiveDate;
use fundsheet_data::Dimension;
use fundsheet_data::frame::{DATE_KEY, date_column, float_values, read_dates};
use fundsheet_ratios::catalog::describe;
use fundsheet_ratios::{IndicatorSpec, StatementKind};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Header of the description column.
pub const DESCRIPTION_HEADER: &str = "Description";

/// Date format used for period headers.
pub const DATE_HEADER_FORMAT: &str = "%Y-%m-%d";

/// Number of leading text columns in every presentation table.
pub const TEXT_COLUMNS: usize = 2;

/// One indicator's row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationRow {
    /// Catalog description, empty when the code is not in the catalog
    pub description: String,
    /// Indicator code
    pub code: String,
    /// One value per period, oldest first
    pub values: Vec<Option<f64>>,
}

/// Indicator rows by period columns, ready to be written to a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationTable {
    code_header: String,
    dates: Vec<NaiveDate>,
    rows: Vec<PresentationRow>,
}

impl PresentationTable {
    /// Column headers: description, `"<label> <dimension>"`, then one
    /// `YYYY-MM-DD` header per period.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.column_count());
        headers.push(DESCRIPTION_HEADER.to_string());
        headers.push(self.code_header.clone());
        headers.extend(self.dates.iter().map(|d| d.format(DATE_HEADER_FORMAT).to_string()));
        headers
    }

    /// Indicator rows in source column order.
    pub fn rows(&self) -> &[PresentationRow] {
        &self.rows
    }

    /// Period-end dates, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of periods.
    pub fn periods(&self) -> usize {
        self.dates.len()
    }

    /// Total columns, periods plus the two text columns.
    pub fn column_count(&self) -> usize {
        self.periods() + TEXT_COLUMNS
    }

    /// Row for `code`, if present.
    pub fn row(&self, code: &str) -> Option<&PresentationRow> {
        self.rows.iter().find(|row| row.code == code)
    }

    /// Transpose back into a period-indexed frame with a [`DATE_KEY`] column.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.rows.len() + 1);
        columns.push(date_column(DATE_KEY, &self.dates)?);
        for row in &self.rows {
            columns.push(Series::new(row.code.as_str().into(), row.values.clone()).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

/// Transpose a period-indexed frame into a presentation table.
///
/// `frame` must carry a [`DATE_KEY`] column; every other column becomes a
/// row, in frame order. Descriptions come from `catalog`.
pub fn present(
    frame: &DataFrame,
    catalog: &[IndicatorSpec],
    statement_label: &str,
    dimension: Dimension,
) -> Result<PresentationTable> {
    let dates = read_dates(frame)?;
    let rows = frame
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != DATE_KEY)
        .map(|name| {
            Ok(PresentationRow {
                description: describe(catalog, name.as_str()).unwrap_or_default().to_string(),
                code: name.to_string(),
                values: float_values(frame, name.as_str())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(statement = statement_label, rows = rows.len(), periods = dates.len(), "transposed table");
    Ok(PresentationTable {
        code_header: format!("{statement_label} {dimension}"),
        dates,
        rows,
    })
}

/// [`present`] a raw statement using its own catalog and label.
pub fn present_statement(frame: &DataFrame, kind: StatementKind, dimension: Dimension) -> Result<PresentationTable> {
    present(frame, kind.catalog(), kind.label(), dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        let dates = [
            NaiveDate::from_ymd_opt(2022, 10, 28).unwrap(),
            NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
        ];
        DataFrame::new(vec![
            date_column(DATE_KEY, &dates).unwrap(),
            Series::new("revenue".into(), vec![Some(394.3), Some(383.3)]).into(),
            Series::new("mystery".into(), vec![None, Some(1.0)]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_headers_and_descriptions() {
        let table = present_statement(&frame(), StatementKind::Income, Dimension::Mry).unwrap();

        assert_eq!(
            table.headers(),
            vec!["Description", "Sharadar Income MRY", "2022-10-28", "2023-11-03"]
        );
        assert_eq!(table.rows()[0].description, "Revenues");
        assert_eq!(table.rows()[0].code, "revenue");
        assert_eq!(table.rows()[1].description, "");
        assert_eq!(table.row("mystery").unwrap().values, vec![None, Some(1.0)]);
    }

    #[test]
    fn test_to_frame_restores_values() {
        let original = frame();
        let table = present(&original, &[], "Test", Dimension::Arq).unwrap();
        assert!(table.to_frame().unwrap().equals_missing(&original));
    }
}
