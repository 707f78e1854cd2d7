//! Wire format of the Nasdaq Data Link datatables API.

use crate::error::{DataError, Result};
use crate::frame::DATE_KEY;
use crate::raw::RawRow;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// One page of a datatable query.
#[derive(Debug, Clone, Deserialize)]
pub struct DatatableResponse {
    /// Rows and column metadata
    pub datatable: Datatable,
    /// Pagination cursor
    #[serde(default)]
    pub meta: Meta,
}

/// Rows of a datatable page, positionally aligned with `columns`.
#[derive(Debug, Clone, Deserialize)]
pub struct Datatable {
    /// Row values
    pub data: Vec<Vec<Value>>,
    /// Column names and provider types
    pub columns: Vec<ColumnSpec>,
}

/// Name and provider type of one datatable column.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,
    /// Provider type, e.g. `String`, `Date`, `Integer`, `BigDecimal(34,4)`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ColumnSpec {
    fn is_numeric(&self) -> bool {
        !matches!(self.kind.as_str(), "String" | "Date" | "text")
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    /// Cursor for the next page, absent on the last page
    #[serde(default)]
    pub next_cursor_id: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) quandl_error: ProviderError,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderError {
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) code: Option<String>,
    pub(crate) message: String,
}

impl DatatableResponse {
    /// Convert the page into raw rows.
    ///
    /// Text and date columns other than `datekey` are dropped. Every numeric
    /// column is kept, with null cells as `None`, so a field that is empty in
    /// every period still reaches the table.
    pub fn into_rows(self) -> Result<Vec<RawRow>> {
        let columns = &self.datatable.columns;
        let date_index = columns
            .iter()
            .position(|c| c.name == DATE_KEY)
            .ok_or_else(|| DataError::Parse(format!("datatable has no {DATE_KEY} column")))?;

        self.datatable
            .data
            .iter()
            .map(|cells| {
                let datekey = match cells.get(date_index) {
                    Some(Value::String(s)) => parse_date(s)?,
                    other => return Err(DataError::Parse(format!("invalid {DATE_KEY}: {other:?}"))),
                };
                let mut row = RawRow::new(datekey);
                for (spec, cell) in columns.iter().zip(cells) {
                    if spec.name == DATE_KEY || !spec.is_numeric() {
                        continue;
                    }
                    row.values.insert(spec.name.clone(), numeric_cell(&spec.name, cell)?);
                }
                Ok(row)
            })
            .collect()
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| DataError::Parse(format!("invalid date '{s}': {e}")))
}

fn numeric_cell(field: &str, cell: &Value) -> Result<Option<f64>> {
    match cell {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DataError::Parse(format!("non-numeric value '{s}' in {field}"))),
        other => Err(DataError::Parse(format!("unexpected value {other} in {field}"))),
    }
}
