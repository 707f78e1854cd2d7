//! Sharadar SF1 bulk CSV export reader.

use super::NON_NUMERIC_FIELDS;
use super::datatable::parse_date;
use crate::dimension::Dimension;
use crate::error::{DataError, Result};
use crate::frame::DATE_KEY;
use crate::raw::RawRow;
use crate::source::FundamentalsSource;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a ticker's rows from a bulk export of the SF1 table.
///
/// The export carries one header row of field names, including `ticker`,
/// `dimension` and `datekey`. The file is scanned once per fetch.
#[derive(Debug, Clone)]
pub struct SharadarCsvSource {
    path: PathBuf,
}

impl SharadarCsvSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the export.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan the export for rows matching `ticker` and `dimension`.
    pub fn read_rows(&self, ticker: &str, dimension: Dimension) -> Result<Vec<RawRow>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let index_of = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| DataError::Parse(format!("{} has no '{name}' column", self.path.display())))
        };
        let ticker_index = index_of("ticker")?;
        let dimension_index = index_of("dimension")?;
        let date_index = index_of(DATE_KEY)?;

        let wanted_dimension = dimension.to_string();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let matches_ticker = record.get(ticker_index).is_some_and(|t| t.trim().eq_ignore_ascii_case(ticker.trim()));
            let matches_dimension = record
                .get(dimension_index)
                .is_some_and(|d| d.trim().eq_ignore_ascii_case(&wanted_dimension));
            if !matches_ticker || !matches_dimension {
                continue;
            }

            let datekey = parse_date(record.get(date_index).unwrap_or_default())?;
            let mut row = RawRow::new(datekey);
            for (index, (header, cell)) in headers.iter().zip(record.iter()).enumerate() {
                let field = header.trim().to_ascii_lowercase();
                if index == date_index || NON_NUMERIC_FIELDS.contains(&field.as_str()) {
                    continue;
                }
                let cell = cell.trim();
                let value = if cell.is_empty() {
                    None
                } else {
                    Some(
                        cell.parse::<f64>()
                            .map_err(|_| DataError::Parse(format!("non-numeric value '{cell}' in {field}")))?,
                    )
                };
                row.values.insert(field, value);
            }
            rows.push(row);
        }

        debug!(ticker, %dimension, rows = rows.len(), path = %self.path.display(), "scanned SF1 export");
        if rows.is_empty() {
            return Err(DataError::not_found(ticker, dimension));
        }
        Ok(rows)
    }
}

impl FundamentalsSource for SharadarCsvSource {
    async fn fetch_rows(&self, ticker: &str, dimension: Dimension) -> Result<Vec<RawRow>> {
        self.read_rows(ticker, dimension)
    }
}
