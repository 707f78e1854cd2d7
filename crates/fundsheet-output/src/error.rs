//! Error types for presentation and workbook output.

use fundsheet_data::DataError;
use thiserror::Error;

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Errors that can occur while presenting tables or writing the workbook.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Spreadsheet writer error
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The summary sheet was requested with no rows
    #[error("No tickers were processed, the summary sheet would be empty")]
    EmptySummary,

    /// A summary indicator is neither a ratio nor a raw field
    #[error("Couldn't find indicator '{0}'")]
    UnknownIndicator(String),

    /// Invalid summary polarity
    #[error("Polarity must be asc or desc, got '{0}'")]
    InvalidPolarity(String),

    /// Data layer error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
