//! Error types for ratio computation.

use fundsheet_data::DataError;
use thiserror::Error;

/// Result type for ratio operations.
pub type Result<T> = std::result::Result<T, RatioError>;

/// Errors that can occur while partitioning statements or computing ratios.
#[derive(Debug, Error)]
pub enum RatioError {
    /// No formula exists for the requested ratio code
    #[error("No formula implemented for ratio '{0}'")]
    Unimplemented(String),

    /// A catalog field is absent from the raw table
    #[error("{statement} field '{field}' is missing from the raw data")]
    MissingField {
        /// Statement label the field belongs to
        statement: String,
        /// Missing field code
        field: String,
    },

    /// Ratios that depend on each other in a loop
    #[error("Ratio dependency cycle among: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    /// A ratio code shadows a raw catalog field
    #[error("Ratio code '{0}' collides with a raw indicator code")]
    CodeCollision(String),

    /// Unknown ratio category name
    #[error("Unknown ratio category '{0}'")]
    UnknownCategory(String),

    /// Data layer error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
