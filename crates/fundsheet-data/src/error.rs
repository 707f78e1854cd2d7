//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response from the data provider
    #[error("Data provider returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider supplied message, or the status reason
        message: String,
    },

    /// The provider has no rows for this ticker and dimension
    #[error("No {dimension} fundamentals found for {ticker}")]
    NotFound {
        /// Ticker that was queried
        ticker: String,
        /// Reporting dimension that was queried
        dimension: String,
    },

    /// The API key for the selected database is not configured
    #[error("Please set the {variable} environment variable to use the {database} database")]
    MissingCredentials {
        /// Database tier the key is required for
        database: String,
        /// Environment variable that should hold the key
        variable: String,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Unknown reporting dimension
    #[error("Invalid dimension: {0} (expected one of MRY, ARY, MRT, ART, MRQ, ARQ)")]
    InvalidDimension(String),

    /// Unknown database tier
    #[error("Invalid database: {0} (expected SF0 or SF1)")]
    InvalidDatabase(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

impl DataError {
    /// Whether the error means the ticker has no data, as opposed to a
    /// transport or configuration failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn not_found(ticker: &str, dimension: impl ToString) -> Self {
        Self::NotFound {
            ticker: ticker.to_string(),
            dimension: dimension.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = DataError::not_found("BOGUS", "MRY");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No MRY fundamentals found for BOGUS");

        let err = DataError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_missing_credentials_message() {
        let err = DataError::MissingCredentials {
            database: "SF1".to_string(),
            variable: "QUANDL_API_SF1_KEY".to_string(),
        };
        assert!(err.to_string().contains("QUANDL_API_SF1_KEY"));
    }
}
