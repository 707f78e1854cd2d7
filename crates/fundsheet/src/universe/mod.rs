//! Ticker universe for a run.
//!
//! A run covers either a single ticker or every ticker listed in a text file,
//! one per line. Blank lines and `#` comments are ignored.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors reading a ticker list.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// The list file could not be read
    #[error("Couldn't read ticker list {path}: {source}")]
    Io {
        /// Path of the list file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The list contains no tickers
    #[error("No tickers found in {0}")]
    Empty(String),
}

/// Ordered, de-duplicated list of upper-case tickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickerList {
    tickers: Vec<String>,
}

impl TickerList {
    /// A list holding one ticker.
    pub fn single(ticker: &str) -> Result<Self, UniverseError> {
        let list = Self::parse(ticker);
        if list.is_empty() {
            return Err(UniverseError::Empty("the --ticker argument".to_string()));
        }
        Ok(list)
    }

    /// Read a newline-delimited ticker file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UniverseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&text);
        if list.is_empty() {
            return Err(UniverseError::Empty(path.display().to_string()));
        }
        Ok(list)
    }

    /// Parse ticker list text. Duplicates keep their first position.
    pub fn parse(text: &str) -> Self {
        let mut seen = HashSet::new();
        let mut tickers = Vec::new();
        for line in text.lines() {
            let ticker = line.trim();
            if ticker.is_empty() || ticker.starts_with('#') {
                continue;
            }
            let ticker = ticker.to_uppercase();
            if seen.insert(ticker.clone()) {
                tickers.push(ticker);
            } else {
                warn!(ticker, "duplicate ticker ignored");
            }
        }
        Self { tickers }
    }

    /// Iterate over the tickers in list order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tickers.iter().map(String::as_str)
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Check if a ticker is in the list.
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t.eq_ignore_ascii_case(ticker))
    }
}
