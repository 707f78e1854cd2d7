//! The fundamentals source boundary.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::raw::{RawRow, RawTable};
use std::future::Future;
use tracing::debug;

/// Anything that can return a ticker's raw rows for a reporting dimension.
///
/// Implementations return rows in whatever order the provider yields them and
/// must report a ticker with no rows as [`crate::DataError::NotFound`].
pub trait FundamentalsSource {
    /// Fetch every available period for `ticker` in `dimension`.
    fn fetch_rows(&self, ticker: &str, dimension: Dimension) -> impl Future<Output = Result<Vec<RawRow>>> + Send;
}

/// Fetch a ticker's rows, sort them by date and keep the most recent `periods`.
pub async fn fetch_indicators<S: FundamentalsSource + ?Sized>(
    source: &S,
    ticker: &str,
    dimension: Dimension,
    periods: usize,
) -> Result<RawTable> {
    let rows = source.fetch_rows(ticker, dimension).await?;
    let table = RawTable::from_rows(ticker, dimension, rows)?.most_recent(periods);
    debug!(
        ticker,
        %dimension,
        rows = table.periods(),
        columns = table.frame().width(),
        "fetched fundamentals"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;
    use chrono::NaiveDate;

    struct Fixed(Vec<RawRow>);

    impl FundamentalsSource for Fixed {
        async fn fetch_rows(&self, ticker: &str, dimension: Dimension) -> Result<Vec<RawRow>> {
            if self.0.is_empty() {
                return Err(DataError::not_found(ticker, dimension));
            }
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_indicators_truncates_after_sorting() {
        let rows = [2023, 2019, 2021, 2020, 2022]
            .into_iter()
            .map(|y| RawRow::new(NaiveDate::from_ymd_opt(y, 12, 31).unwrap()).with("revenue", f64::from(y)))
            .collect();
        let table = fetch_indicators(&Fixed(rows), "TEST", Dimension::Mry, 3).await.unwrap();

        let years: Vec<i32> = table.dates().unwrap().iter().map(chrono::Datelike::year).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
    }

    #[tokio::test]
    async fn test_fetch_indicators_propagates_not_found() {
        let err = fetch_indicators(&Fixed(vec![]), "BOGUS", Dimension::Mry, 5).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
