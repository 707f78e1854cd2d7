//! Cross-ticker summary of the most recent indicator values.

use crate::error::{OutputError, Result};
use fundsheet_data::frame::float_values;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which direction of an indicator is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Polarity {
    /// Larger values are better (`asc`)
    HigherIsBetter,
    /// Smaller values are better (`desc`)
    LowerIsBetter,
}

impl Polarity {
    /// Short form, `asc` or `desc`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "asc",
            Self::LowerIsBetter => "desc",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::HigherIsBetter),
            "desc" => Ok(Self::LowerIsBetter),
            _ => Err(OutputError::InvalidPolarity(s.to_string())),
        }
    }
}

/// An indicator shown on the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryIndicator {
    /// Ratio or raw field code
    pub code: String,
    /// Colour scale direction
    pub polarity: Polarity,
}

impl SummaryIndicator {
    /// Create a summary indicator.
    pub fn new(code: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            code: code.into(),
            polarity,
        }
    }
}

/// The default summary indicators, in column order.
pub fn default_indicators() -> Vec<SummaryIndicator> {
    use Polarity::{HigherIsBetter as Asc, LowerIsBetter as Desc};
    [
        ("ebitda_interest_coverage", Asc),
        ("net_debt_ebitda_ratio", Desc),
        ("workingcapital", Asc),
        ("operating_margin", Asc),
        ("grossmargin", Asc),
        ("roic", Asc),
        ("kjm_roce_sub_cash", Asc),
        ("dividends_cfo_ratio", Desc),
        ("dividends_free_cash_flow_ratio", Desc),
        ("kjm_delta_oi_fds", Asc),
        ("kjm_delta_fcf_fds", Asc),
        ("preferred_cfo_ratio", Desc),
    ]
    .into_iter()
    .map(|(code, polarity)| SummaryIndicator::new(code, polarity))
    .collect()
}

/// One ticker's most recent value for each summary indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Ticker symbol
    pub ticker: String,
    /// One value per indicator, in indicator order
    pub values: Vec<Option<f64>>,
}

impl SummaryRow {
    /// Look up the last period's value of every indicator, preferring the
    /// ratio table over the raw table.
    ///
    /// # Errors
    /// [`OutputError::UnknownIndicator`] when a code is in neither table.
    pub fn collect(
        ticker: &str,
        indicators: &[SummaryIndicator],
        ratios: &DataFrame,
        raw: &DataFrame,
    ) -> Result<Self> {
        let values = indicators
            .iter()
            .map(|indicator| {
                let code = indicator.code.as_str();
                let source = if ratios.column(code).is_ok() {
                    ratios
                } else if raw.column(code).is_ok() {
                    raw
                } else {
                    return Err(OutputError::UnknownIndicator(code.to_string()));
                };
                Ok(float_values(source, code)?.last().copied().flatten())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ticker: ticker.to_string(),
            values,
        })
    }
}

/// Summary rows accumulated over a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    indicators: Vec<SummaryIndicator>,
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Empty table over `indicators`.
    pub const fn new(indicators: Vec<SummaryIndicator>) -> Self {
        Self {
            indicators,
            rows: Vec::new(),
        }
    }

    /// Collect and append a ticker's row.
    pub fn add(&mut self, ticker: &str, ratios: &DataFrame, raw: &DataFrame) -> Result<()> {
        let row = SummaryRow::collect(ticker, &self.indicators, ratios, raw)?;
        self.rows.push(row);
        Ok(())
    }

    /// Indicators, in column order.
    pub fn indicators(&self) -> &[SummaryIndicator] {
        &self.indicators
    }

    /// Rows, in the order tickers were processed.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no ticker has been added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for SummaryTable {
    fn default() -> Self {
        Self::new(default_indicators())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(columns: &[(&str, Vec<Option<f64>>)]) -> DataFrame {
        DataFrame::new(
            columns
                .iter()
                .map(|(name, values)| Series::new((*name).into(), values.clone()).into())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_collect_prefers_ratios_and_takes_latest() {
        let ratios = frame(&[("roic", vec![Some(1.0), Some(2.0)]), ("operating_margin", vec![Some(0.1), None])]);
        let raw = frame(&[("roic", vec![Some(9.0), Some(9.0)]), ("workingcapital", vec![Some(5.0), Some(6.0)])]);
        let indicators = vec![
            SummaryIndicator::new("roic", Polarity::HigherIsBetter),
            SummaryIndicator::new("workingcapital", Polarity::HigherIsBetter),
            SummaryIndicator::new("operating_margin", Polarity::HigherIsBetter),
        ];

        let row = SummaryRow::collect("TEST", &indicators, &ratios, &raw).unwrap();
        assert_eq!(row.values, vec![Some(2.0), Some(6.0), None]);
    }

    #[test]
    fn test_unknown_indicator() {
        let empty = frame(&[("a", vec![Some(1.0)])]);
        let indicators = vec![SummaryIndicator::new("nope", Polarity::LowerIsBetter)];
        let err = SummaryRow::collect("TEST", &indicators, &empty, &empty).unwrap_err();
        assert!(matches!(err, OutputError::UnknownIndicator(ref code) if code == "nope"));
    }

    #[test]
    fn test_default_indicators() {
        let indicators = default_indicators();
        assert_eq!(indicators.len(), 12);
        assert_eq!(indicators[1].code, "net_debt_ebitda_ratio");
        assert_eq!(indicators[1].polarity, Polarity::LowerIsBetter);
        assert_eq!("DESC".parse::<Polarity>().unwrap(), Polarity::LowerIsBetter);
        assert!("up".parse::<Polarity>().is_err());
    }
}
