//! Payout ratios

use super::dividends_paid;
use polars::prelude::*;

/// Dividends / net income
pub(crate) fn income_dividend_payout_ratio() -> Expr {
    dividends_paid() / col("netinc")
}

/// Dividends / cash flow from operations
pub(crate) fn dividends_cfo_ratio() -> Expr {
    dividends_paid() / col("ncfo")
}

/// Dividends / free cash flow
pub(crate) fn dividends_free_cash_flow_ratio() -> Expr {
    dividends_paid() / col("fcf")
}

/// Dividends / rough FFO. Reads the `rough_ffo` ratio column.
pub(crate) fn rough_ffo_dividend_payout_ratio() -> Expr {
    dividends_paid() / col("rough_ffo")
}

/// Dividends / rough AFFO. Reads the `rough_affo` ratio column.
pub(crate) fn rough_affo_dividend_payout_ratio() -> Expr {
    dividends_paid() / col("rough_affo")
}

/// Preferred dividends / cash flow from operations
pub(crate) fn preferred_cfo_ratio() -> Expr {
    col("prefdivis") / col("ncfo")
}

/// Preferred dividends / free cash flow
pub(crate) fn preferred_free_cash_flow_ratio() -> Expr {
    col("prefdivis") / col("fcf")
}
