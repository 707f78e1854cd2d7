//! Interest coverage ratios
//!
//! Capitalized interest is not available from Sharadar, so EBIT over interest
//! expense stands in for the fixed charge coverage ratio.

use super::ebitda_minus_capex;
use polars::prelude::*;

/// EBIT / interest expense
pub(crate) fn ebit_interest_coverage() -> Expr {
    col("ebit") / col("intexp")
}

/// EBITDA / interest expense
pub(crate) fn ebitda_interest_coverage() -> Expr {
    col("ebitda") / col("intexp")
}

/// (EBITDA - capex) / interest expense
pub(crate) fn ebitda_minus_capex_interest_coverage() -> Expr {
    ebitda_minus_capex() / col("intexp")
}

/// Interest expense / (CFO + interest expense)
pub(crate) fn interest_to_cfo_plus_interest_coverage() -> Expr {
    col("intexp") / (col("ncfo") + col("intexp"))
}
