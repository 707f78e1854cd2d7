//! Margins and returns

use polars::prelude::*;

pub(crate) fn operating_margin() -> Expr {
    col("opinc") / col("revenue")
}

pub(crate) fn sg_and_a_gross_profit_ratio() -> Expr {
    col("sgna") / col("gp")
}

/// Acquirer's multiple: enterprise value / operating income
pub(crate) fn ev_opinc_ratio() -> Expr {
    col("ev") / col("opinc")
}

/// EBIT / average invested capital, as a fraction
pub(crate) fn return_on_invested_capital() -> Expr {
    col("ebit") / col("invcapavg")
}

/// Free cash flow / EBITDA
pub(crate) fn free_cash_flow_conversion_ratio() -> Expr {
    col("fcf") / col("ebitda")
}

/// (CFO - operating income) as a percentage of revenue
///
/// From Mumford et al., *Creative Cash Flow Reporting*, p. 290.
pub(crate) fn excess_cash_margin_ratio() -> Expr {
    (col("ncfo") - col("opinc")) * lit(100.0) / col("revenue")
}

pub(crate) fn depreciation_revenue_ratio() -> Expr {
    col("depamor") / col("revenue")
}

pub(crate) fn depreciation_cfo_ratio() -> Expr {
    col("depamor") / col("ncfo")
}
