//! Ratio formulas as polars expressions, grouped by category.
//!
//! Sharadar reports capital expenditure (`capex`) and dividends paid
//! (`ncfdiv`) as negative numbers. Adding `capex` subtracts it; dividends
//! are negated before use so payouts come out positive.

pub(crate) mod capital_employed;
pub(crate) mod cash_flow;
pub(crate) mod coverage;
pub(crate) mod growth;
pub(crate) mod leverage;
pub(crate) mod payout;
pub(crate) mod profitability;

use polars::prelude::*;

/// `numerator / shareswa`
pub(crate) fn per_share(numerator: Expr) -> Expr {
    numerator / col("shareswa")
}

/// Period-over-period change: `x[t] / x[t-1] - 1`, null for the first period.
pub(crate) fn pct_change(value: Expr) -> Expr {
    value.clone() / value.shift(lit(1)) - lit(1.0)
}

/// Dividends paid as a positive amount.
pub(crate) fn dividends_paid() -> Expr {
    lit(-1.0) * col("ncfdiv")
}

/// `ebitda + capex`, i.e. EBITDA less capital expenditure.
pub(crate) fn ebitda_minus_capex() -> Expr {
    col("ebitda") + col("capex")
}

/// `debt - cashnequsd`
pub(crate) fn net_debt() -> Expr {
    col("debt") - col("cashnequsd")
}
