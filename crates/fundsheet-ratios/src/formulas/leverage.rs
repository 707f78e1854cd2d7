//! Leverage ratios

use super::{ebitda_minus_capex, net_debt};
use polars::prelude::*;

/// Total debt / shareholders equity
pub(crate) fn debt_equity_ratio() -> Expr {
    col("debt") / col("equity")
}

/// Total liabilities / shareholders equity
pub(crate) fn liabilities_equity_ratio() -> Expr {
    col("liabilities") / col("equity")
}

/// Total debt / EBITDA
pub(crate) fn debt_ebitda_ratio() -> Expr {
    col("debt") / col("ebitda")
}

/// Total debt / (EBITDA - capex)
pub(crate) fn debt_ebitda_minus_capex_ratio() -> Expr {
    col("debt") / ebitda_minus_capex()
}

/// Net debt / EBITDA
pub(crate) fn net_debt_ebitda_ratio() -> Expr {
    net_debt() / col("ebitda")
}

/// Net debt / (EBITDA - capex)
pub(crate) fn net_debt_ebitda_minus_capex_ratio() -> Expr {
    net_debt() / ebitda_minus_capex()
}

/// Total debt / average invested capital
pub(crate) fn debt_to_total_capital() -> Expr {
    col("debt") / col("invcapavg")
}

/// Total debt / cash flow from operations
pub(crate) fn debt_cfo_ratio() -> Expr {
    col("debt") / col("ncfo")
}

/// Non-current debt / cash flow from operations
pub(crate) fn ltdebt_cfo_ratio() -> Expr {
    col("debtnc") / col("ncfo")
}

/// Non-current debt / net income
pub(crate) fn ltdebt_earnings_ratio() -> Expr {
    col("debtnc") / col("netinc")
}
