//! Capital employed, after Kenneth Jeffrey Marshall (*Good Stocks Cheap*).
//!
//! Capital employed is total assets less the non-interest-bearing operating
//! liabilities Sharadar reports (payables and deferred revenue). Accrued
//! expenses should also be subtracted but are not available. Each measure
//! comes in two variants, with and without cash subtracted.

use polars::prelude::*;

/// `assets - cashnequsd - payables - deferredrev`
pub(crate) fn capital_employed_sub_cash() -> Expr {
    col("assets") - col("cashnequsd") - col("payables") - col("deferredrev")
}

/// `assets - payables - deferredrev`
pub(crate) fn capital_employed_with_cash() -> Expr {
    col("assets") - col("payables") - col("deferredrev")
}

/// Operating income / capital employed, cash subtracted
pub(crate) fn roce_sub_cash() -> Expr {
    col("opinc") / col("kjm_capital_employed_sub_cash")
}

/// Operating income / capital employed, cash included
pub(crate) fn roce_with_cash() -> Expr {
    col("opinc") / col("kjm_capital_employed_with_cash")
}

pub(crate) fn fcf_roce_sub_cash() -> Expr {
    col("fcf") / col("kjm_capital_employed_sub_cash")
}

pub(crate) fn fcf_roce_with_cash() -> Expr {
    col("fcf") / col("kjm_capital_employed_with_cash")
}
