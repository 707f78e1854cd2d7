//! Cash earnings proxies and per-share figures

use super::per_share;
use polars::prelude::*;

/// Net income plus depreciation and amortization.
///
/// Misses the capital gains adjustment on real estate sales a REIT would make.
pub(crate) fn rough_ffo() -> Expr {
    col("netinc") + col("depamor")
}

/// Rough FFO less capital expenditure. Reads the `rough_ffo` ratio column.
pub(crate) fn rough_affo() -> Expr {
    col("rough_ffo") + col("capex")
}

/// Reads the `rough_ffo` ratio column.
pub(crate) fn rough_ffo_ps() -> Expr {
    per_share(col("rough_ffo"))
}

/// Price / rough FFO per share. Reads the `rough_ffo_ps` ratio column.
pub(crate) fn price_rough_ffo_ps_ratio() -> Expr {
    col("price") / col("rough_ffo_ps")
}

pub(crate) fn opinc_ps() -> Expr {
    per_share(col("opinc"))
}

pub(crate) fn cfo_ps() -> Expr {
    per_share(col("ncfo"))
}

pub(crate) fn fcf_ps() -> Expr {
    per_share(col("fcf"))
}
