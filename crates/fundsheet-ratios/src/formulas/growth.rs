//! Year-over-year changes
//!
//! The change is period over period, so it is year over year only for annual
//! dimensions. The first period is always null.

use super::pct_change;
use polars::prelude::*;

/// Change in operating income per share. Reads the `opinc_ps` ratio column.
pub(crate) fn delta_oi_fds() -> Expr {
    pct_change(col("opinc_ps"))
}

/// Change in free cash flow per share. Reads the `fcf_ps` ratio column.
pub(crate) fn delta_fcf_fds() -> Expr {
    pct_change(col("fcf_ps"))
}

/// Change in book value
pub(crate) fn delta_bv_fds() -> Expr {
    pct_change(col("equity"))
}

/// Change in tangible book value (equity less intangibles)
pub(crate) fn delta_tbv_fds() -> Expr {
    pct_change(col("equity") - col("intangibles"))
}
