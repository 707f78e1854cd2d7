//! Compound annual growth rate over a row of periods.

use fundsheet_data::Dimension;
use rust_xlsxwriter::utility::row_col_to_cell;

/// Number of years spanned between two period columns.
///
/// Annual dimensions count one year per column step, the others one quarter.
pub fn cagr_years(first_col: u16, last_col: u16, dimension: Dimension) -> f64 {
    let steps = f64::from(last_col.saturating_sub(first_col));
    steps / dimension.periods_per_year() as f64
}

/// `(end / begin)^(1 / years) - 1`, or `None` wherever the spreadsheet
/// formula would fall into its error branch.
///
/// A blank end cell counts as zero, as it does in a spreadsheet.
pub fn cagr(begin: Option<f64>, end: Option<f64>, years: f64) -> Option<f64> {
    let begin = begin.filter(|b| *b != 0.0)?;
    if years == 0.0 {
        return None;
    }
    let rate = (end.unwrap_or(0.0) / begin).powf(1.0 / years) - 1.0;
    rate.is_finite().then_some(rate)
}

/// Spreadsheet formula computing the CAGR between two cells, blank on error.
pub fn cagr_formula(row: u32, first_col: u16, last_col: u16, dimension: Dimension) -> String {
    format!(
        "=IFERROR(({end}/{begin})^(1/{years}) - 1,\"\")",
        end = row_col_to_cell(row, last_col),
        begin = row_col_to_cell(row, first_col),
        years = format_years(cagr_years(first_col, last_col, dimension)),
    )
}

fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        years.to_string()
    }
}
