//! xlsx workbook emitter.

use crate::cagr::{cagr, cagr_formula, cagr_years};
use crate::error::{OutputError, Result};
use crate::present::{PresentationTable, TEXT_COLUMNS};
use crate::summary::{Polarity, SummaryTable};
use fundsheet_data::Dimension;
use rust_xlsxwriter::{
    Color, ConditionalFormat3ColorScale, ConditionalFormatCell, ConditionalFormatCellRule, Format, FormatAlign,
    Formula, Sparkline, Table, TableColumn, Workbook, Worksheet,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the summary worksheet, always the first sheet.
pub const SUMMARY_SHEET: &str = "Summary";

/// Header written over the CAGR column.
pub const CAGR_HEADER: &str = "CAGR";

const TEXT_COLUMN_WIDTH: f64 = 40.0;
const NUMERIC_COLUMN_WIDTH: f64 = 16.0;
const SPARKLINE_COLUMN_WIDTH: f64 = 20.0;
const MAX_SHEET_NAME: usize = 31;

const CRIMSON: u32 = 0xDC143C;
const GREENISH: u32 = 0x00CC66;

/// Cell formats shared by every sheet.
#[derive(Debug, Clone)]
struct Formats {
    bold: Format,
    justify: Format,
    small: Format,
    large: Format,
    summary: Format,
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            bold: Format::new().set_bold(),
            justify: Format::new().set_align(FormatAlign::Justify),
            small: Format::new().set_num_format("0.#?"),
            large: Format::new().set_num_format("#,##0"),
            summary: Format::new().set_num_format("#,##0.0"),
        }
    }
}

/// Workbook with one sheet per ticker and a leading summary sheet.
///
/// Nothing touches the filesystem until [`StockWorkbook::save`].
pub struct StockWorkbook {
    workbook: Workbook,
    formats: Formats,
    /// Lower-cased names already taken; sheet names compare without case.
    used_names: HashSet<String>,
}

impl std::fmt::Debug for StockWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockWorkbook").finish_non_exhaustive()
    }
}

impl StockWorkbook {
    /// Create a workbook holding an empty summary sheet.
    pub fn new() -> Result<Self> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name(SUMMARY_SHEET)?;
        Ok(Self {
            workbook,
            formats: Formats::default(),
            used_names: HashSet::from([SUMMARY_SHEET.to_lowercase()]),
        })
    }

    /// Add a worksheet for `name` and return the sheet name actually used.
    ///
    /// The name is sanitised, and if it clashes with an existing sheet
    /// (ignoring case) a `_2`, `_3`, ... suffix is appended.
    pub fn add_sheet(&mut self, name: &str) -> Result<String> {
        let base = sanitize_sheet_name(name);
        let mut sheet_name = base.clone();
        let mut n = 2;
        while self.used_names.contains(&sheet_name.to_lowercase()) {
            let suffix = format!("_{n}");
            let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
            sheet_name = base.chars().take(keep).collect::<String>() + &suffix;
            n += 1;
        }
        if sheet_name != base {
            warn!(name, sheet = sheet_name.as_str(), "sheet name already used, renamed");
        }
        self.workbook.add_worksheet().set_name(&sheet_name)?;
        self.used_names.insert(sheet_name.to_lowercase());
        Ok(sheet_name)
    }

    /// Names of all sheets, in workbook order.
    pub fn sheet_names(&mut self) -> Vec<String> {
        self.workbook.worksheets_mut().iter().map(|ws| ws.name()).collect()
    }

    /// Write a presentation table with its top-left corner at `row`, `col`.
    ///
    /// See [`TableLayout`] for where each part lands. Returns the number of
    /// data rows plus one.
    pub fn write_table(
        &mut self,
        sheet: &str,
        table: &PresentationTable,
        row: u32,
        col: u16,
        dimension: Dimension,
        use_header: bool,
    ) -> Result<u32> {
        let formats = self.formats.clone();
        let worksheet = self.workbook.worksheet_from_name(sheet)?;
        let layout = TableLayout::new(table, row, col, use_header);

        for c in col..layout.first_value_col {
            worksheet.set_column_width(c, TEXT_COLUMN_WIDTH)?;
            worksheet.set_column_format(c, &formats.justify)?;
        }
        for c in layout.first_value_col..=layout.cagr_col {
            worksheet.set_column_width(c, NUMERIC_COLUMN_WIDTH)?;
            worksheet.set_column_format(c, &formats.justify)?;
        }
        worksheet.set_column_width(layout.sparkline_col, SPARKLINE_COLUMN_WIDTH)?;

        if use_header {
            for (offset, header) in table.headers().iter().enumerate() {
                worksheet.write_string_with_format(row, col + offset as u16, header, &formats.bold)?;
            }
            worksheet.write_string_with_format(row, layout.cagr_col, CAGR_HEADER, &formats.bold)?;
        }

        for (index, data) in table.rows().iter().enumerate() {
            let r = layout.first_data_row + index as u32;
            worksheet.write_string(r, col, &data.description)?;
            worksheet.write_string(r, col + 1, &data.code)?;
            for (offset, value) in data.values.iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(r, layout.first_value_col + offset as u16, *value)?;
                }
            }

            let Some(growth) = layout.growth(table, index, dimension) else {
                continue;
            };
            let formula = Formula::new(growth.formula).set_result(growth.cached.map(|rate| rate.to_string()).unwrap_or_default());
            worksheet.write_formula_with_format(growth.row, growth.col, formula, &formats.small)?;

            let sparkline = Sparkline::new()
                .set_range((sheet, r, layout.first_value_col, r, layout.last_value_col))
                .show_markers(true);
            worksheet.add_sparkline(r, layout.sparkline_col, &sparkline)?;
        }

        if let Some(last_row) = layout.last_data_row() {
            add_number_bands(worksheet, &formats, layout.first_data_row, layout.first_value_col, last_row, layout.cagr_col)?;
        }

        debug!(sheet, row, rows = layout.rows, "wrote table");
        Ok(layout.rows + 1)
    }

    /// Render the summary sheet as an Excel table with a colour scale per
    /// indicator column.
    ///
    /// # Errors
    /// [`OutputError::EmptySummary`] when no ticker was processed.
    pub fn write_summary_sheet(&mut self, summary: &SummaryTable) -> Result<()> {
        if summary.is_empty() {
            return Err(OutputError::EmptySummary);
        }
        let formats = self.formats.clone();
        let worksheet = self.workbook.worksheet_from_name(SUMMARY_SHEET)?;

        let rows = summary.len() as u32;
        let cols = summary.indicators().len() as u16;

        let mut columns = vec![TableColumn::new().set_header("Ticker")];
        columns.extend(
            summary
                .indicators()
                .iter()
                .map(|indicator| TableColumn::new().set_header(indicator.code.as_str())),
        );
        worksheet.add_table(0, 0, rows, cols, &Table::new().set_columns(&columns))?;

        for (index, summary_row) in summary.rows().iter().enumerate() {
            let r = index as u32 + 1;
            worksheet.write_string_with_format(r, 0, &summary_row.ticker, &formats.summary)?;
            for (offset, value) in summary_row.values.iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number_with_format(r, offset as u16 + 1, *value, &formats.summary)?;
                }
            }
        }

        for (offset, indicator) in summary.indicators().iter().enumerate() {
            let c = offset as u16 + 1;
            let (low, high) = match indicator.polarity {
                Polarity::HigherIsBetter => (CRIMSON, GREENISH),
                Polarity::LowerIsBetter => (GREENISH, CRIMSON),
            };
            let scale = ConditionalFormat3ColorScale::new()
                .set_minimum_color(Color::RGB(low))
                .set_maximum_color(Color::RGB(high));
            worksheet.add_conditional_format(1, c, rows, c, &scale)?;
        }

        debug!(rows, cols, "wrote summary sheet");
        Ok(())
    }

    /// Write the workbook to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.workbook.save(path.as_ref())?;
        Ok(())
    }
}

/// Cell positions of a presentation table written at a given corner.
///
/// Left to right: the two text columns, one numeric column per period, the
/// CAGR formula column and the sparkline column. With a header the headers
/// sit on the corner row and data starts on the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// First row holding indicator data
    pub first_data_row: u32,
    /// Number of indicator rows
    pub rows: u32,
    /// Column of the oldest period
    pub first_value_col: u16,
    /// Column of the most recent period
    pub last_value_col: u16,
    /// Column holding the CAGR formula
    pub cagr_col: u16,
    /// Column holding the trend sparkline
    pub sparkline_col: u16,
    periods: usize,
}

/// The CAGR formula written for one indicator row.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthCell {
    /// Worksheet row
    pub row: u32,
    /// Worksheet column
    pub col: u16,
    /// Formula text
    pub formula: String,
    /// Cached result, blank when the formula falls into its error branch
    pub cached: Option<f64>,
}

impl TableLayout {
    /// Layout of `table` with its top-left corner at `row`, `col`.
    pub fn new(table: &PresentationTable, row: u32, col: u16, use_header: bool) -> Self {
        let first_value_col = col + TEXT_COLUMNS as u16;
        let cagr_col = col + u16::try_from(table.column_count()).unwrap_or(u16::MAX);
        Self {
            first_data_row: if use_header { row + 1 } else { row },
            rows: u32::try_from(table.rows().len()).unwrap_or(u32::MAX),
            first_value_col,
            last_value_col: cagr_col - 1,
            cagr_col,
            sparkline_col: cagr_col + 1,
            periods: table.periods(),
        }
    }

    /// Last row holding indicator data, `None` for an empty table.
    pub const fn last_data_row(&self) -> Option<u32> {
        match self.rows {
            0 => None,
            rows => Some(self.first_data_row + rows - 1),
        }
    }

    /// The CAGR cell for the `index`-th indicator row, `None` when the table
    /// has no periods or no such row.
    pub fn growth(&self, table: &PresentationTable, index: usize, dimension: Dimension) -> Option<GrowthCell> {
        if self.periods == 0 {
            return None;
        }
        let data = table.rows().get(index)?;
        let row = self.first_data_row + index as u32;
        let years = cagr_years(self.first_value_col, self.last_value_col, dimension);
        Some(GrowthCell {
            row,
            col: self.cagr_col,
            formula: cagr_formula(row, self.first_value_col, self.last_value_col, dimension),
            cached: cagr(
                data.values.first().copied().flatten(),
                data.values.last().copied().flatten(),
                years,
            ),
        })
    }
}

/// Values within +/-100 get up to two decimals, larger ones thousands separators.
fn add_number_bands(
    worksheet: &mut Worksheet,
    formats: &Formats,
    first_row: u32,
    first_col: u16,
    last_row: u32,
    last_col: u16,
) -> Result<()> {
    let within = ConditionalFormatCell::new()
        .set_rule(ConditionalFormatCellRule::Between(-100.0, 100.0))
        .set_format(&formats.small);
    let outside = ConditionalFormatCell::new()
        .set_rule(ConditionalFormatCellRule::NotBetween(-100.0, 100.0))
        .set_format(&formats.large);
    worksheet.add_conditional_format(first_row, first_col, last_row, last_col, &within)?;
    worksheet.add_conditional_format(first_row, first_col, last_row, last_col, &outside)?;
    Ok(())
}

/// Replace characters Excel forbids in sheet names and truncate to 31 characters.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    if cleaned.is_empty() { "_".to_string() } else { cleaned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AAPL", "AAPL")]
    #[case("BRK/B", "BRK_B")]
    #[case("A[1]:*?\\", "A_1_____")]
    #[case("  ", "_")]
    fn test_sanitize_sheet_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_sheet_name(input), expected);
    }

    #[test]
    fn test_sanitize_truncates() {
        assert_eq!(sanitize_sheet_name(&"X".repeat(40)).len(), 31);
    }

    #[test]
    fn test_summary_sheet_is_first() {
        let mut workbook = StockWorkbook::new().unwrap();
        workbook.add_sheet("AAPL").unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Summary", "AAPL"]);
    }

    #[test]
    fn test_clashing_sheet_names_get_suffix() {
        let mut workbook = StockWorkbook::new().unwrap();
        assert_eq!(workbook.add_sheet("SUMMARY").unwrap(), "SUMMARY_2");
        assert_eq!(workbook.add_sheet("BRK/B").unwrap(), "BRK_B");
        assert_eq!(workbook.add_sheet("brk_b").unwrap(), "brk_b_2");
        assert_eq!(workbook.add_sheet("BRK_B").unwrap(), "BRK_B_3");

        let long = "X".repeat(40);
        assert_eq!(workbook.add_sheet(&long).unwrap().len(), 31);
        let renamed = workbook.add_sheet(&long).unwrap();
        assert_eq!(renamed.len(), 31);
        assert!(renamed.ends_with("_2"));

        let dir = tempfile::tempdir().unwrap();
        workbook.save(dir.path().join("names.xlsx")).unwrap();
    }

    #[test]
    fn test_empty_summary_is_error() {
        let mut workbook = StockWorkbook::new().unwrap();
        let err = workbook.write_summary_sheet(&SummaryTable::default()).unwrap_err();
        assert!(matches!(err, OutputError::EmptySummary));
    }
}
