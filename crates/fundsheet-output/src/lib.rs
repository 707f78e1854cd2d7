#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fundsheet/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cagr;
pub mod error;
pub mod present;
pub mod summary;
pub mod workbook;

pub use cagr::{cagr, cagr_formula, cagr_years};
pub use error::{OutputError, Result};
pub use present::{PresentationRow, PresentationTable, present, present_statement};
pub use summary::{Polarity, SummaryIndicator, SummaryRow, SummaryTable, default_indicators};
pub use workbook::{GrowthCell, SUMMARY_SHEET, StockWorkbook, TableLayout};
