//! Sharadar core US fundamentals (SF1 datatable).
//!
//! Two sources are provided: [`SharadarClient`] queries the Nasdaq Data Link
//! datatables API, and [`SharadarCsvSource`] reads a bulk export of the same
//! table from disk.

pub mod client;
pub mod csv_export;
pub mod datatable;

pub use client::{ClientConfig, SharadarClient};
pub use csv_export::SharadarCsvSource;
pub use datatable::DatatableResponse;

/// Datatable code queried for both database tiers.
pub const SF1_TABLE: &str = "SHARADAR/SF1";

/// Text and date columns that never carry indicator values.
pub const NON_NUMERIC_FIELDS: [&str; 5] = ["ticker", "dimension", "calendardate", "reportperiod", "lastupdated"];
