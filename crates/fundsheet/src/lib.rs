#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fundsheet/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use fundsheet_data as data;
pub use fundsheet_output as output;
pub use fundsheet_ratios as ratios;

pub use universe::{TickerList, UniverseError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
