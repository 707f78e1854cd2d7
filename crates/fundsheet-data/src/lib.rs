#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fundsheet/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dimension;
pub mod error;
pub mod frame;
pub mod raw;
pub mod sharadar;
pub mod source;

pub use dimension::{Database, Dimension};
pub use error::{DataError, Result};
pub use raw::{RawRow, RawTable};
pub use source::{FundamentalsSource, fetch_indicators};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
