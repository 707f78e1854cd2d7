#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fundsheet/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod engine;
pub mod error;
mod formulas;
pub mod partition;
pub mod plan;
pub mod ratio;
pub mod registry;

pub use catalog::{IndicatorSpec, StatementKind};
pub use engine::RatioEngine;
pub use error::{RatioError, Result};
pub use partition::{Statements, partition};
pub use ratio::RatioKind;

// Re-export registry types for convenience
pub use registry::{RatioCategory, RatioInfo, available_ratios, get_ratio_info, ratios_by_category};
