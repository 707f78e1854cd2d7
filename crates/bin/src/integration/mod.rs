//! Run orchestration for the xlsx command.
//!
//! The pipeline drives fetch, partition, ratio computation, presentation and
//! emission for each ticker in turn and renders the summary sheet at the end.

pub(crate) mod pipeline;
pub(crate) mod prompt;
