// File: crates/traceplot-core/src/error.rs
// Summary: Library error taxonomy.

use thiserror::Error;

/// Errors surfaced by plot planning and composition.
///
/// `InvalidArgument` is raised at the entry of each public operation, before
/// any drawing happens; a render either has valid inputs and completes, or is
/// rejected up front. `ArithmeticRange` indicates a non-positive or
/// non-finite range slipped past validation and the interval search ran out
/// of orders; it is a contract violation, not a recoverable condition.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no nice interval covers range {range} within the order bound")]
    ArithmeticRange { range: f64 },
}

pub(crate) fn invalid(msg: impl Into<String>) -> PlotError {
    PlotError::InvalidArgument(msg.into())
}
