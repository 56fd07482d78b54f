//! Unified error type for the planner API.
//!
//! [`PlanError`] wraps every failure of [`Planner::plan`](super::Planner::plan)
//! so callers can propagate it with `?`.

use crate::merge::MergeError;
use crate::verify::Mismatch;
use std::fmt;
use thiserror::Error;

/// The pass whose output failed replay verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Output of the layered extractor
    Extract,
    /// Output of the priority merger
    Merge,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "layered extraction"),
            Stage::Merge => write!(f, "priority merge"),
        }
    }
}

/// Error type for planning a paint command list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The detail limit must be at least one cell.
    #[error("detail limit must be at least 1, got {0}")]
    InvalidDetailLimit(usize),

    /// The merger rejected its input.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// A pass produced markers that do not reproduce the grid.
    ///
    /// Always a planner defect; the plan is discarded.
    #[error("{stage} output failed verification at {count} cell(s), first at {first}")]
    Verification {
        /// Pass whose output failed
        stage: Stage,
        /// Number of mismatching cells
        count: usize,
        /// First mismatching cell in row-major order
        first: Mismatch,
    },
}
