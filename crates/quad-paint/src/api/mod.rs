//! Public API for the quad-paint crate.
//!
//! This module provides the high-level API: the [`Planner`] builder and the
//! [`PlanError`] unified error type.

mod error;
mod planner;

pub use error::{PlanError, Stage};
pub use planner::{Plan, PlanStats, Planner};
