//! Planner builder -- the primary entry point for the crate.
//!
//! [`Planner`] chains quadtree construction, layered extraction and priority
//! merging, and replays the marker list after every pass. A plan that does
//! not reproduce its target grid is never returned.

use super::error::{PlanError, Stage};
use crate::extract::extract;
use crate::grid::ColorGrid;
use crate::marker::MarkerList;
use crate::merge::PriorityMerger;
use crate::quad::QuadNode;
use crate::verify::verify;

/// Counters describing one planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanStats {
    /// Nodes in the quadtree
    pub nodes: usize,
    /// Markers emitted by the layered extractor
    pub extracted: usize,
    /// Markers after the priority merger (equal to `extracted` when skipped)
    pub merged: usize,
}

/// A verified, ordered list of paint rectangles.
#[derive(Debug, Clone)]
pub struct Plan {
    markers: MarkerList,
    target: ColorGrid,
    stats: PlanStats,
}

impl Plan {
    /// The markers in paint order.
    #[inline]
    pub fn markers(&self) -> &MarkerList {
        &self.markers
    }

    /// The grid the markers reproduce.
    ///
    /// Equal to the input grid when the detail limit is 1; coarser limits
    /// flatten small regions to their dominant color.
    #[inline]
    pub fn target(&self) -> &ColorGrid {
        &self.target
    }

    /// Counters for the run.
    #[inline]
    pub fn stats(&self) -> PlanStats {
        self.stats
    }

    /// Consume the plan, returning the markers.
    pub fn into_markers(self) -> MarkerList {
        self.markers
    }
}

/// High-level planning builder.
///
/// - Configuration methods consume and return `self`
/// - [`plan()`](Self::plan) takes `&self`, so one planner serves many grids
///
/// # Example
///
/// ```
/// use quad_paint::{ColorGrid, Planner};
///
/// let grid = ColorGrid::from_rows(
///     &[
///         vec![0, 0, 1, 1],
///         vec![0, 0, 1, 1],
///         vec![0, 0, 0, 0],
///         vec![0, 0, 0, 0],
///     ],
///     2,
/// )
/// .unwrap();
///
/// let plan = Planner::new().plan(&grid).unwrap();
/// assert_eq!(plan.markers().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    detail_limit: usize,
    optimize: bool,
}

impl Planner {
    /// Create a planner with full detail and merging enabled.
    pub fn new() -> Self {
        Self {
            detail_limit: 1,
            optimize: true,
        }
    }

    /// Set the largest quad size that is always painted as one rectangle.
    #[inline]
    pub fn detail_limit(mut self, limit: usize) -> Self {
        self.detail_limit = limit;
        self
    }

    /// Enable or disable the priority merger pass.
    #[inline]
    pub fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    /// Plan the paint commands for `grid`.
    ///
    /// Runs:
    /// 1. Quadtree construction
    /// 2. Layered extraction, then replay verification
    /// 3. Priority merging (if enabled), then replay verification
    pub fn plan(&self, grid: &ColorGrid) -> Result<Plan, PlanError> {
        if self.detail_limit == 0 {
            return Err(PlanError::InvalidDetailLimit(self.detail_limit));
        }

        let root = QuadNode::build(grid);
        let nodes = root.node_count();
        let target = if self.detail_limit == 1 {
            grid.clone()
        } else {
            root.rasterize(self.detail_limit, grid.palette_size())
        };

        let extracted = extract(&root, self.detail_limit, grid.palette_size());
        drop(root);
        check(&target, &extracted, Stage::Extract)?;
        tracing::debug!(
            nodes,
            markers = extracted.len(),
            detail_limit = self.detail_limit,
            "layered extraction verified"
        );

        let extracted_count = extracted.len();
        let markers = if self.optimize {
            let merged = PriorityMerger::new(grid.size(), grid.palette_size()).merge(&extracted)?;
            check(&target, &merged, Stage::Merge)?;
            tracing::debug!(markers = merged.len(), "priority merge verified");
            merged
        } else {
            extracted
        };

        let stats = PlanStats {
            nodes,
            extracted: extracted_count,
            merged: markers.len(),
        };
        Ok(Plan {
            markers,
            target,
            stats,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

fn check(target: &ColorGrid, markers: &MarkerList, stage: Stage) -> Result<(), PlanError> {
    let result = verify(target, markers.as_slice());
    match result.first() {
        None => Ok(()),
        Some(&first) => {
            tracing::error!(
                %stage,
                count = result.mismatches().len(),
                %first,
                "replay verification failed"
            );
            Err(PlanError::Verification {
                stage,
                count: result.mismatches().len(),
                first,
            })
        }
    }
}
