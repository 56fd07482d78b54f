//! quad-paint: ordered solid-rectangle paint plans for color grids
//!
//! Given a square grid of palette indices, this library produces an ordered
//! list of rectangle paint commands. Replaying the list in order, each
//! rectangle overwriting the cells beneath it, reproduces the grid exactly.
//! The list is meant to be short: broad strokes first, exceptions carved on
//! top.
//!
//! # Quick Start
//!
//! The [`Planner`] builder is the primary entry point:
//!
//! ```
//! use quad_paint::{ColorGrid, Planner};
//!
//! let grid = ColorGrid::from_rows(
//!     &[
//!         vec![0, 0, 0, 0],
//!         vec![0, 1, 0, 0],
//!         vec![0, 0, 0, 0],
//!         vec![0, 0, 0, 0],
//!     ],
//!     2,
//! )
//! .unwrap();
//!
//! let plan = Planner::new().plan(&grid).unwrap();
//! assert_eq!(plan.markers().len(), 2);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! ColorGrid
//!     |
//!     v
//! QuadNode::build          (majority-vote quadtree)
//!     |
//!     v
//! extract                  (layered painter's-order markers)
//!     |
//!     +---> verify         (replay against the grid)
//!     |
//!     v
//! PriorityMerger::merge    (fuse same-color markers, optional)
//!     |
//!     +---> verify
//!     |
//!     v
//! MarkerList               (paint order)
//! ```
//!
//! Each stage can also be driven on its own; [`Planner`] only chains them and
//! refuses to return a list that fails replay.
//!
//! # Detail Limit
//!
//! A detail limit above 1 paints every quad no larger than the limit as a
//! single rectangle of its dominant color. The plan then reproduces the
//! flattened grid returned by [`QuadNode::rasterize`] instead of the input.

pub mod api;
pub mod extract;
pub mod grid;
pub mod marker;
pub mod merge;
pub mod quad;
pub mod verify;


pub use api::{Plan, PlanError, PlanStats, Planner, Stage};
pub use extract::{extract, LayerTable};
pub use grid::{ColorGrid, ColorIndex, GridError, DEFAULT_GRID_SIZE};
pub use marker::{Marker, MarkerList};
pub use merge::{MergeError, PriorityMerger};
pub use quad::QuadNode;
pub use verify::{compare, verify, Canvas, Mismatch, Verification};
