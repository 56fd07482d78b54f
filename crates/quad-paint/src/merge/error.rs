//! Error type for the priority merger.

use crate::grid::ColorIndex;
use thiserror::Error;

/// Error type for marker lists the merger cannot reorder safely.
///
/// The merger regroups markers by size, which only preserves the painted
/// result when every marker is an aligned power-of-two square and
/// overlapping markers arrive larger-first. Lists produced by
/// [`extract`](crate::extract) always satisfy this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A marker reaches past the grid edge.
    #[error("marker {index} lies outside the {grid_size}x{grid_size} grid")]
    OutOfBounds {
        /// Position of the marker in the input list
        index: usize,
        /// Edge length of the grid
        grid_size: usize,
    },

    /// A marker paints a color outside the palette.
    #[error("marker {index} paints color {color} outside the palette of {palette_size} colors")]
    ColorOutOfRange {
        /// Position of the marker in the input list
        index: usize,
        /// The out-of-range color
        color: ColorIndex,
        /// Number of colors in the palette
        palette_size: usize,
    },

    /// A marker is not a power-of-two square aligned to its own size.
    #[error("marker {index} is not an aligned power-of-two square")]
    NotQuadAligned {
        /// Position of the marker in the input list
        index: usize,
    },

    /// A marker overlaps an earlier marker that is not larger than itself.
    #[error("marker {index} overlaps an earlier marker of the same or smaller size")]
    OutOfOrder {
        /// Position of the marker in the input list
        index: usize,
    },
}
