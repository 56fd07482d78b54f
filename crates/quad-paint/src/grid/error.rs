//! Error type for color grid validation.

use thiserror::Error;

/// Error type for malformed grid input.
///
/// Returned by every [`ColorGrid`](super::ColorGrid) constructor before any
/// quadtree is built, so a rejected grid never produces partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid has no cells.
    #[error("grid is empty")]
    Empty,

    /// The palette has no colors, so no cell can be valid.
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// A row's length differs from the number of rows.
    #[error("grid is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Index of the offending row
        row: usize,
        /// Length of the offending row
        len: usize,
        /// Number of rows in the grid
        expected: usize,
    },

    /// The edge length is not a power of two.
    #[error("grid size {size} is not a power of two")]
    NotPowerOfTwo {
        /// Edge length of the grid
        size: usize,
    },

    /// The flat cell buffer does not hold `size * size` cells.
    #[error("cell count mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// `size * size`
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },

    /// A cell references a color outside the palette.
    #[error("color index {color} at ({row}, {col}) is outside the palette of {palette_size} colors")]
    ColorOutOfRange {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
        /// The out-of-range color index
        color: u16,
        /// Number of colors in the palette
        palette_size: usize,
    },
}
