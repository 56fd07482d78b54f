//! The indexed-color raster the planner works on.
//!
//! A [`ColorGrid`] is an N×N matrix of palette indices where N is a power of
//! two. All shape and range checks happen at construction, so the rest of the
//! crate can index it without further validation.

mod error;

pub use error::GridError;

/// A palette index. Palettes for block-based maps stay well below 2^16 colors.
pub type ColorIndex = u16;

/// Default edge length of a map grid.
pub const DEFAULT_GRID_SIZE: usize = 128;

/// An immutable N×N grid of palette indices, stored row-major.
///
/// # Example
///
/// ```
/// use quad_paint::ColorGrid;
///
/// let grid = ColorGrid::from_rows(&[vec![0, 1], vec![1, 0]], 2).unwrap();
/// assert_eq!(grid.size(), 2);
/// assert_eq!(grid.get(0, 1), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    size: usize,
    palette_size: usize,
    cells: Vec<ColorIndex>,
}

impl ColorGrid {
    /// Create a grid from a flat row-major buffer of `size * size` cells.
    pub fn new(
        size: usize,
        palette_size: usize,
        cells: Vec<ColorIndex>,
    ) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        if !size.is_power_of_two() {
            return Err(GridError::NotPowerOfTwo { size });
        }
        if palette_size == 0 {
            return Err(GridError::EmptyPalette);
        }
        let expected = size * size;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        if let Some(pos) = cells
            .iter()
            .position(|&color| color as usize >= palette_size)
        {
            return Err(GridError::ColorOutOfRange {
                row: pos / size,
                col: pos % size,
                color: cells[pos],
                palette_size,
            });
        }

        Ok(Self {
            size,
            palette_size,
            cells,
        })
    }

    /// Create a grid from nested rows, rejecting ragged or non-square input.
    pub fn from_rows(rows: &[Vec<ColorIndex>], palette_size: usize) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(GridError::NotSquare {
                row,
                len: cells.len(),
                expected: size,
            });
        }
        Self::new(size, palette_size, rows.concat())
    }

    /// Create a grid where every cell has the same color.
    pub fn filled(size: usize, palette_size: usize, color: ColorIndex) -> Result<Self, GridError> {
        Self::new(size, palette_size, vec![color; size * size])
    }

    /// Build a grid from parts already known to be valid.
    pub(crate) fn from_parts(size: usize, palette_size: usize, cells: Vec<ColorIndex>) -> Self {
        debug_assert!(size.is_power_of_two());
        debug_assert_eq!(cells.len(), size * size);
        Self {
            size,
            palette_size,
            cells,
        }
    }

    /// Edge length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of colors in the palette the indices refer to.
    #[inline]
    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Color at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> ColorIndex {
        assert!(row < self.size && col < self.size, "cell ({row}, {col}) out of bounds");
        self.cells[row * self.size + col]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[ColorIndex] {
        &self.cells
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[ColorIndex]> {
        self.cells.chunks_exact(self.size)
    }
}
