//! Replay verification of marker lists.
//!
//! Every optimization pass in the planner is followed by a replay of the
//! marker list onto a scratch [`Canvas`] and a cell-by-cell comparison with
//! the ground truth. A mismatch is always a planner defect.

use crate::grid::{ColorGrid, ColorIndex};
use crate::marker::Marker;

/// A scratch raster that markers are replayed onto.
///
/// Cells start unset (`None`), which no palette index can equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: usize,
    cells: Vec<Option<ColorIndex>>,
}

impl Canvas {
    /// A `size` × `size` canvas with every cell unset.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Replay `markers` in order onto a fresh canvas.
    pub fn replay<'a>(size: usize, markers: impl IntoIterator<Item = &'a Marker>) -> Self {
        let mut canvas = Self::new(size);
        for marker in markers {
            canvas.paint(marker);
        }
        canvas
    }

    /// Overwrite every in-bounds cell of `marker` with its color.
    pub fn paint(&mut self, marker: &Marker) {
        if marker.start_row >= self.size || marker.start_col >= self.size {
            return;
        }
        let end_row = marker.end_row.min(self.size - 1);
        let end_col = marker.end_col.min(self.size - 1);
        for row in marker.start_row..=end_row {
            let start = row * self.size;
            self.cells[start + marker.start_col..=start + end_col].fill(Some(marker.color));
        }
    }

    /// Edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color at `(row, col)`, `None` if nothing painted it.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<ColorIndex> {
        self.cells[row * self.size + col]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Option<ColorIndex>] {
        &self.cells
    }
}

/// One cell where the replay disagrees with the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Row of the cell
    pub row: usize,
    /// Column of the cell
    pub col: usize,
    /// Color in the ground truth
    pub expected: ColorIndex,
    /// Color left by the replay, `None` if no marker covered the cell
    pub actual: Option<ColorIndex>,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.actual {
            Some(actual) => write!(
                f,
                "({}, {}): expected color {}, replay painted {}",
                self.row, self.col, self.expected, actual
            ),
            None => write!(
                f,
                "({}, {}): expected color {}, replay left it unpainted",
                self.row, self.col, self.expected
            ),
        }
    }
}

/// Outcome of a replay check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verification {
    mismatches: Vec<Mismatch>,
}

impl Verification {
    /// Whether the replay reproduced the ground truth exactly.
    #[inline]
    pub fn is_pass(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Every mismatching cell, row-major.
    #[inline]
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// The first mismatching cell in row-major order.
    #[inline]
    pub fn first(&self) -> Option<&Mismatch> {
        self.mismatches.first()
    }

    /// Coordinates of every mismatching cell.
    pub fn coordinates(&self) -> Vec<(usize, usize)> {
        self.mismatches.iter().map(|m| (m.row, m.col)).collect()
    }
}

/// Replay `markers` onto a blank canvas and compare it against `truth`.
///
/// # Example
///
/// ```
/// use quad_paint::{verify, ColorGrid, Marker};
///
/// let truth = ColorGrid::filled(2, 1, 0).unwrap();
/// let result = verify(&truth, &[Marker::square(0, 0, 2, 0)]);
/// assert!(result.is_pass());
///
/// let result = verify(&truth, &[Marker::square(0, 0, 1, 0)]);
/// assert_eq!(result.coordinates(), vec![(0, 1), (1, 0), (1, 1)]);
/// ```
pub fn verify(truth: &ColorGrid, markers: &[Marker]) -> Verification {
    let canvas = Canvas::replay(truth.size(), markers);
    compare(truth, &canvas)
}

/// Compare a replayed canvas against the ground truth.
pub fn compare(truth: &ColorGrid, canvas: &Canvas) -> Verification {
    debug_assert_eq!(truth.size(), canvas.size());
    let size = truth.size();
    let mut mismatches = Vec::new();
    for (i, (&expected, &actual)) in truth.cells().iter().zip(canvas.cells()).enumerate() {
        if actual != Some(expected) {
            mismatches.push(Mismatch {
                row: i / size,
                col: i % size,
                expected,
                actual,
            });
        }
    }
    Verification { mismatches }
}
