//! Paint rectangles and the ordered list that carries them between passes.
//!
//! A [`Marker`] is one solid-color rectangle. A [`MarkerList`] is an ordered
//! sequence of markers with painter's-algorithm semantics: marker `i` is
//! painted after marker `i - 1` and may overwrite any cell it touched.

use crate::grid::ColorIndex;

/// One solid-rectangle paint operation with inclusive bounds.
///
/// Rows and columns are grid coordinates; `start_* <= end_*` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// First row covered
    pub start_row: usize,
    /// First column covered
    pub start_col: usize,
    /// Last row covered (inclusive)
    pub end_row: usize,
    /// Last column covered (inclusive)
    pub end_col: usize,
    /// Palette index painted into every covered cell
    pub color: ColorIndex,
}

impl Marker {
    /// Create a marker from inclusive bounds.
    pub fn new(
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
        color: ColorIndex,
    ) -> Self {
        debug_assert!(start_row <= end_row, "start_row {start_row} > end_row {end_row}");
        debug_assert!(start_col <= end_col, "start_col {start_col} > end_col {end_col}");
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
            color,
        }
    }

    /// Create a marker covering the square at `(row, col)` with edge `size`.
    pub fn square(row: usize, col: usize, size: usize, color: ColorIndex) -> Self {
        debug_assert!(size > 0);
        Self::new(row, col, row + size - 1, col + size - 1, color)
    }

    /// Number of columns covered.
    #[inline]
    pub fn width(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Number of rows covered.
    #[inline]
    pub fn height(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Whether the marker covers `(row, col)`.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    /// Whether the two rectangles share at least one cell.
    pub fn intersects(&self, other: &Marker) -> bool {
        self.start_row <= other.end_row
            && other.start_row <= self.end_row
            && self.start_col <= other.end_col
            && other.start_col <= self.end_col
    }

    /// The marker as the external `(color, start_row, start_col, end_row, end_col)` tuple.
    pub fn to_tuple(&self) -> (ColorIndex, usize, usize, usize, usize) {
        (
            self.color,
            self.start_row,
            self.start_col,
            self.end_row,
            self.end_col,
        )
    }
}

/// An ordered sequence of markers; order is load-bearing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerList {
    markers: Vec<Marker>,
}

impl MarkerList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker; it is painted after every marker already present.
    #[inline]
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Number of markers.
    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the list has no markers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Markers in paint order as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    /// Consume the list, returning the markers in paint order.
    pub fn into_vec(self) -> Vec<Marker> {
        self.markers
    }

    /// Number of markers painting `color`.
    pub fn count_color(&self, color: ColorIndex) -> usize {
        self.markers.iter().filter(|m| m.color == color).count()
    }
}

impl From<Vec<Marker>> for MarkerList {
    fn from(markers: Vec<Marker>) -> Self {
        Self { markers }
    }
}

impl FromIterator<Marker> for MarkerList {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        Self {
            markers: iter.into_iter().collect(),
        }
    }
}

impl Extend<Marker> for MarkerList {
    fn extend<I: IntoIterator<Item = Marker>>(&mut self, iter: I) {
        self.markers.extend(iter);
    }
}

impl IntoIterator for MarkerList {
    type Item = Marker;
    type IntoIter = std::vec::IntoIter<Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.into_iter()
    }
}

impl<'a> IntoIterator for &'a MarkerList {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}
