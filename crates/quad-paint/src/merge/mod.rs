//! Priority merging: a second pass that fuses same-color markers.
//!
//! The layered extractor leaves same-color squares separate whenever they
//! sit in different quadtree subtrees. This pass groups the markers into
//! buckets of equal size, and inside each bucket merges same-color markers
//! first along row bands, then vertically across bands ("zipper").
//!
//! # Order safety
//!
//! Regrouping is only sound because of the shape of extractor output: every
//! marker is an aligned power-of-two square, and overlapping markers are
//! nested with the larger one painted first. Sorting by size (widest first)
//! therefore keeps every overlap in the same order, and markers in one bucket
//! never overlap each other.
//!
//! Inside a bucket the colors are committed one at a time. A marker of the
//! color being committed may grow across cells of colors that are committed
//! later, because those are painted over it afterwards. It may never grow
//! across a committed color or across cells no marker of the bucket owns.
//! The `bound_low`/`bound_high` window of each candidate encodes exactly that
//! limit, and a merge whose union leaves a window is skipped.

mod candidate;
mod error;

pub use error::MergeError;

use crate::grid::ColorIndex;
use crate::marker::{Marker, MarkerList};
use candidate::{discontinuities, merge_row, zip_bands, Candidate};

/// Fuses same-color markers of an extracted marker list.
///
/// # Example
///
/// ```
/// use quad_paint::{Marker, MarkerList, PriorityMerger};
///
/// // Two stacked 2x2 squares of the same color.
/// let input = MarkerList::from(vec![
///     Marker::square(0, 0, 2, 1),
///     Marker::square(2, 0, 2, 1),
/// ]);
/// let merged = PriorityMerger::new(4, 2).merge(&input).unwrap();
/// assert_eq!(merged.as_slice(), &[Marker::new(0, 0, 3, 1, 1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityMerger {
    grid_size: usize,
    palette_size: usize,
}

impl PriorityMerger {
    /// Create a merger for a `grid_size` × `grid_size` grid.
    pub fn new(grid_size: usize, palette_size: usize) -> Self {
        debug_assert!(grid_size.is_power_of_two());
        Self {
            grid_size,
            palette_size,
        }
    }

    /// Merge `markers`, returning a list that paints the same result.
    ///
    /// The output never has more markers than the input.
    pub fn merge(&self, markers: &MarkerList) -> Result<MarkerList, MergeError> {
        self.check_layout(markers.as_slice())?;

        let bucket_count = self.grid_size.trailing_zeros() as usize + 1;
        let mut buckets: Vec<Vec<(usize, Marker)>> = vec![Vec::new(); bucket_count];
        for (seq, marker) in markers.iter().enumerate() {
            buckets[marker.width().trailing_zeros() as usize].push((seq, *marker));
        }

        let mut out = Vec::with_capacity(markers.len());
        for (level, entries) in buckets.into_iter().enumerate().rev() {
            if entries.is_empty() {
                continue;
            }
            self.merge_bucket(1 << level, entries, &mut out);
        }

        tracing::debug!(
            before = markers.len(),
            after = out.len(),
            "priority merge finished"
        );
        debug_assert!(out.len() <= markers.len());
        Ok(MarkerList::from(out))
    }

    fn merge_bucket(&self, size: usize, entries: Vec<(usize, Marker)>, out: &mut Vec<Marker>) {
        let before = entries.len();
        let mut bands: Vec<Vec<Candidate>> = vec![Vec::new(); self.grid_size / size];
        for (seq, marker) in entries {
            bands[marker.start_row / size].push(Candidate::new(seq, marker));
        }
        for band in &mut bands {
            band.sort_by_key(|c| c.marker.start_col);
        }

        let order = commit_order(&bands);
        let start = out.len();
        for &color in &order {
            for band in &mut bands {
                merge_row(band, color);
            }

            let (mut finished, absorbed) = zip_bands(&bands, color, size);
            for (index, seq) in absorbed {
                bands[index].retain(|c| c.seq != seq);
            }

            finished.sort_by_key(|c| c.seq);
            out.extend(finished.into_iter().map(|c| c.marker));
        }

        tracing::debug!(
            bucket = size,
            colors = order.len(),
            before,
            after = out.len() - start,
            "merged bucket"
        );
    }

    /// Reject lists whose regrouping by size could change the painted result.
    fn check_layout(&self, markers: &[Marker]) -> Result<(), MergeError> {
        let n = self.grid_size;
        // Size of the last marker that painted each cell.
        let mut painted = vec![usize::MAX; n * n];

        for (index, m) in markers.iter().enumerate() {
            if m.start_row > m.end_row || m.start_col > m.end_col {
                return Err(MergeError::NotQuadAligned { index });
            }
            if m.end_row >= n || m.end_col >= n {
                return Err(MergeError::OutOfBounds {
                    index,
                    grid_size: n,
                });
            }
            if m.color as usize >= self.palette_size {
                return Err(MergeError::ColorOutOfRange {
                    index,
                    color: m.color,
                    palette_size: self.palette_size,
                });
            }

            let size = m.width();
            if m.height() != size
                || !size.is_power_of_two()
                || m.start_row % size != 0
                || m.start_col % size != 0
            {
                return Err(MergeError::NotQuadAligned { index });
            }

            for row in m.start_row..=m.end_row {
                let cells = &mut painted[row * n + m.start_col..=row * n + m.end_col];
                if cells.iter().any(|&prev| prev <= size) {
                    return Err(MergeError::OutOfOrder { index });
                }
                cells.fill(size);
            }
        }

        Ok(())
    }
}

/// Colors in commit order: fewest discontinuities first, ties by first appearance.
fn commit_order(bands: &[Vec<Candidate>]) -> Vec<ColorIndex> {
    let mut stats = discontinuities(bands);
    stats.sort_by_key(|&(_, runs, first_seq)| (runs, first_seq));
    stats.into_iter().map(|(color, _, _)| color).collect()
}
