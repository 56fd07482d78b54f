//! Merge-scratch state and the two merge passes over row bands.
//!
//! A band holds the candidates of one size bucket whose top row is the
//! same, sorted by column. Within a bucket no two input markers overlap,
//! so every cell of a band is owned by exactly one candidate.

use crate::grid::ColorIndex;
use crate::marker::Marker;

/// A marker plus the scratch fields that only exist while merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Candidate {
    pub marker: Marker,
    /// Input position of the earliest marker folded into this candidate.
    pub seq: usize,
    /// Leftmost column the rectangle may cover without burying a committed color.
    pub bound_low: usize,
    /// Rightmost column the rectangle may cover without burying a committed color.
    pub bound_high: usize,
    /// Color commitment is final for this band; ends every segment it meets.
    pub sealed: bool,
}

impl Candidate {
    pub fn new(seq: usize, marker: Marker) -> Self {
        Self {
            marker,
            seq,
            bound_low: marker.start_col,
            bound_high: marker.end_col,
            sealed: false,
        }
    }

    #[inline]
    fn adjoins(&self, next: &Candidate) -> bool {
        next.marker.start_col == self.marker.end_col + 1
    }

    /// Whether `lower`, from the band directly below, can be folded in.
    ///
    /// The merged rectangle spans the union of both column ranges, so that
    /// union has to stay inside both windows.
    pub fn can_absorb(&self, lower: &Candidate) -> bool {
        let low = self.marker.start_col.min(lower.marker.start_col);
        let high = self.marker.end_col.max(lower.marker.end_col);
        self.marker.color == lower.marker.color
            && self.marker.end_row + 1 == lower.marker.start_row
            && low >= self.bound_low.max(lower.bound_low)
            && high <= self.bound_high.min(lower.bound_high)
    }

    pub fn absorb(&mut self, lower: &Candidate) {
        debug_assert!(self.can_absorb(lower));
        self.marker.start_col = self.marker.start_col.min(lower.marker.start_col);
        self.marker.end_col = self.marker.end_col.max(lower.marker.end_col);
        self.marker.end_row = lower.marker.end_row;
        self.bound_low = self.bound_low.max(lower.bound_low);
        self.bound_high = self.bound_high.min(lower.bound_high);
        self.seq = self.seq.min(lower.seq);
    }
}

/// Count the maximal same-color runs of every color along the bands.
///
/// Returns `(color, runs, first_seq)` for each color present.
pub(super) fn discontinuities(bands: &[Vec<Candidate>]) -> Vec<(ColorIndex, usize, usize)> {
    let mut stats: Vec<(ColorIndex, usize, usize)> = Vec::new();
    for band in bands {
        let mut prev: Option<&Candidate> = None;
        for cand in band {
            let color = cand.marker.color;
            let continues =
                prev.is_some_and(|p| p.marker.color == color && p.adjoins(cand));
            let slot = match stats.iter().position(|(c, _, _)| *c == color) {
                Some(slot) => slot,
                None => {
                    stats.push((color, 0, cand.seq));
                    stats.len() - 1
                }
            };
            let entry = &mut stats[slot];
            if !continues {
                entry.1 += 1;
            }
            entry.2 = entry.2.min(cand.seq);
            prev = Some(cand);
        }
    }
    stats
}

/// Fuse the candidates of `color` within each segment of `band`.
///
/// A segment is a maximal run of unsealed, column-contiguous candidates.
/// Cells of other colors inside a fused span belong to colors that are
/// painted later, so covering them is safe. Every candidate of `color` is
/// sealed afterwards, with its window set to the segment's extent.
pub(super) fn merge_row(band: &mut Vec<Candidate>, color: ColorIndex) {
    let mut start = 0;
    while start < band.len() {
        if band[start].sealed {
            start += 1;
            continue;
        }

        let mut end = start;
        while end + 1 < band.len() && !band[end + 1].sealed && band[end].adjoins(&band[end + 1]) {
            end += 1;
        }

        let low = band[start].marker.start_col;
        let high = band[end].marker.end_col;
        let members: Vec<usize> = (start..=end)
            .filter(|&k| band[k].marker.color == color)
            .collect();

        let Some((&first, rest)) = members.split_first() else {
            start = end + 1;
            continue;
        };

        let mut fused = band[first];
        for &k in rest {
            fused.marker.end_col = band[k].marker.end_col;
            fused.seq = fused.seq.min(band[k].seq);
        }
        fused.bound_low = low;
        fused.bound_high = high;
        fused.sealed = true;
        band[first] = fused;
        for &k in rest.iter().rev() {
            band.remove(k);
        }

        start = end + 1 - rest.len();
    }
}

/// Vertically merge the sealed candidates of `color` across adjacent bands.
///
/// Walks the bands top to bottom; a candidate that ends on the band directly
/// above may absorb one of the current band. Returns the finished candidates
/// and the `(band, seq)` of every absorbed candidate.
pub(super) fn zip_bands(
    bands: &[Vec<Candidate>],
    color: ColorIndex,
    height: usize,
) -> (Vec<Candidate>, Vec<(usize, usize)>) {
    let mut finished = Vec::new();
    let mut absorbed = Vec::new();
    let mut active: Vec<Candidate> = Vec::new();

    for (index, band) in bands.iter().enumerate() {
        let mut fresh = Vec::new();
        for lower in band.iter().filter(|c| c.marker.color == color) {
            match active.iter_mut().find(|upper| upper.can_absorb(lower)) {
                Some(upper) => {
                    upper.absorb(lower);
                    absorbed.push((index, lower.seq));
                }
                None => fresh.push(*lower),
            }
        }

        let band_end = (index + 1) * height - 1;
        let (extended, done): (Vec<Candidate>, Vec<Candidate>) = active
            .into_iter()
            .partition(|c| c.marker.end_row == band_end);
        finished.extend(done);
        active = extended;
        active.extend(fresh);
    }

    finished.extend(active);
    (finished, absorbed)
}
