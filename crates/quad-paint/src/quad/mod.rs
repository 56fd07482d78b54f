//! Quadtree decomposition of a [`ColorGrid`].
//!
//! Every node covers a square region and carries the dominant color of that
//! region, decided bottom-up by a majority vote over its four children.

use crate::grid::{ColorGrid, ColorIndex};
use crate::marker::Marker;

/// A square region of the grid with its dominant color.
///
/// Interior nodes own exactly four children in the order top-left,
/// top-right, bottom-left, bottom-right. Leaves cover a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadNode {
    row: usize,
    col: usize,
    size: usize,
    color: ColorIndex,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    /// Build the full quadtree for `grid`, rooted at `(0, 0, N)`.
    ///
    /// # Example
    ///
    /// ```
    /// use quad_paint::{ColorGrid, QuadNode};
    ///
    /// let grid = ColorGrid::from_rows(&[vec![1, 1], vec![0, 1]], 2).unwrap();
    /// let root = QuadNode::build(&grid);
    /// assert_eq!(root.color(), 1);
    /// assert!(!root.is_leaf());
    /// ```
    pub fn build(grid: &ColorGrid) -> Self {
        Self::build_region(grid, 0, 0, grid.size())
    }

    fn build_region(grid: &ColorGrid, row: usize, col: usize, size: usize) -> Self {
        if size == 1 {
            return Self {
                row,
                col,
                size,
                color: grid.get(row, col),
                children: None,
            };
        }

        let half = size / 2;
        let children = [
            Self::build_region(grid, row, col, half),
            Self::build_region(grid, row, col + half, half),
            Self::build_region(grid, row + half, col, half),
            Self::build_region(grid, row + half, col + half, half),
        ];
        let color = dominant_color([
            children[0].color,
            children[1].color,
            children[2].color,
            children[3].color,
        ]);

        Self {
            row,
            col,
            size,
            color,
            children: Some(Box::new(children)),
        }
    }

    /// Top row of the region.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Left column of the region.
    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Edge length of the region.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Dominant color of the region.
    #[inline]
    pub fn color(&self) -> ColorIndex {
        self.color
    }

    /// Whether this node covers a single cell.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The four children (TL, TR, BL, BR), or `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        self.children.as_deref()
    }

    /// A marker covering the whole region in the dominant color.
    pub fn marker(&self) -> Marker {
        Marker::square(self.row, self.col, self.size, self.color)
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(QuadNode::node_count).sum())
    }

    /// Paint the tree back into a grid as seen at `detail_limit`.
    ///
    /// Nodes no larger than `detail_limit` are painted solid in their
    /// dominant color; larger nodes defer to their children. With a detail
    /// limit of 1 the result equals the grid the tree was built from.
    pub fn rasterize(&self, detail_limit: usize, palette_size: usize) -> ColorGrid {
        let mut cells = vec![0; self.size * self.size];
        self.rasterize_into(detail_limit, &mut cells, self.size);
        ColorGrid::from_parts(self.size, palette_size, cells)
    }

    fn rasterize_into(&self, detail_limit: usize, cells: &mut [ColorIndex], stride: usize) {
        match self.children() {
            Some(children) if self.size > detail_limit => {
                for child in children {
                    child.rasterize_into(detail_limit, cells, stride);
                }
            }
            _ => {
                for r in self.row..self.row + self.size {
                    let start = r * stride + self.col;
                    cells[start..start + self.size].fill(self.color);
                }
            }
        }
    }
}

/// Majority vote over four child colors; the lowest color index wins ties.
fn dominant_color(colors: [ColorIndex; 4]) -> ColorIndex {
    let mut best = colors[0];
    let mut best_count = 0;
    for &candidate in &colors {
        let count = colors.iter().filter(|&&c| c == candidate).count();
        if count > best_count || (count == best_count && candidate < best) {
            best = candidate;
            best_count = count;
        }
    }
    best
}
