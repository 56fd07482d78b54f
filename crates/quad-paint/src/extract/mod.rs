//! Layered extraction: a first painter's-algorithm solution from the quadtree.
//!
//! The extractor walks the tree top-down and paints broad strokes first:
//! whenever a node can be covered by one rectangle of its dominant color,
//! that rectangle is emitted ahead of every descendant marker of a different
//! color, which then carve the exceptions on top of it.
//!
//! Whether a node may collapse is decided with a [`LayerTable`]. For each
//! color it records the shallowest tree depth at which a rectangle of that
//! color is still pending to be overridden. A subtree reports the most
//! urgent (shallowest) layer it depends on; a node only collapses when none
//! of its descendants depends on a layer shallower than its own color's
//! layer, otherwise collapsing would bury a carve-out under a later stroke.
//!
//! A leaf reports its color's recorded layer, or [`UNCLAIMED`] when none is
//! recorded. Reporting the leaf's own depth instead would give the same
//! result: the parent folds the report into a minimum that already holds the
//! parent's own layer, which is at most the parent's depth and therefore
//! shallower than any leaf below it.

use crate::grid::ColorIndex;
use crate::marker::{Marker, MarkerList};
use crate::quad::QuadNode;

/// Layer value of a color that is not committed at any depth.
pub const UNCLAIMED: usize = usize::MAX;

/// Per-color record of the shallowest pending commitment depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTable {
    layers: Vec<usize>,
}

impl LayerTable {
    /// A table with every color unclaimed.
    pub fn new(palette_size: usize) -> Self {
        Self {
            layers: vec![UNCLAIMED; palette_size],
        }
    }

    /// Current layer of `color`, [`UNCLAIMED`] if none.
    #[inline]
    pub fn get(&self, color: ColorIndex) -> usize {
        self.layers[color as usize]
    }

    /// Record `depth` for `color` unless a shallower layer is already recorded.
    #[inline]
    pub fn claim(&mut self, color: ColorIndex, depth: usize) {
        let layer = &mut self.layers[color as usize];
        if *layer > depth {
            *layer = depth;
        }
    }

    /// Forget the commitment of `color`.
    #[inline]
    pub fn release(&mut self, color: ColorIndex) {
        self.layers[color as usize] = UNCLAIMED;
    }

    /// Whether no color is currently committed.
    pub fn is_clear(&self) -> bool {
        self.layers.iter().all(|&layer| layer == UNCLAIMED)
    }
}

/// Extract an ordered marker list from the tree rooted at `root`.
///
/// Nodes that are leaves or no larger than `detail_limit` are emitted as a
/// single marker. Replaying the result reproduces
/// [`QuadNode::rasterize`]`(detail_limit, ..)`, which is the source grid
/// itself when `detail_limit` is 1.
///
/// # Example
///
/// ```
/// use quad_paint::{extract, ColorGrid, QuadNode};
///
/// let grid = ColorGrid::from_rows(
///     &[
///         vec![1, 1, 0, 0],
///         vec![1, 1, 0, 0],
///         vec![0, 0, 0, 0],
///         vec![0, 0, 0, 0],
///     ],
///     2,
/// )
/// .unwrap();
/// let markers = extract(&QuadNode::build(&grid), 1, grid.palette_size());
/// assert_eq!(markers.len(), 2);
/// ```
pub fn extract(root: &QuadNode, detail_limit: usize, palette_size: usize) -> MarkerList {
    let mut layers = LayerTable::new(palette_size);
    let mut out = Vec::new();
    extract_node(root, detail_limit, &mut layers, 0, &mut out);
    debug_assert!(layers.is_clear(), "layer table not released after extraction");
    MarkerList::from(out)
}

/// Emit the markers for `node` into `out`, returning the subtree's priority.
fn extract_node(
    node: &QuadNode,
    detail_limit: usize,
    layers: &mut LayerTable,
    depth: usize,
    out: &mut Vec<Marker>,
) -> usize {
    let color = node.color();
    let children = match node.children() {
        Some(children) if node.size() > detail_limit => children,
        _ => {
            out.push(node.marker());
            return layers.get(color);
        }
    };

    layers.claim(color, depth);
    let own_layer = layers.get(color);

    let mut queue = Vec::new();
    let mut priority = own_layer;
    for child in children {
        let child_priority = extract_node(child, detail_limit, layers, depth + 1, &mut queue);
        priority = priority.min(child_priority);
    }

    if priority >= own_layer {
        // One stroke covers the node; same-colored descendants are subsumed.
        out.push(node.marker());
        out.extend(queue.into_iter().filter(|m| m.color != color));
    } else {
        out.append(&mut queue);
    }

    if own_layer == depth {
        layers.release(color);
    }

    priority
}
