//! Quadtree - Adaptive hierarchical approximation of a grayscale image
//!
//! A region quadtree covers the image with rectangles. Each node stores the
//! truncated mean intensity of its rectangle; a node is split into up to
//! four sub-rectangles whenever the root-mean-square error of its pixels
//! about that mean exceeds a threshold.
//!
//! # Overview
//!
//! - The root covers the whole image.
//! - A region with `rmse <= max_rmse`, or a single pixel, becomes a leaf.
//! - Otherwise the region is split at `height / 2`, `width / 2` (integer
//!   division); bottom and right parts take the extra row or column of an
//!   odd extent, so splits are asymmetric and the tree is irregular.
//! - Leaf regions partition the image exactly: no gaps, no overlaps.
//!
//! # Split policies
//!
//! Regions that are one pixel tall or wide cannot be quartered. The
//! [`SplitPolicy`] decides which child slots their two halves occupy; the
//! geometry is the same under both policies.
//!
//! # Examples
//!
//! ```
//! use quadpix_core::RasterImage;
//! use quadpix_region::build_quadtree;
//!
//! let image = RasterImage::new_filled(4, 4, 100).unwrap();
//! let tree = build_quadtree(&image, 0.0).unwrap();
//! assert!(tree.root().is_leaf());
//! assert_eq!(tree.root().intensity(), 100);
//! ```

use crate::error::{RegionError, RegionResult};
use quadpix_core::{Quadrant, RasterImage, Region};

/// How regions of extent 1 along one axis are split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPolicy {
    /// Every region is split into the four quadrants of
    /// [`Region::quadrants`], dropping the ones with zero area.
    ///
    /// A `1 x N` region ends up with bottom-left/bottom-right children and
    /// an `N x 1` region with top-right/bottom-right children.
    #[default]
    Quadrants,
    /// Single rows and single columns are split into two halves placed in
    /// the first slots: top-left/top-right for a row, top-left/bottom-left
    /// for a column. Larger regions are quartered as usual.
    LinearPairs,
}

/// Options for quadtree construction
#[derive(Debug, Clone)]
pub struct QuadtreeOptions {
    /// Largest RMSE a region may have and still be a leaf
    pub max_rmse: f64,
    /// Placement of children for single-row/single-column regions
    pub split: SplitPolicy,
}

impl Default for QuadtreeOptions {
    fn default() -> Self {
        Self {
            max_rmse: 0.0,
            split: SplitPolicy::Quadrants,
        }
    }
}

impl QuadtreeOptions {
    /// Create new options with the specified RMSE threshold
    pub fn new(max_rmse: f64) -> Self {
        Self {
            max_rmse,
            ..Self::default()
        }
    }

    /// Set the split policy
    pub fn with_split(mut self, split: SplitPolicy) -> Self {
        self.split = split;
        self
    }

    fn validate(&self) -> RegionResult<()> {
        if self.max_rmse.is_nan() || self.max_rmse < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "max_rmse must be a non-negative number, got {}",
                self.max_rmse
            )));
        }
        Ok(())
    }
}

/// One rectangle of a quadtree
///
/// A node is a leaf iff all four child slots are empty. Children are
/// owned exclusively by their parent and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadNode {
    region: Region,
    intensity: u8,
    children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    /// Create a childless node.
    pub fn leaf(region: Region, intensity: u8) -> Self {
        Self {
            region,
            intensity,
            children: [None, None, None, None],
        }
    }

    /// Create a node from already-built children, indexed by quadrant slot.
    ///
    /// Kept crate-private: callers must guarantee that the children
    /// partition `region`.
    pub(crate) fn with_children(
        region: Region,
        intensity: u8,
        children: [Option<QuadNode>; 4],
    ) -> Self {
        Self {
            region,
            intensity,
            children: children.map(|c| c.map(Box::new)),
        }
    }

    /// Rectangle covered by this node.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Top row of the region.
    #[inline]
    pub fn row(&self) -> u32 {
        self.region.row
    }

    /// Left column of the region.
    #[inline]
    pub fn col(&self) -> u32 {
        self.region.col
    }

    /// Number of rows in the region.
    #[inline]
    pub fn height(&self) -> u32 {
        self.region.height
    }

    /// Number of columns in the region.
    #[inline]
    pub fn width(&self) -> u32 {
        self.region.width
    }

    /// Mean intensity of the region, truncated toward zero.
    #[inline]
    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Child in the given quadrant slot, if present.
    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode> {
        self.children[quadrant.index()].as_deref()
    }

    /// Present children with their slots, in TL, TR, BL, BR order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, &QuadNode)> + '_ {
        Quadrant::ALL
            .into_iter()
            .filter_map(move |q| self.child(q).map(|c| (q, c)))
    }

    /// Child-presence bits: bit `i` is set when slot `i` holds a child.
    pub fn child_mask(&self) -> u8 {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .fold(0u8, |mask, (i, _)| mask | (1 << i))
    }

    /// Number of present children.
    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// True when the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|n| n.is_leaf()).count()
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .map(|(_, c)| c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Iterate over this subtree in preorder: node first, then each child
    /// subtree in TL, TR, BL, BR order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

/// Preorder iterator over a quadtree
#[derive(Debug)]
pub struct Preorder<'a> {
    stack: Vec<&'a QuadNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for slot in node.children.iter().rev() {
            if let Some(child) = slot.as_deref() {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

/// A complete quadtree
///
/// Owns its root node; dropping the tree drops every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadTree {
    root: QuadNode,
}

impl QuadTree {
    /// Wrap a root node.
    pub fn from_root(root: QuadNode) -> Self {
        Self { root }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    /// Width of the covered image.
    #[inline]
    pub fn width(&self) -> u32 {
        self.root.width()
    }

    /// Height of the covered image.
    #[inline]
    pub fn height(&self) -> u32 {
        self.root.height()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Total number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Iterate over all nodes in preorder.
    pub fn preorder(&self) -> Preorder<'_> {
        self.root.preorder()
    }

    /// Iterate over the leaves in preorder.
    pub fn leaves(&self) -> impl Iterator<Item = &QuadNode> + '_ {
        self.preorder().filter(|n| n.is_leaf())
    }
}

/// Build a quadtree with the default split policy.
///
/// # Arguments
///
/// * `image` - Source image
/// * `max_rmse` - Largest RMSE a leaf region may have
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `max_rmse` is negative
/// or NaN.
pub fn build_quadtree(image: &RasterImage, max_rmse: f64) -> RegionResult<QuadTree> {
    build_quadtree_with_options(image, &QuadtreeOptions::new(max_rmse))
}

/// Build a quadtree with explicit options.
pub fn build_quadtree_with_options(
    image: &RasterImage,
    options: &QuadtreeOptions,
) -> RegionResult<QuadTree> {
    options.validate()?;

    let root = subdivide(image, image.bounds(), options);
    let tree = QuadTree::from_root(root);
    log::debug!(
        "built quadtree for {}x{} image (max_rmse {}, {:?}): {} nodes, {} leaves, depth {}",
        image.width(),
        image.height(),
        options.max_rmse,
        options.split,
        tree.node_count(),
        tree.leaf_count(),
        tree.depth()
    );
    Ok(tree)
}

/// Recursively build the node for `region`.
fn subdivide(image: &RasterImage, region: Region, options: &QuadtreeOptions) -> QuadNode {
    let stats = image.region_stats(&region);
    let intensity = stats.truncated_mean();

    if stats.rmse <= options.max_rmse || region.is_unit() {
        return QuadNode::leaf(region, intensity);
    }

    let slots = child_regions(&region, options.split);
    // Unreachable for non-empty regions under both policies: the
    // bottom-right part of any region larger than 1x1 has nonzero area
    // and 1x1 regions returned above. Kept so that a region with no
    // splittable part still ends as a leaf.
    if slots.iter().all(Option::is_none) {
        log::debug!("region {region} cannot be split, keeping it as a leaf");
        return QuadNode::leaf(region, intensity);
    }

    log::trace!(
        "splitting {region}: rmse {:.3} > {}",
        stats.rmse,
        options.max_rmse
    );
    let children = slots.map(|slot| slot.map(|sub| subdivide(image, sub, options)));
    QuadNode::with_children(region, intensity, children)
}

/// Sub-regions of `region` by slot under the given policy; zero-area
/// parts are `None`.
pub(crate) fn child_regions(region: &Region, split: SplitPolicy) -> [Option<Region>; 4] {
    let quadrants = region.quadrants();
    let non_empty = |r: Region| (!r.is_empty()).then_some(r);

    match split {
        SplitPolicy::LinearPairs if region.height == 1 => {
            // Right half sits in the bottom slots of the quadrant split.
            [
                non_empty(quadrants[Quadrant::BottomLeft.index()]),
                non_empty(quadrants[Quadrant::BottomRight.index()]),
                None,
                None,
            ]
        }
        SplitPolicy::LinearPairs if region.width == 1 => [
            non_empty(quadrants[Quadrant::TopRight.index()]),
            None,
            non_empty(quadrants[Quadrant::BottomRight.index()]),
            None,
        ],
        _ => quadrants.map(non_empty),
    }
}
