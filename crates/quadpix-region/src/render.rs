//! Flattening a quadtree back into a raster image

use crate::error::RegionResult;
use crate::quadtree::QuadTree;
use quadpix_core::{RasterImage, Region};
use std::path::Path;

impl QuadTree {
    /// Render the leaves into a new image.
    ///
    /// The image is `width x height` of the root; leaf regions are placed
    /// relative to the root's top-left corner. Internal nodes are not
    /// drawn.
    pub fn render(&self) -> RegionResult<RasterImage> {
        let root = self.root().region();
        let mut image = RasterImage::new(root.width, root.height)?.into_mut();

        for leaf in self.leaves() {
            let r = leaf.region();
            let local = Region::new(
                r.row.saturating_sub(root.row),
                r.col.saturating_sub(root.col),
                r.height,
                r.width,
            );
            image.fill_region(&local, leaf.intensity());
        }

        Ok(image.into())
    }

    /// Render the tree and write it as a plain PPM file.
    pub fn write_ppm<P: AsRef<Path>>(&self, path: P) -> RegionResult<()> {
        let image = self.render()?;
        quadpix_io::write_image(&image, path)?;
        Ok(())
    }

    /// Render the tree and encode it as plain PPM bytes.
    pub fn write_ppm_mem(&self) -> RegionResult<Vec<u8>> {
        let image = self.render()?;
        Ok(quadpix_io::write_image_mem(&image)?)
    }
}

/// Render `tree` and save it as a plain PPM file at `path`.
pub fn flatten_to_ppm<P: AsRef<Path>>(tree: &QuadTree, path: P) -> RegionResult<()> {
    let path = path.as_ref();
    log::info!(
        "writing {}x{} quadtree rendering to {}",
        tree.width(),
        tree.height(),
        path.display()
    );
    tree.write_ppm(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::{QuadNode, build_quadtree};
    use quadpix_core::Quadrant;

    #[test]
    fn test_render_leaf_only_tree() {
        let tree = QuadTree::from_root(QuadNode::leaf(Region::new(0, 0, 3, 2), 42));
        let image = tree.render().unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 3);
        assert!(image.data().iter().all(|&v| v == 42));
    }

    #[test]
    fn test_render_ignores_internal_intensity() {
        let root = QuadNode::with_children(
            Region::new(0, 0, 2, 2),
            200,
            [
                Some(QuadNode::leaf(Region::new(0, 0, 1, 1), 1)),
                Some(QuadNode::leaf(Region::new(0, 1, 1, 1), 2)),
                Some(QuadNode::leaf(Region::new(1, 0, 1, 1), 3)),
                Some(QuadNode::leaf(Region::new(1, 1, 1, 1), 4)),
            ],
        );
        let tree = QuadTree::from_root(root);
        assert_eq!(tree.render().unwrap().data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_render_offset_root() {
        let root = QuadNode::with_children(
            Region::new(10, 20, 1, 2),
            0,
            [
                None,
                None,
                Some(QuadNode::leaf(Region::new(10, 20, 1, 1), 5)),
                Some(QuadNode::leaf(Region::new(10, 21, 1, 1), 6)),
            ],
        );
        let tree = QuadTree::from_root(root);
        assert!(tree.root().child(Quadrant::TopLeft).is_none());
        assert_eq!(tree.render().unwrap().data(), &[5, 6]);
    }

    #[test]
    fn test_render_lossless_at_zero_threshold() {
        let data: Vec<u8> = (0..35).map(|v| (v * 7) as u8).collect();
        let image = RasterImage::from_data(7, 5, data).unwrap();
        let tree = build_quadtree(&image, 0.0).unwrap();
        assert_eq!(tree.render().unwrap(), image);
    }

    #[test]
    fn test_write_ppm_mem_header() {
        let tree = QuadTree::from_root(QuadNode::leaf(Region::new(0, 0, 1, 2), 9));
        let bytes = tree.write_ppm_mem().unwrap();
        assert_eq!(bytes, b"P3\n2 1\n255\n9 9 9 9 9 9\n");
    }
}
