//! quadpix-region - Quadtree decomposition for quadpix
//!
//! This crate provides the region quadtree and its codecs:
//!
//! - **Quadtree construction** - Recursive RMSE-driven subdivision
//! - **Rendering** - Flattening the leaves back into a raster image
//! - **Preorder text** - Dumping a tree as text and parsing it back
//!
//! # Examples
//!
//! ## Building and rendering
//!
//! ```
//! use quadpix_core::RasterImage;
//! use quadpix_region::build_quadtree;
//!
//! let data = vec![0, 0, 255, 255, 0, 0, 255, 255];
//! let image = RasterImage::from_data(4, 2, data).unwrap();
//!
//! let tree = build_quadtree(&image, 10.0).unwrap();
//! assert_eq!(tree.leaf_count(), 4);
//! assert_eq!(tree.render().unwrap(), image);
//! ```
//!
//! ## Preorder round trip
//!
//! ```
//! use quadpix_core::RasterImage;
//! use quadpix_region::{PreorderFormat, QuadTree, build_quadtree};
//!
//! let image = RasterImage::from_data(2, 2, vec![1, 2, 3, 4]).unwrap();
//! let tree = build_quadtree(&image, 0.0).unwrap();
//!
//! let text = tree.write_preorder_to_bytes(PreorderFormat::Masked).unwrap();
//! let loaded = QuadTree::read_preorder_from_bytes(&text).unwrap();
//! assert_eq!(loaded, tree);
//! ```

pub mod error;
pub mod quadtree;
pub mod render;
pub mod serial;

// Re-export core types
pub use quadpix_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export quadtree types and functions
pub use quadtree::{
    Preorder, QuadNode, QuadTree, QuadtreeOptions, SplitPolicy, build_quadtree,
    build_quadtree_with_options,
};

// Re-export codec functions
pub use render::flatten_to_ppm;
pub use serial::{PreorderFormat, dump_preorder, load_preorder};
