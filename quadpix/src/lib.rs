//! quadpix - Quadtree image approximation and steganography
//!
//! Grayscale images are approximated by a region quadtree: each rectangle
//! stores the mean intensity of its pixels and is split into quadrants
//! while its root-mean-square error exceeds a threshold. Trees can be
//! rendered back to plain PPM or stored as preorder text. A separate
//! module hides text or small images in the least significant bits of a
//! carrier image.
//!
//! # Example
//!
//! ```
//! use quadpix::RasterImage;
//! use quadpix::region::build_quadtree;
//!
//! let image = RasterImage::new_filled(4, 4, 100).unwrap();
//! let tree = build_quadtree(&image, 0.0).unwrap();
//! assert_eq!(tree.node_count(), 1);
//! assert_eq!(tree.render().unwrap(), image);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use quadpix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use quadpix_io as io;
pub use quadpix_region as region;
pub use quadpix_stego as stego;
