//! quadpix-core - Basic data structures for grayscale quadtree processing
//!
//! This crate provides the fundamental data structures used throughout
//! the quadpix workspace:
//!
//! - [`RasterImage`] / [`RasterImageMut`] - 8-bit grayscale image (immutable / mutable)
//! - [`Region`] - Axis-aligned rectangle in (row, col) coordinates
//! - [`RegionStats`] - Mean and RMSE of the pixels inside a region

pub mod error;
pub mod image;
pub mod region;

pub use error::{Error, Result};
pub use image::{MAX_DIMENSION, RasterImage, RasterImageMut, RegionStats};
pub use region::{Quadrant, Region};
