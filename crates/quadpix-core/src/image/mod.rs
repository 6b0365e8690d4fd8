//! RasterImage - The grayscale image container
//!
//! `RasterImage` is the image type every quadpix crate passes around: a
//! row-major grid of 8-bit intensities.
//!
//! # Ownership model
//!
//! A `RasterImage` is read-only. To modify pixel data, convert it to a
//! [`RasterImageMut`] via [`RasterImage::into_mut`] or
//! [`RasterImage::to_mut`], then convert back with `Into<RasterImage>`.
//!
//! # Size limit
//!
//! Both dimensions are capped at [`MAX_DIMENSION`] so that a malformed
//! header can never request an unbounded allocation.

mod access;
mod compare;
mod statistics;

pub use statistics::RegionStats;

use crate::error::{Error, Result};
use crate::region::Region;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 4096;

/// Validate a pair of image dimensions.
fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

/// 8-bit grayscale image
///
/// # Examples
///
/// ```
/// use quadpix_core::RasterImage;
///
/// let image = RasterImage::new(640, 480).unwrap();
/// assert_eq!(image.width(), 640);
/// assert_eq!(image.height(), 480);
/// assert_eq!(image.get_intensity(10, 10), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Create a new image with every pixel set to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0 or
    /// exceeds [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new image with every pixel set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u8) -> Result<Self> {
        check_dimensions(width, height)?;
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for out-of-range dimensions and
    /// [`Error::DataLengthMismatch`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Region covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Region {
        Region::full(self.width, self.height)
    }

    /// Get raw access to the row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get one row of pixels, or `None` past the last row.
    pub fn row_data(&self, row: u32) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = row as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Convert into a mutable image without copying.
    pub fn into_mut(self) -> RasterImageMut {
        RasterImageMut { inner: self }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> RasterImageMut {
        RasterImageMut {
            inner: self.clone(),
        }
    }
}

/// Mutable raster image
///
/// Allows modification of image data. Convert back to an immutable
/// [`RasterImage`] using `Into<RasterImage>`.
#[derive(Debug)]
pub struct RasterImageMut {
    inner: RasterImage,
}

impl RasterImageMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the row-major pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<RasterImageMut> for RasterImage {
    fn from(image: RasterImageMut) -> Self {
        image.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let image = RasterImage::new(3, 2).unwrap();
        assert_eq!(image.pixel_count(), 6);
        assert!(image.data().iter().all(|&v| v == 0));
        assert_eq!(image.bounds(), Region::new(0, 0, 2, 3));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            RasterImage::new(0, 5),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(RasterImage::new(5, 0).is_err());
        assert!(RasterImage::new(MAX_DIMENSION + 1, 1).is_err());
        assert!(RasterImage::new(1, MAX_DIMENSION).is_ok());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let err = RasterImage::from_data(2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataLengthMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_row_data() {
        let image = RasterImage::from_data(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(image.row_data(0), Some(&[1u8, 2, 3][..]));
        assert_eq!(image.row_data(1), Some(&[4u8, 5, 6][..]));
        assert_eq!(image.row_data(2), None);
    }

    #[test]
    fn test_mut_roundtrip() {
        let image = RasterImage::new_filled(2, 2, 7).unwrap();
        let mut image_mut = image.to_mut();
        image_mut.fill(9);
        let changed: RasterImage = image_mut.into();
        assert!(changed.data().iter().all(|&v| v == 9));
        assert!(image.data().iter().all(|&v| v == 7));
    }
}
