//! Pixel access functions
//!
//! Getting and setting individual intensities, plus rectangle fills.
//!
//! # Out-of-bounds policy
//!
//! [`RasterImage::get_intensity`] returns 0 for any coordinate outside the
//! image instead of failing. Region statistics rely on this when a region
//! pokes past the image edge. Use [`RasterImage::intensity`] when the
//! distinction matters.

use super::{RasterImage, RasterImageMut};
use crate::error::{Error, Result};
use crate::region::Region;

#[inline]
fn offset(width: u32, row: u32, col: u32) -> usize {
    row as usize * width as usize + col as usize
}

impl RasterImage {
    /// Get the intensity at (row, col), or 0 if out of bounds.
    #[inline]
    pub fn get_intensity(&self, row: u32, col: u32) -> u8 {
        self.intensity(row, col).unwrap_or(0)
    }

    /// Get the intensity at (row, col).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn intensity(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[offset(self.width, row, col)])
    }
}

impl RasterImageMut {
    /// Get the intensity at (row, col).
    #[inline]
    pub fn intensity(&self, row: u32, col: u32) -> Option<u8> {
        self.inner.intensity(row, col)
    }

    /// Set the intensity at (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_intensity(&mut self, row: u32, col: u32, value: u8) -> Result<()> {
        let (width, height) = (self.inner.width, self.inner.height);
        if row >= height || col >= width {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                height,
                width,
            });
        }
        self.inner.data[offset(width, row, col)] = value;
        Ok(())
    }

    /// Fill a rectangle with `value`.
    ///
    /// The rectangle is clipped to the image; the number of pixels written
    /// is returned.
    pub fn fill_region(&mut self, region: &Region, value: u8) -> usize {
        let width = self.inner.width;
        let row_end = region.bottom().min(self.inner.height);
        let col_end = region.right().min(width);
        if region.row >= row_end || region.col >= col_end {
            return 0;
        }
        for row in region.row..row_end {
            let start = offset(width, row, region.col);
            let end = offset(width, row, col_end);
            self.inner.data[start..end].fill(value);
        }
        (row_end - region.row) as usize * (col_end - region.col) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_intensity_lenient() {
        let image = RasterImage::from_data(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(image.get_intensity(1, 0), 30);
        assert_eq!(image.get_intensity(2, 0), 0);
        assert_eq!(image.get_intensity(0, 2), 0);
        assert_eq!(image.get_intensity(u32::MAX, u32::MAX), 0);
        assert_eq!(image.intensity(2, 0), None);
        assert_eq!(image.intensity(0, 1), Some(20));
    }

    #[test]
    fn test_set_intensity() {
        let mut image = RasterImage::new(3, 3).unwrap().into_mut();
        image.set_intensity(2, 1, 200).unwrap();
        assert_eq!(image.intensity(2, 1), Some(200));
        assert!(matches!(
            image.set_intensity(3, 0, 1),
            Err(Error::IndexOutOfBounds { row: 3, .. })
        ));
    }

    #[test]
    fn test_fill_region_clipped() {
        let mut image = RasterImage::new(4, 4).unwrap().into_mut();
        let written = image.fill_region(&Region::new(2, 3, 5, 5), 8);
        assert_eq!(written, 2);
        let image: RasterImage = image.into();
        assert_eq!(image.get_intensity(2, 3), 8);
        assert_eq!(image.get_intensity(3, 3), 8);
        assert_eq!(image.get_intensity(3, 2), 0);
    }

    #[test]
    fn test_fill_region_outside() {
        let mut image = RasterImage::new(4, 4).unwrap().into_mut();
        assert_eq!(image.fill_region(&Region::new(4, 0, 2, 2), 1), 0);
        assert_eq!(image.fill_region(&Region::new(0, 0, 0, 2), 1), 0);
    }
}
