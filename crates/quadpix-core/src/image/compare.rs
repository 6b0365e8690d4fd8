//! Image comparison

use super::RasterImage;

impl RasterImage {
    /// Check whether two images have the same size.
    #[inline]
    pub fn same_size(&self, other: &RasterImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Position `(row, col)` of the first differing pixel in raster order.
    ///
    /// Returns `None` if the images are identical or differ in size.
    pub fn first_difference(&self, other: &RasterImage) -> Option<(u32, u32)> {
        if !self.same_size(other) {
            return None;
        }
        self.data
            .iter()
            .zip(&other.data)
            .position(|(a, b)| a != b)
            .map(|i| ((i / self.width as usize) as u32, (i % self.width as usize) as u32))
    }
}
