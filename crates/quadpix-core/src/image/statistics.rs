//! Region statistics
//!
//! Mean and root-mean-square error of the pixels inside a rectangle.
//! Only coordinates inside the image are counted, so a region that
//! extends past the edge is measured over its in-bounds part.

use super::RasterImage;
use crate::region::Region;

/// Mean and RMSE of a set of pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStats {
    /// Number of in-bounds pixels measured
    pub count: u64,
    /// Arithmetic mean intensity
    pub mean: f64,
    /// Root-mean-square deviation from `mean`
    pub rmse: f64,
}

impl RegionStats {
    /// Mean truncated toward zero to an 8-bit intensity.
    #[inline]
    pub fn truncated_mean(&self) -> u8 {
        self.mean as u8
    }
}

impl RasterImage {
    /// Compute the mean and RMSE of the pixels in `region`.
    ///
    /// Two passes: the mean first, then the squared deviation from it, so
    /// a uniform region reports an RMSE of exactly 0. An empty intersection
    /// with the image yields all-zero stats.
    pub fn region_stats(&self, region: &Region) -> RegionStats {
        let row_end = region.bottom().min(self.height);
        let col_end = region.right().min(self.width);
        if region.row >= row_end || region.col >= col_end {
            return RegionStats::default();
        }

        let rows = || {
            (region.row..row_end).filter_map(|row| {
                self.row_data(row)
                    .map(|line| &line[region.col as usize..col_end as usize])
            })
        };

        let mut sum = 0u64;
        let mut count = 0u64;
        for line in rows() {
            sum += line.iter().map(|&v| u64::from(v)).sum::<u64>();
            count += line.len() as u64;
        }
        let mean = sum as f64 / count as f64;

        let mut sq_sum = 0.0f64;
        for line in rows() {
            for &v in line {
                let diff = f64::from(v) - mean;
                sq_sum += diff * diff;
            }
        }

        RegionStats {
            count,
            mean,
            rmse: (sq_sum / count as f64).sqrt(),
        }
    }
}
