//! Region - Axis-aligned rectangles in image coordinates
//!
//! A [`Region`] is addressed the way the quadtree addresses pixels:
//! top-left `(row, col)` plus `height` and `width`. Rows grow downward,
//! columns grow rightward, and both extents are exclusive.

use std::fmt;

/// The four quadrants of a split region, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper half, left half
    TopLeft = 0,
    /// Upper half, right half
    TopRight = 1,
    /// Lower half, left half
    BottomLeft = 2,
    /// Lower half, right half
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in TL, TR, BL, BR order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Slot index of this quadrant (0..4).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Quadrant for a slot index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Quadrant selected by a (bottom, right) pair.
    #[inline]
    pub fn from_sides(bottom: bool, right: bool) -> Self {
        match (bottom, right) {
            (false, false) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (true, true) => Quadrant::BottomRight,
        }
    }
}

/// A rectangle region
///
/// Small and frequently copied, so it is a plain `Copy` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Top row (zero-based)
    pub row: u32,
    /// Left column (zero-based)
    pub col: u32,
    /// Number of rows
    pub height: u32,
    /// Number of columns
    pub width: u32,
}

impl Region {
    /// Create a new region
    pub const fn new(row: u32, col: u32, height: u32, width: u32) -> Self {
        Self {
            row,
            col,
            height,
            width,
        }
    }

    /// Region covering a whole `width` x `height` image
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, height, width)
    }

    /// Get the bottom row (exclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.row.saturating_add(self.height)
    }

    /// Get the right column (exclusive)
    #[inline]
    pub fn right(&self) -> u32 {
        self.col.saturating_add(self.width)
    }

    /// Get the area in pixels
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.height) * u64::from(self.width)
    }

    /// Check if the region is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Check if the region is a single pixel
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.height == 1 && self.width == 1
    }

    /// Check if this region contains another region
    pub fn contains(&self, other: &Region) -> bool {
        other.row >= self.row
            && other.col >= self.col
            && other.bottom() <= self.bottom()
            && other.right() <= self.right()
    }

    /// Check if this region shares at least one pixel with another
    pub fn overlaps(&self, other: &Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.row < other.bottom()
            && other.row < self.bottom()
            && self.col < other.right()
            && other.col < self.right()
    }

    /// Split into TL, TR, BL, BR quadrants.
    ///
    /// The split point is `height / 2`, `width / 2` (integer division), so
    /// the bottom and right quadrants take the extra row/column of an odd
    /// extent. Along an axis of extent 1 the top (or left) quadrants have
    /// zero extent; callers decide what to do with empty entries.
    pub fn quadrants(&self) -> [Region; 4] {
        let half_h = self.height / 2;
        let half_w = self.width / 2;
        let rest_h = self.height - half_h;
        let rest_w = self.width - half_w;
        [
            Region::new(self.row, self.col, half_h, half_w),
            Region::new(self.row, self.col + half_w, half_h, rest_w),
            Region::new(self.row + half_h, self.col, rest_h, half_w),
            Region::new(self.row + half_h, self.col + half_w, rest_h, rest_w),
        ]
    }

    /// Quadrant of this region that a sub-region starting at
    /// `(row, col)` falls into, using the same split point as
    /// [`Region::quadrants`].
    pub fn quadrant_of(&self, row: u32, col: u32) -> Quadrant {
        let bottom = row >= self.row + self.height / 2;
        let right = col >= self.col + self.width / 2;
        Quadrant::from_sides(bottom, right)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, cols {}..{}",
            self.row,
            self.bottom(),
            self.col,
            self.right()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrants_even() {
        let r = Region::new(0, 0, 4, 4);
        let q = r.quadrants();
        assert_eq!(q[0], Region::new(0, 0, 2, 2));
        assert_eq!(q[1], Region::new(0, 2, 2, 2));
        assert_eq!(q[2], Region::new(2, 0, 2, 2));
        assert_eq!(q[3], Region::new(2, 2, 2, 2));
    }

    #[test]
    fn test_quadrants_odd_extents() {
        let r = Region::new(10, 20, 5, 3);
        let q = r.quadrants();
        assert_eq!(q[0], Region::new(10, 20, 2, 1));
        assert_eq!(q[1], Region::new(10, 21, 2, 2));
        assert_eq!(q[2], Region::new(12, 20, 3, 1));
        assert_eq!(q[3], Region::new(12, 21, 3, 2));
        let total: u64 = q.iter().map(Region::area).sum();
        assert_eq!(total, r.area());
    }

    #[test]
    fn test_quadrants_single_row() {
        let q = Region::new(0, 0, 1, 5).quadrants();
        assert!(q[0].is_empty());
        assert!(q[1].is_empty());
        assert_eq!(q[2], Region::new(0, 0, 1, 2));
        assert_eq!(q[3], Region::new(0, 2, 1, 3));
    }

    #[test]
    fn test_quadrants_unit() {
        let q = Region::new(3, 3, 1, 1).quadrants();
        assert_eq!(q.iter().filter(|r| !r.is_empty()).count(), 1);
        assert_eq!(q[3], Region::new(3, 3, 1, 1));
    }

    #[test]
    fn test_quadrant_of_matches_split() {
        let r = Region::new(4, 8, 7, 6);
        for (i, sub) in r.quadrants().iter().enumerate() {
            if sub.is_empty() {
                continue;
            }
            assert_eq!(r.quadrant_of(sub.row, sub.col).index(), i);
        }
    }

    #[test]
    fn test_contains_and_overlaps() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(2, 3, 4, 4);
        let c = Region::new(10, 0, 2, 2);
        assert!(a.contains(&b));
        assert!(!a.contains(&c));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&Region::new(0, 0, 0, 5)));
    }

    #[test]
    fn test_quadrant_index_roundtrip() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::from_index(q.index()), Some(q));
        }
        assert_eq!(Quadrant::from_index(4), None);
        assert_eq!(Quadrant::from_sides(true, false), Quadrant::BottomLeft);
    }
}
