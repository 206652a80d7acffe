//! Relative region to pixel rectangle conversion.
//!
//! Left/top edges are floored and extents are rounded, then the rectangle is
//! clamped to the image so float rounding can never produce an out-of-bounds
//! read. The arithmetic is `percent * size / 100`, multiplying first so that
//! whole-number inputs stay exact.

use serde::{Deserialize, Serialize};

use crate::region::RelativeRegion;

/// An integer pixel rectangle inside a specific image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Resolve a relative region against an image of the given size.
    ///
    /// The result always satisfies `x + width <= image_width` and
    /// `y + height <= image_height`. It may be empty; see [`is_empty`].
    ///
    /// [`is_empty`]: PixelRect::is_empty
    pub fn from_region(region: &RelativeRegion, image_width: u32, image_height: u32) -> Self {
        let (x, width) = resolve_span(region.x, region.width, image_width);
        let (y, height) = resolve_span(region.y, region.height, image_height);
        Self::new(x, y, width, height)
    }

    /// True if the rectangle has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Resolve one axis: returns `(start, extent)` in pixels, clamped to `size`.
fn resolve_span(offset_percent: f64, extent_percent: f64, size: u32) -> (u32, u32) {
    let size_f = f64::from(size);

    // Float to int `as` casts saturate, so negatives and NaN land on 0.
    let start = ((offset_percent * size_f / 100.0).floor() as u32).min(size);
    let extent = ((extent_percent * size_f / 100.0).round() as u32).min(size - start);

    (start, extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_80_percent_on_1000x500() {
        let region = RelativeRegion::new(10.0, 10.0, 80.0, 80.0);
        let rect = PixelRect::from_region(&region, 1000, 500);
        assert_eq!(rect, PixelRect::new(100, 50, 800, 400));
    }

    #[test]
    fn test_full_region_covers_image() {
        let rect = PixelRect::from_region(&RelativeRegion::full(), 333, 77);
        assert_eq!(rect, PixelRect::new(0, 0, 333, 77));
    }

    #[test]
    fn test_origin_floors_and_extent_rounds() {
        // 12.5% of 10 = 1.25 -> 1, 37.5% of 10 = 3.75 -> 4
        let region = RelativeRegion::new(12.5, 12.5, 37.5, 37.5);
        let rect = PixelRect::from_region(&region, 10, 10);
        assert_eq!(rect, PixelRect::new(1, 1, 4, 4));
    }

    #[test]
    fn test_overhanging_region_is_clamped() {
        // Not a valid region, but the rectangle must still stay in bounds
        let region = RelativeRegion::new(50.0, 90.0, 60.0, 20.0);
        let rect = PixelRect::from_region(&region, 10, 10);
        assert_eq!(rect, PixelRect::new(5, 9, 5, 1));
        assert!(rect.right() <= 10 && rect.bottom() <= 10);
    }

    #[test]
    fn test_tiny_region_rounds_to_empty() {
        let region = RelativeRegion::new(50.0, 50.0, 0.1, 0.1);
        let rect = PixelRect::from_region(&region, 100, 100);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_small_image_rounding() {
        let region = RelativeRegion::new(95.0, 0.0, 5.0, 100.0);
        let rect = PixelRect::from_region(&region, 10, 1);
        // floor(9.5) = 9, round(0.5) = 1
        assert_eq!(rect, PixelRect::new(9, 0, 1, 1));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
