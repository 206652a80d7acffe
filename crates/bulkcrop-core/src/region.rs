//! Resolution-independent crop regions.
//!
//! A [`RelativeRegion`] describes a crop rectangle as percentages (0 to 100)
//! of an image's own width and height. One region is shared by every image in
//! a batch, so a 4000x3000 photo and a 640x480 screenshot are cropped to the
//! same relative area.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - (100, 100) = bottom-right corner
//! - `width`/`height` are percentages of the image's dimensions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a region cannot be applied to a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// A coordinate is NaN or infinite.
    #[error("Invalid region: {field} is not a finite number")]
    NonFinite { field: &'static str },

    /// `x` or `y` is below zero.
    #[error("Invalid region: {field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    /// `width` or `height` is zero or negative.
    #[error("Invalid region: {field} must be greater than zero (got {value})")]
    Empty { field: &'static str, value: f64 },

    /// The right or bottom edge lies beyond 100%.
    #[error("Invalid region: {edge} edge at {value}% exceeds 100%")]
    OutOfBounds { edge: &'static str, value: f64 },
}

/// A crop rectangle in percent of image width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeRegion {
    /// Left edge (0 to 100)
    pub x: f64,
    /// Top edge (0 to 100)
    pub y: f64,
    /// Width (0 to 100)
    pub width: f64,
    /// Height (0 to 100)
    pub height: f64,
}

impl Default for RelativeRegion {
    /// The centered 80% region the editor starts with.
    fn default() -> Self {
        Self::new(10.0, 10.0, 80.0, 80.0)
    }
}

impl RelativeRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }

    /// Right edge in percent.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge in percent.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check the region invariants.
    ///
    /// A region is valid when every coordinate is finite, `x` and `y` are not
    /// negative, `width` and `height` are positive, and the right and bottom
    /// edges do not exceed 100.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, checked in field order.
    pub fn validate(&self) -> Result<(), RegionError> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(RegionError::NonFinite { field });
        }

        for (field, value) in [("x", self.x), ("y", self.y)] {
            if value < 0.0 {
                return Err(RegionError::Negative { field, value });
            }
        }

        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0.0 {
                return Err(RegionError::Empty { field, value });
            }
        }

        for (edge, value) in [("right", self.right()), ("bottom", self.bottom())] {
            if value > 100.0 {
                return Err(RegionError::OutOfBounds { edge, value });
            }
        }

        Ok(())
    }
}

/// Free-function form of [`RelativeRegion::validate`].
pub fn validate(region: &RelativeRegion) -> Result<(), RegionError> {
    region.validate()
}
