//! Rasterization: relative region to pixel rectangle to encoded crop.
//!
//! # Output Format
//!
//! - `image/png` sources are written as PNG, alpha preserved
//! - everything else is written as JPEG at the configured quality

mod crop;
mod rect;

pub use crop::{rasterize, FailureKind, RasterError, RasterOutput};
pub use rect::PixelRect;
