//! Source decoding for the crop pipeline.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, WebP, GIF and BMP sources
//! - Applying EXIF orientation so pixel dimensions match the browser's
//!   natural size
//!
//! # Examples
//!
//! ```ignore
//! use bulkcrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod source;
mod types;

pub use source::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation};
