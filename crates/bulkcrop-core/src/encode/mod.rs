//! Output encoding for cropped images.
//!
//! This module provides functionality for:
//! - Choosing the output format from the source's declared MIME type
//! - Encoding RGB pixel data to JPEG with configurable quality
//! - Encoding RGB or RGBA pixel data to PNG (transparency preserved)
//!
//! # Examples
//!
//! ```ignore
//! use bulkcrop_core::encode::{encode_jpeg, OutputFormat};
//!
//! let format = OutputFormat::for_source_mime("image/webp"); // Jpeg
//! let pixels = vec![128u8; 100 * 100 * 3];
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::{EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY};
