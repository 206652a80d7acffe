//! Core types for output encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default JPEG quality for lossy output (matches the browser canvas default
/// the export flow used, 0.9).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur while encoding a cropped image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Output encoding for a cropped image.
///
/// PNG is the only format preserved from the source, since it is lossless
/// and carries transparency. Every other source format is re-encoded as JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the output format for a declared source MIME type.
    ///
    /// The comparison ignores ASCII case and any `;` parameters.
    pub fn for_source_mime(mime_type: &str) -> Self {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("image/png") {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg
        }
    }

    /// MIME type of the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// File extension (without the dot) used for archive entries.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_is_preserved() {
        assert_eq!(OutputFormat::for_source_mime("image/png"), OutputFormat::Png);
        assert_eq!(OutputFormat::for_source_mime("IMAGE/PNG"), OutputFormat::Png);
        assert_eq!(
            OutputFormat::for_source_mime("image/png; charset=binary"),
            OutputFormat::Png
        );
    }

    #[test]
    fn test_other_formats_fall_back_to_jpeg() {
        for mime in ["image/jpeg", "image/webp", "image/gif", "image/bmp", "", "text/plain"] {
            assert_eq!(OutputFormat::for_source_mime(mime), OutputFormat::Jpeg, "{mime}");
        }
    }

    #[test]
    fn test_extension_and_mime() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
    }
}
