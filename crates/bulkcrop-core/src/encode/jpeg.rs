//! JPEG encoding for lossy output.
//!
//! Every source that is not PNG is re-encoded as JPEG at a fixed quality.
//! JPEG has no alpha channel, so callers flatten to RGB first.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100); values outside the range are clamped
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Any non-empty RGB buffer of the right size encodes to a
        /// well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=255,
            fill in any::<u8>(),
        ) {
            let pixels = vec![fill; (width as usize) * (height as usize) * 3];

            let jpeg_bytes = encode_jpeg(&pixels, width, height, quality).unwrap();

            let len = jpeg_bytes.len();
            prop_assert!(len >= 4);
            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }
    }
}
