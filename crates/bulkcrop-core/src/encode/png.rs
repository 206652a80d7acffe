//! PNG encoding for lossless output.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;

/// Encode RGB or RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - Pixel data in row-major order, 4 bytes per pixel when
///   `has_alpha` is set, 3 otherwise
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `has_alpha` - Whether `pixels` is RGBA
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    has_alpha: bool,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let (channels, color) = if has_alpha {
        (4, ExtendedColorType::Rgba8)
    } else {
        (3, ExtendedColorType::Rgb8)
    };

    let expected_len = (width as usize) * (height as usize) * channels;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
