//! Per-item crop: decode, copy the pixel rectangle, encode.

use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::PixelRect;
use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_jpeg, encode_png, EncodeError, OutputFormat};
use crate::region::RelativeRegion;
use crate::source::SourceImage;

/// Per-item failure category, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    DimensionUnknown,
    DecodeFailure,
    DegenerateRegion,
    EncodeFailure,
}

/// Errors that can occur while rasterizing a single source image.
///
/// Each variant carries the id of the source item it belongs to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    /// Ingestion never resolved the image's pixel dimensions.
    #[error("{source_id}: pixel dimensions are unknown")]
    DimensionUnknown { source_id: String },

    /// The source bytes could not be decoded.
    #[error("{source_id}: {source}")]
    Decode {
        source_id: String,
        #[source]
        source: DecodeError,
    },

    /// The region resolves to zero pixels in width or height.
    #[error("{source_id}: crop region is empty at {}x{} pixels", .rect.width, .rect.height)]
    DegenerateRegion { source_id: String, rect: PixelRect },

    /// The cropped pixels could not be encoded.
    #[error("{source_id}: {source}")]
    Encode {
        source_id: String,
        #[source]
        source: EncodeError,
    },
}

impl RasterError {
    /// Id of the source item that failed.
    pub fn source_id(&self) -> &str {
        match self {
            RasterError::DimensionUnknown { source_id }
            | RasterError::Decode { source_id, .. }
            | RasterError::DegenerateRegion { source_id, .. }
            | RasterError::Encode { source_id, .. } => source_id,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            RasterError::DimensionUnknown { .. } => FailureKind::DimensionUnknown,
            RasterError::Decode { .. } => FailureKind::DecodeFailure,
            RasterError::DegenerateRegion { .. } => FailureKind::DegenerateRegion,
            RasterError::Encode { .. } => FailureKind::EncodeFailure,
        }
    }
}

/// A successfully cropped and encoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOutput {
    /// Pixel rectangle that was copied out of the decoded source
    pub rect: PixelRect,
    /// Encoding of `bytes`
    pub format: OutputFormat,
    /// Encoded image
    pub bytes: Vec<u8>,
}

/// Crop one source image to a relative region and encode the result.
///
/// Declared dimensions gate the item: without them nothing is decoded. The
/// rectangle itself is always resolved against the decoded size, so a wrong
/// declaration in either direction still crops the real image.
///
/// # Arguments
///
/// * `region` - Validated relative region shared by the batch
/// * `image` - Source item; never modified
/// * `jpeg_quality` - Quality for non-PNG sources (1-100)
///
/// # Errors
///
/// See [`RasterError`].
pub fn rasterize(
    region: &RelativeRegion,
    image: &SourceImage,
    jpeg_quality: u8,
) -> Result<RasterOutput, RasterError> {
    let (width, height) = image
        .dimensions()
        .ok_or_else(|| RasterError::DimensionUnknown {
            source_id: image.id.clone(),
        })?;

    let decoded = decode_image(&image.bytes).map_err(|source| RasterError::Decode {
        source_id: image.id.clone(),
        source,
    })?;

    let (decoded_width, decoded_height) = (decoded.width(), decoded.height());
    if (decoded_width, decoded_height) != (width, height) {
        warn!(
            source_id = %image.id,
            declared = %format!("{width}x{height}"),
            decoded = %format!("{decoded_width}x{decoded_height}"),
            "Declared dimensions differ from decoded image, using decoded size"
        );
    }

    let rect = PixelRect::from_region(region, decoded_width, decoded_height);
    if rect.is_empty() {
        return Err(RasterError::DegenerateRegion {
            source_id: image.id.clone(),
            rect,
        });
    }

    let format = OutputFormat::for_source_mime(&image.mime_type);
    let bytes = encode_rect(&decoded, rect, format, jpeg_quality).map_err(|source| {
        RasterError::Encode {
            source_id: image.id.clone(),
            source,
        }
    })?;

    Ok(RasterOutput {
        rect,
        format,
        bytes,
    })
}

/// Copy `rect` out of `image` and encode it in `format`.
fn encode_rect(
    image: &DynamicImage,
    rect: PixelRect,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png if image.color().has_alpha() => {
            let rgba = image.to_rgba8();
            let pixels = copy_rect(rgba.as_raw(), rgba.width(), 4, rect);
            encode_png(&pixels, rect.width, rect.height, true)
        }
        OutputFormat::Png => {
            let rgb = image.to_rgb8();
            let pixels = copy_rect(rgb.as_raw(), rgb.width(), 3, rect);
            encode_png(&pixels, rect.width, rect.height, false)
        }
        OutputFormat::Jpeg => {
            let rgb = image.to_rgb8();
            let pixels = copy_rect(rgb.as_raw(), rgb.width(), 3, rect);
            encode_jpeg(&pixels, rect.width, rect.height, jpeg_quality)
        }
    }
}

/// Copy a rectangle out of an interleaved pixel buffer, row by row.
///
/// `rect` must lie inside the `src_width`-wide buffer.
fn copy_rect(pixels: &[u8], src_width: u32, channels: usize, rect: PixelRect) -> Vec<u8> {
    let stride = src_width as usize * channels;
    let row_len = rect.width as usize * channels;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    for row in rect.y..rect.bottom() {
        let start = row as usize * stride + rect.x as usize * channels;
        output.extend_from_slice(&pixels[start..start + row_len]);
    }

    output
}
