//! Batch input items.

use serde::{Deserialize, Serialize};

/// One image queued for cropping.
///
/// Owned by the caller; the pipeline only borrows it. Dimensions are the
/// natural (orientation-corrected) size reported by ingestion and must be
/// known before the item can be rasterized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImage {
    /// Stable identifier assigned by ingestion
    pub id: String,
    /// Human-readable file name, e.g. `holiday.jpg`
    pub name: String,
    /// Declared MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Encoded file content
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Pixel width, if ingestion resolved it
    pub width: Option<u32>,
    /// Pixel height, if ingestion resolved it
    pub height: Option<u32>,
}

impl SourceImage {
    /// Create a source with known pixel dimensions.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Create a source whose dimensions have not been resolved yet.
    pub fn without_dimensions(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
            width: None,
            height: None,
        }
    }

    /// Both dimensions, when known and non-zero.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_known() {
        let src = SourceImage::new("a", "a.png", "image/png", vec![], 640, 480);
        assert_eq!(src.dimensions(), Some((640, 480)));
    }

    #[test]
    fn test_dimensions_missing_or_zero() {
        let src = SourceImage::without_dimensions("a", "a.png", "image/png", vec![]);
        assert_eq!(src.dimensions(), None);

        let mut src = SourceImage::new("b", "b.png", "image/png", vec![], 640, 480);
        src.height = None;
        assert_eq!(src.dimensions(), None);

        let src = SourceImage::new("c", "c.png", "image/png", vec![], 0, 480);
        assert_eq!(src.dimensions(), None);
    }
}
