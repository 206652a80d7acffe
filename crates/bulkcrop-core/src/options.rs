//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_JPEG_QUALITY;

/// Default top-level folder inside the archive.
pub const DEFAULT_FOLDER_NAME: &str = "cropped_images";

/// Default download name for the archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "bulk_cropped_images.zip";

/// Options for a batch export.
///
/// Every field has a default, so hosts can pass a partial object (or none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Top-level folder that holds every archive entry
    pub folder_name: String,
    /// File name the finished archive is offered under
    pub archive_name: String,
    /// JPEG quality (1-100) for non-PNG sources
    pub jpeg_quality: u8,
    /// Upper bound on worker threads. 0 uses the available parallelism,
    /// 1 processes items sequentially on the calling thread.
    pub max_workers: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            folder_name: DEFAULT_FOLDER_NAME.to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_workers: 0,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// JPEG quality clamped to the encoder's 1-100 range.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }

    /// Folder name with surrounding slashes and whitespace removed; falls back
    /// to [`DEFAULT_FOLDER_NAME`] when nothing is left.
    pub fn effective_folder_name(&self) -> &str {
        let trimmed = self.folder_name.trim().trim_matches(&['/', '\\'][..]);
        if trimmed.is_empty() {
            DEFAULT_FOLDER_NAME
        } else {
            trimmed
        }
    }

    /// Archive name with surrounding whitespace removed; falls back to
    /// [`DEFAULT_ARCHIVE_NAME`] when blank.
    pub fn effective_archive_name(&self) -> &str {
        let trimmed = self.archive_name.trim();
        if trimmed.is_empty() {
            DEFAULT_ARCHIVE_NAME
        } else {
            trimmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::new();
        assert_eq!(options.folder_name, "cropped_images");
        assert_eq!(options.archive_name, "bulk_cropped_images.zip");
        assert_eq!(options.jpeg_quality, 90);
        assert_eq!(options.max_workers, 0);
    }

    #[test]
    fn test_partial_object_fills_defaults() {
        let options: ExportOptions = serde_json::from_str(r#"{"jpegQuality":75}"#).unwrap();
        assert_eq!(options.jpeg_quality, 75);
        assert_eq!(options.folder_name, DEFAULT_FOLDER_NAME);
        assert_eq!(options.archive_name, DEFAULT_ARCHIVE_NAME);
    }

    #[test]
    fn test_quality_clamped() {
        let mut options = ExportOptions::new();
        options.jpeg_quality = 0;
        assert_eq!(options.effective_jpeg_quality(), 1);
        options.jpeg_quality = 200;
        assert_eq!(options.effective_jpeg_quality(), 100);
    }

    #[test]
    fn test_folder_name_normalized() {
        let mut options = ExportOptions::new();
        options.folder_name = "/exports/".to_string();
        assert_eq!(options.effective_folder_name(), "exports");
        options.folder_name = "  ".to_string();
        assert_eq!(options.effective_folder_name(), DEFAULT_FOLDER_NAME);
    }

    #[test]
    fn test_archive_name_normalized() {
        let mut options = ExportOptions::new();
        options.archive_name = " batch.zip ".to_string();
        assert_eq!(options.effective_archive_name(), "batch.zip");
        options.archive_name = String::new();
        assert_eq!(options.effective_archive_name(), DEFAULT_ARCHIVE_NAME);
        options.archive_name = "\t ".to_string();
        assert_eq!(options.effective_archive_name(), DEFAULT_ARCHIVE_NAME);
    }
}
