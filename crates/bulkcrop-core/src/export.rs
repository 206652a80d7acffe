//! Batch export entry point.
//!
//! [`export_batch`] validates the region, runs every item through the
//! [`BatchRunner`], and packages the successes with the [`Archiver`]. Only an
//! invalid region or a container failure is an error; per-item failures are
//! reported in the [`ExportReport`].

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::archive::{ArchiveError, Archiver, ExportArchive};
use crate::batch::{BatchProgress, BatchRunner, CropResult};
use crate::options::ExportOptions;
use crate::raster::FailureKind;
use crate::region::{RegionError, RelativeRegion};
use crate::source::SourceImage;

/// Batch-fatal export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The region failed validation; no image was touched.
    #[error(transparent)]
    InvalidRegion(#[from] RegionError),

    /// Every item was attempted but the container could not be finalized.
    #[error("Archive finalization failed: {0}")]
    ArchiveFinalize(#[from] ArchiveError),
}

/// One failed item, in terms a UI can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedItem {
    pub id: String,
    pub name: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Finalized archive of every successful item
    pub archive: ExportArchive,
    /// Items submitted
    pub total: usize,
    /// Items cropped successfully
    pub succeeded: usize,
    /// Failed items in input order
    pub failures: Vec<FailedItem>,
}

impl ExportReport {
    /// True if no item could be cropped. The archive is still valid.
    pub fn all_failed(&self) -> bool {
        self.succeeded == 0 && self.total > 0
    }
}

/// Crop every image to `region` and package the results.
///
/// # Arguments
///
/// * `region` - Region applied to every image; validated before any work
/// * `images` - Ordered batch; borrowed, never modified
/// * `options` - Archive naming, JPEG quality and worker bound
/// * `on_progress` - Called once per item, in order of completion count
///
/// # Errors
///
/// `ExportError::InvalidRegion` before any processing, or
/// `ExportError::ArchiveFinalize` after every item has been attempted.
pub fn export_batch<F>(
    region: &RelativeRegion,
    images: &[SourceImage],
    options: &ExportOptions,
    on_progress: F,
) -> Result<ExportReport, ExportError>
where
    F: FnMut(BatchProgress),
{
    region.validate()?;

    let results = BatchRunner::from_options(options).run(region, images, on_progress);
    let failures = summarize_failures(images, &results);

    let archive = Archiver::new(
        options.effective_folder_name(),
        options.effective_archive_name(),
    )
    .build(&results)?;

    let report = ExportReport {
        total: images.len(),
        succeeded: results.len() - failures.len(),
        failures,
        archive,
    };

    info!(
        total = report.total,
        succeeded = report.succeeded,
        entries = report.archive.entry_count(),
        size = report.archive.bytes().len(),
        "Export archive finalized"
    );

    Ok(report)
}

fn summarize_failures(images: &[SourceImage], results: &[CropResult]) -> Vec<FailedItem> {
    images
        .iter()
        .zip(results)
        .filter_map(|(image, result)| match result {
            CropResult::Failure { reason, .. } => Some(FailedItem {
                id: image.id.clone(),
                name: image.name.clone(),
                kind: reason.kind(),
                reason: reason.to_string(),
            }),
            CropResult::Success { .. } => None,
        })
        .collect()
}
