//! BulkCrop Core - relative-crop batch export
//!
//! This crate applies one crop region, expressed in percent of each image's
//! own width and height, to a batch of images of any resolution and packages
//! the results into a single ZIP archive.
//!
//! # Pipeline
//!
//! 1. [`RelativeRegion::validate`] - reject bad regions before any work
//! 2. [`BatchRunner`] - per item: resolve the pixel rectangle, decode, copy,
//!    encode ([`raster::rasterize`]); failures become data
//! 3. [`Archiver`] - package successes under one folder, collision-free
//!
//! [`export_batch`] drives all three.
//!
//! # Example
//!
//! ```ignore
//! use bulkcrop_core::{export_batch, ExportOptions, RelativeRegion, SourceImage};
//!
//! let images = vec![SourceImage::new("1", "cat.png", "image/png", bytes, 1920, 1080)];
//! let report = export_batch(&RelativeRegion::default(), &images, &ExportOptions::default(), |p| {
//!     println!("{}/{}", p.completed, p.total);
//! })?;
//! std::fs::write(report.archive.file_name(), report.archive.bytes())?;
//! ```

pub mod archive;
pub mod batch;
pub mod decode;
pub mod encode;
pub mod export;
pub mod options;
pub mod raster;
pub mod region;
pub mod source;
pub mod suggest;

pub use archive::{ArchiveError, Archiver, ExportArchive};
pub use batch::{BatchProgress, BatchRunner, CropResult};
pub use encode::OutputFormat;
pub use export::{export_batch, ExportError, ExportReport, FailedItem};
pub use options::ExportOptions;
pub use raster::{rasterize, FailureKind, PixelRect, RasterError};
pub use region::{RegionError, RelativeRegion};
pub use source::SourceImage;
pub use suggest::{
    parse_suggestion, resolve_region, NoSuggester, RegionSuggester, ResponseSuggester,
    SuggestError, SUBJECT_DETECTION_PROMPT,
};
