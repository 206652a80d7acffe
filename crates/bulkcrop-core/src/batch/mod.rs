//! Batch processing of queued crop items.
//!
//! One [`RelativeRegion`](crate::region::RelativeRegion) is applied to every
//! item. Each item is cropped independently and turned into a
//! [`CropResult`]; a failing item never aborts the batch.

mod naming;
mod result;
mod runner;

pub use naming::{file_stem, output_filename, with_sequence, CROPPED_SUFFIX};
pub use result::{BatchProgress, CropResult};
pub use runner::{crop_item, BatchRunner};
