//! Per-item outcomes and progress.

use serde::Serialize;

use crate::raster::{FailureKind, PixelRect, RasterError};

/// Outcome of one batch item. Exactly one exists per source image.
#[derive(Debug, Clone, PartialEq)]
pub enum CropResult {
    /// The item was cropped and encoded.
    Success {
        source_id: String,
        bytes: Vec<u8>,
        mime_type: String,
        suggested_filename: String,
        rect: PixelRect,
    },
    /// The item failed; the rest of the batch is unaffected.
    Failure {
        source_id: String,
        reason: RasterError,
    },
}

impl CropResult {
    pub fn source_id(&self) -> &str {
        match self {
            CropResult::Success { source_id, .. } | CropResult::Failure { source_id, .. } => {
                source_id
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CropResult::Success { .. })
    }

    /// Failure category, if this item failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CropResult::Success { .. } => None,
            CropResult::Failure { reason, .. } => Some(reason.kind()),
        }
    }
}

/// Progress snapshot emitted after every attempted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Items attempted so far, successful or not
    pub completed: usize,
    /// Items in the batch, fixed at start
    pub total: usize,
}

impl BatchProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    /// Completed share in `[0, 1]`; an empty batch counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
