//! Batch runner: applies one region to every queued item.

use tracing::{debug, info, warn};

use super::naming::output_filename;
use super::{BatchProgress, CropResult};
use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::options::ExportOptions;
use crate::raster::rasterize;
use crate::region::RelativeRegion;
use crate::source::SourceImage;

/// Runs a relative crop over an ordered list of source images.
///
/// Per-item failures are recorded as [`CropResult::Failure`] and never stop
/// the batch. Results come back in input order and progress is reported
/// once per item on the calling thread, whether or not workers are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRunner {
    jpeg_quality: u8,
    max_workers: usize,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY, 0)
    }
}

impl BatchRunner {
    /// Create a runner.
    ///
    /// `max_workers` of 0 uses the available parallelism; 1 runs every item on
    /// the calling thread. Without the `parallel` feature the runner is always
    /// sequential.
    pub fn new(jpeg_quality: u8, max_workers: usize) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
            max_workers,
        }
    }

    pub fn from_options(options: &ExportOptions) -> Self {
        Self::new(options.effective_jpeg_quality(), options.max_workers)
    }

    /// Crop every image in `images` to `region`.
    ///
    /// `on_progress` is called exactly `images.len()` times with strictly
    /// increasing `completed` values, the last one equal to the total.
    ///
    /// The region is assumed to be validated already; see
    /// [`RelativeRegion::validate`].
    pub fn run<F>(
        &self,
        region: &RelativeRegion,
        images: &[SourceImage],
        mut on_progress: F,
    ) -> Vec<CropResult>
    where
        F: FnMut(BatchProgress),
    {
        let total = images.len();
        let workers = self.worker_count(total);
        info!(
            total,
            workers,
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "Starting batch crop"
        );

        let results = if workers > 1 {
            self.run_parallel(region, images, workers, &mut on_progress)
        } else {
            self.run_sequential(region, images, &mut on_progress)
        };

        let failed = results.iter().filter(|r| !r.is_success()).count();
        if failed > 0 {
            warn!(
                "Batch crop completed with {} failed items out of {}",
                failed, total
            );
        } else {
            info!("Batch crop completed successfully: {} items", total);
        }

        results
    }

    fn run_sequential<F>(
        &self,
        region: &RelativeRegion,
        images: &[SourceImage],
        on_progress: &mut F,
    ) -> Vec<CropResult>
    where
        F: FnMut(BatchProgress),
    {
        let total = images.len();
        let mut results = Vec::with_capacity(total);

        for (index, image) in images.iter().enumerate() {
            let result = crop_item(region, image, self.jpeg_quality);
            log_outcome(index, image, &result);
            results.push(result);
            on_progress(BatchProgress::new(index + 1, total));
        }

        results
    }

    /// Crop on a bounded rayon pool.
    ///
    /// Workers send `(index, result)` pairs over a channel; this thread drains
    /// it, so progress is emitted in receive order with a monotonic count and
    /// results are slotted back into input order.
    #[cfg(feature = "parallel")]
    fn run_parallel<F>(
        &self,
        region: &RelativeRegion,
        images: &[SourceImage],
        workers: usize,
        on_progress: &mut F,
    ) -> Vec<CropResult>
    where
        F: FnMut(BatchProgress),
    {
        use rayon::prelude::*;
        use std::sync::mpsc;

        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Failed to build worker pool, falling back to sequential: {}", e);
                return self.run_sequential(region, images, on_progress);
            }
        };

        let total = images.len();
        let quality = self.jpeg_quality;
        let mut slots: Vec<Option<CropResult>> = (0..total).map(|_| None).collect();
        let (tx, rx) = mpsc::channel();

        std::thread::scope(|scope| {
            scope.spawn(move || {
                pool.install(|| {
                    images
                        .par_iter()
                        .enumerate()
                        .for_each_with(tx, |tx, (index, image)| {
                            // The receiver only goes away if this thread's
                            // scope is unwinding.
                            let _ = tx.send((index, crop_item(region, image, quality)));
                        });
                });
            });

            for (received, (index, result)) in rx.iter().enumerate() {
                log_outcome(index, &images[index], &result);
                slots[index] = Some(result);
                on_progress(BatchProgress::new(received + 1, total));
            }
        });

        let results: Vec<CropResult> = slots.into_iter().flatten().collect();
        debug_assert_eq!(results.len(), total);
        results
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<F>(
        &self,
        region: &RelativeRegion,
        images: &[SourceImage],
        _workers: usize,
        on_progress: &mut F,
    ) -> Vec<CropResult>
    where
        F: FnMut(BatchProgress),
    {
        self.run_sequential(region, images, on_progress)
    }

    fn worker_count(&self, total: usize) -> usize {
        if !cfg!(feature = "parallel") {
            return 1;
        }
        let limit = match self.max_workers {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        };
        limit.min(total).max(1)
    }
}

/// Crop a single item into its [`CropResult`].
pub fn crop_item(region: &RelativeRegion, image: &SourceImage, jpeg_quality: u8) -> CropResult {
    match rasterize(region, image, jpeg_quality) {
        Ok(output) => CropResult::Success {
            source_id: image.id.clone(),
            suggested_filename: output_filename(&image.name, output.format),
            mime_type: output.format.mime_type().to_string(),
            bytes: output.bytes,
            rect: output.rect,
        },
        Err(reason) => CropResult::Failure {
            source_id: image.id.clone(),
            reason,
        },
    }
}

fn log_outcome(index: usize, image: &SourceImage, result: &CropResult) {
    match result {
        CropResult::Success {
            rect,
            suggested_filename,
            bytes,
            ..
        } => debug!(
            index,
            source_id = %image.id,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            output = %suggested_filename,
            size = bytes.len(),
            "Cropped item"
        ),
        CropResult::Failure { reason, .. } => warn!(
            index,
            source_id = %image.id,
            name = %image.name,
            "Failed to crop item: {}",
            reason
        ),
    }
}
