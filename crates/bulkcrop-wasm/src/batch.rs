//! Batch export WASM bindings.
//!
//! A `CropBatch` collects the images the user dropped, then exports them in
//! one call. Images are copied into WASM memory when added.
//!
//! # Example
//!
//! ```typescript
//! import { CropBatch } from '@bulkcrop/wasm';
//!
//! const batch = new CropBatch();
//! for (const file of files) {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   batch.add(file.id, file.name, file.type, bytes, file.width, file.height);
//! }
//!
//! const result = batch.run_export(
//!   { x: 10, y: 10, width: 80, height: 80 },
//!   (completed, total) => setStatus({ current: completed, total }),
//!   { jpegQuality: 90 },
//! );
//! saveAs(new Blob([result.bytes]), result.file_name);
//! ```

use bulkcrop_core::{
    export_batch, resolve_region, BatchProgress, ExportError, ExportOptions, ExportReport,
    RelativeRegion, ResponseSuggester, SourceImage,
};
use std::convert::Infallible;
use wasm_bindgen::prelude::*;

use crate::types::{options_from_js, region_from_js, region_to_js};

/// Images queued for a batch export.
#[wasm_bindgen]
#[derive(Default)]
pub struct CropBatch {
    images: Vec<SourceImage>,
}

#[wasm_bindgen]
impl CropBatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CropBatch {
        CropBatch::default()
    }

    /// Queue an image.
    ///
    /// # Arguments
    /// * `id` - Stable identifier, reported back for failures
    /// * `name` - Original file name, used for the output name
    /// * `mime_type` - Declared type; `image/png` stays PNG, others become JPEG
    /// * `bytes` - Encoded file content
    /// * `width`/`height` - Natural size; pass `undefined` if not yet known
    pub fn add(
        &mut self,
        id: String,
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
        width: Option<u32>,
        height: Option<u32>,
    ) {
        self.images.push(SourceImage {
            id,
            name,
            mime_type,
            bytes,
            width,
            height,
        });
    }

    /// Remove a queued image by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        self.images.len() != before
    }

    /// Number of queued images
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.images.len()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Crop every queued image and build the archive.
    ///
    /// `on_progress(completed, total)` is called synchronously after each
    /// image. Throws if the region is invalid or the archive cannot be
    /// written; individual image failures are listed in `failures`.
    pub fn run_export(
        &self,
        region: JsValue,
        on_progress: &js_sys::Function,
        options: JsValue,
    ) -> Result<ExportResult, JsValue> {
        let region = region_from_js(region)?;
        let options = options_from_js(options)?;

        let report = self
            .export_with(&region, &options, |progress| {
                let completed = JsValue::from_f64(progress.completed as f64);
                let total = JsValue::from_f64(progress.total as f64);
                if let Err(e) = on_progress.call2(&JsValue::NULL, &completed, &total) {
                    web_sys::console::warn_2(&JsValue::from_str("Progress callback threw:"), &e);
                }
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        for failure in &report.failures {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Failed to crop {}: {}",
                failure.name, failure.reason
            )));
        }

        Ok(ExportResult { report })
    }

    /// Pick the region for the image at `index` from a subject-detection
    /// response, falling back to `fallback` when the response is missing,
    /// malformed, or describes an invalid region.
    pub fn suggest_region(
        &self,
        index: usize,
        response: Option<String>,
        fallback: JsValue,
    ) -> Result<JsValue, JsValue> {
        let fallback = region_from_js(fallback)?;
        region_to_js(&self.suggested_or(index, response, fallback))
    }
}

impl CropBatch {
    pub(crate) fn push(&mut self, image: SourceImage) {
        self.images.push(image);
    }

    pub(crate) fn export_with<F>(
        &self,
        region: &RelativeRegion,
        options: &ExportOptions,
        on_progress: F,
    ) -> Result<ExportReport, ExportError>
    where
        F: FnMut(BatchProgress),
    {
        export_batch(region, &self.images, options, on_progress)
    }

    pub(crate) fn suggested_or(
        &self,
        index: usize,
        response: Option<String>,
        fallback: RelativeRegion,
    ) -> RelativeRegion {
        let Some(image) = self.images.get(index) else {
            return fallback;
        };
        let suggester =
            ResponseSuggester::new(move |_: &SourceImage| Ok::<_, Infallible>(response.clone()));
        resolve_region(&suggester, image, fallback)
    }
}

/// Outcome of `CropBatch.run_export`.
#[wasm_bindgen]
pub struct ExportResult {
    report: ExportReport,
}

#[wasm_bindgen]
impl ExportResult {
    /// ZIP archive bytes as a `Uint8Array`
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.report.archive.bytes().to_vec()
    }

    /// Download name for the archive
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.report.archive.file_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.report.total
    }

    #[wasm_bindgen(getter)]
    pub fn succeeded(&self) -> usize {
        self.report.succeeded
    }

    /// Archive entry paths in insertion order
    #[wasm_bindgen(getter)]
    pub fn entries(&self) -> Vec<String> {
        self.report.archive.entries().to_vec()
    }

    /// Failed items as `{ id, name, kind, reason }[]`
    pub fn failures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report.failures)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulkcrop_core::FailureKind;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 3) as usize];
        bulkcrop_core::encode::encode_png(&pixels, width, height, false).unwrap()
    }

    fn batch() -> CropBatch {
        let mut batch = CropBatch::new();
        batch.add(
            "1".to_string(),
            "one.png".to_string(),
            "image/png".to_string(),
            png_bytes(50, 50),
            Some(50),
            Some(50),
        );
        batch.push(SourceImage::without_dimensions(
            "2",
            "two.png",
            "image/png",
            png_bytes(10, 10),
        ));
        batch
    }

    #[test]
    fn test_add_remove_clear() {
        let mut batch = batch();
        assert_eq!(batch.length(), 2);
        assert!(batch.remove("2"));
        assert!(!batch.remove("2"));
        assert_eq!(batch.length(), 1);
        batch.clear();
        assert_eq!(batch.length(), 0);
    }

    #[test]
    fn test_export_with_reports_failures() {
        let mut options = ExportOptions::default();
        options.max_workers = 1;
        let mut calls = Vec::new();

        let report = batch()
            .export_with(&RelativeRegion::default(), &options, |p| calls.push(p.completed))
            .unwrap();

        assert_eq!(calls, vec![1, 2]);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failures[0].kind, FailureKind::DimensionUnknown);

        let result = ExportResult { report };
        assert_eq!(result.file_name(), "bulk_cropped_images.zip");
        assert_eq!(result.entries(), vec!["cropped_images/one_cropped.png".to_string()]);
        assert_eq!(&result.bytes()[0..2], b"PK");
    }

    #[test]
    fn test_suggested_or() {
        let batch = batch();
        let fallback = RelativeRegion::default();

        let suggested = batch.suggested_or(
            0,
            Some(r#"{"x":0,"y":0,"width":50,"height":50}"#.to_string()),
            fallback,
        );
        assert_eq!(suggested, RelativeRegion::new(0.0, 0.0, 50.0, 50.0));

        assert_eq!(batch.suggested_or(0, None, fallback), fallback);
        assert_eq!(
            batch.suggested_or(0, Some("{}".to_string()), fallback),
            fallback
        );
        // Out of range index
        assert_eq!(
            batch.suggested_or(9, Some(r#"{"x":0,"y":0,"width":50,"height":50}"#.to_string()), fallback),
            fallback
        );
    }
}
