//! BulkCrop WASM - WebAssembly bindings for BulkCrop
//!
//! Exposes the `bulkcrop-core` batch export to JavaScript/TypeScript. Work
//! runs synchronously on the calling thread; hosts that need a responsive UI
//! run it inside a Web Worker.
//!
//! # Module Structure
//!
//! - `batch` - `CropBatch` queue and `ExportResult`
//! - `types` - Region and option conversions, `default_region`, `validate_region`
//! - `suggest` - Subject-detection prompt and response parsing
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropBatch, default_region } from '@bulkcrop/wasm';
//!
//! await init();
//!
//! const batch = new CropBatch();
//! batch.add(id, file.name, file.type, bytes, width, height);
//! const result = batch.run_export(default_region(), (done, total) => {}, undefined);
//! console.log(`${result.succeeded}/${result.total} cropped`);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod suggest;
mod types;

pub use batch::{CropBatch, ExportResult};
pub use suggest::{parse_region_suggestion, subject_detection_prompt};
pub use types::{default_region, validate_region};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
