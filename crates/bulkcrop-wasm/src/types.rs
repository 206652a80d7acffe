//! Conversions between JavaScript values and core types.
//!
//! Regions and options cross the boundary as plain objects and are
//! converted with `serde-wasm-bindgen`:
//!
//! ```typescript
//! const region = { x: 10, y: 10, width: 80, height: 80 };
//! const options = { folderName: "cropped_images", jpegQuality: 90 };
//! ```

use bulkcrop_core::{ExportOptions, RelativeRegion};
use wasm_bindgen::prelude::*;

/// Convert a `{ x, y, width, height }` object into a region.
///
/// The region is not validated here; export and `validate_region` do that.
pub(crate) fn region_from_js(value: JsValue) -> Result<RelativeRegion, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid region object: {}", e)))
}

pub(crate) fn region_to_js(region: &RelativeRegion) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(region).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert an options object into `ExportOptions`.
///
/// `undefined` and `null` mean "all defaults"; missing fields take their
/// defaults as well.
pub(crate) fn options_from_js(value: JsValue) -> Result<ExportOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ExportOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid export options: {}", e)))
}

/// The editor's starting region, `{ x: 10, y: 10, width: 80, height: 80 }`.
#[wasm_bindgen]
pub fn default_region() -> Result<JsValue, JsValue> {
    region_to_js(&RelativeRegion::default())
}

/// Validate a region object. Throws with a description of the first
/// violated constraint.
#[wasm_bindgen]
pub fn validate_region(region: JsValue) -> Result<(), JsValue> {
    region_from_js(region)?
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`. The conversions themselves are covered by the
/// serde tests in `bulkcrop_core`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_default_region_round_trip() {
        let value = default_region().unwrap();
        let region = region_from_js(value).unwrap();
        assert_eq!(region, RelativeRegion::default());
    }

    #[wasm_bindgen_test]
    fn test_validate_region_rejects_overflow() {
        let value = region_to_js(&RelativeRegion::new(50.0, 0.0, 60.0, 10.0)).unwrap();
        assert!(validate_region(value).is_err());
    }

    #[wasm_bindgen_test]
    fn test_options_default_when_undefined() {
        let options = options_from_js(JsValue::UNDEFINED).unwrap();
        assert_eq!(options, ExportOptions::default());
    }

    #[wasm_bindgen_test]
    fn test_region_from_non_object_fails() {
        assert!(region_from_js(JsValue::from_str("nope")).is_err());
    }
}
