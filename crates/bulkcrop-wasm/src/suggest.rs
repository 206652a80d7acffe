//! Subject-detection helpers.
//!
//! The host performs the detection request itself; these bindings supply the
//! prompt and validate whatever comes back.

use bulkcrop_core::{parse_suggestion, SUBJECT_DETECTION_PROMPT};
use wasm_bindgen::prelude::*;

use crate::types::region_to_js;

/// Instruction to send to the detection model along with the image.
#[wasm_bindgen]
pub fn subject_detection_prompt() -> String {
    SUBJECT_DETECTION_PROMPT.to_string()
}

/// Parse a detector's JSON answer into a validated region object.
///
/// Throws if the text is empty, malformed, or describes a region outside the
/// image.
#[wasm_bindgen]
pub fn parse_region_suggestion(text: &str) -> Result<JsValue, JsValue> {
    let region = parse_suggestion(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    region_to_js(&region)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_region_suggestion() {
        assert!(parse_region_suggestion(r#"{"x":5,"y":5,"width":50,"height":50}"#).is_ok());
        assert!(parse_region_suggestion("garbage").is_err());
    }
}
