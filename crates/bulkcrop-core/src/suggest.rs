//! Optional crop suggestions from a subject-detection service.
//!
//! A [`RegionSuggester`] proposes a region for one image. Its output is an
//! ordinary [`RelativeRegion`] and goes through the same validation as a
//! manual one. A missing or failing suggester never blocks an export:
//! [`resolve_region`] always falls back to the manual region.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::region::{RegionError, RelativeRegion};
use crate::source::SourceImage;

/// Instruction sent to the subject-detection model along with the image.
///
/// The model is expected to answer with a JSON object holding `x`, `y`,
/// `width` and `height` as percentages (0-100) of the image dimensions.
pub const SUBJECT_DETECTION_PROMPT: &str = "Detect the main subject of this image. \
Return a bounding box that encompasses the most important visual element. \
The values should be percentages (0-100) relative to the image dimensions.";

/// Errors from interpreting a suggestion response.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The service returned nothing.
    #[error("Suggestion response is empty")]
    Empty,

    /// The response is not the expected JSON object.
    #[error("Malformed suggestion response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The proposed region fails validation.
    #[error("Suggested region rejected: {0}")]
    Invalid(#[from] RegionError),
}

/// Capability that may propose a crop region for an image.
pub trait RegionSuggester {
    /// Propose a region, or `None` if no subject was found or the service is
    /// unavailable.
    fn suggest(&self, image: &SourceImage) -> Option<RelativeRegion>;
}

/// Suggester used when no detection service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggester;

impl RegionSuggester for NoSuggester {
    fn suggest(&self, _image: &SourceImage) -> Option<RelativeRegion> {
        None
    }
}

/// Suggester backed by a transport that returns the detector's raw JSON.
///
/// The transport owns the actual service call. Its output is parsed with
/// [`parse_suggestion`]; transport, parse and validation failures are logged
/// and reported as "no suggestion".
pub struct ResponseSuggester<F> {
    transport: F,
}

impl<F> ResponseSuggester<F> {
    /// Wrap a transport. It returns `Ok(None)` when the detector answers but
    /// finds no subject.
    pub fn new(transport: F) -> Self {
        Self { transport }
    }
}

impl<F, E> RegionSuggester for ResponseSuggester<F>
where
    F: Fn(&SourceImage) -> Result<Option<String>, E>,
    E: std::fmt::Display,
{
    fn suggest(&self, image: &SourceImage) -> Option<RelativeRegion> {
        let text = match (self.transport)(image) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(source_id = %image.id, "Detector found no subject");
                return None;
            }
            Err(e) => {
                warn!(source_id = %image.id, "Subject detection failed: {}", e);
                return None;
            }
        };

        match parse_suggestion(&text) {
            Ok(region) => Some(region),
            Err(e) => {
                warn!(source_id = %image.id, "Ignoring suggestion: {}", e);
                None
            }
        }
    }
}

/// Wire shape of a detector response; extra fields are ignored.
#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Parse and validate a detector response such as
/// `{"x": 12, "y": 8, "width": 60, "height": 75}`.
pub fn parse_suggestion(text: &str) -> Result<RelativeRegion, SuggestError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SuggestError::Empty);
    }

    let response: SuggestionResponse = serde_json::from_str(text)?;
    let region = RelativeRegion::new(response.x, response.y, response.width, response.height);
    region.validate()?;
    Ok(region)
}

/// The suggester's region for `image` if it offers a valid one, else `fallback`.
pub fn resolve_region<S>(suggester: &S, image: &SourceImage, fallback: RelativeRegion) -> RelativeRegion
where
    S: RegionSuggester + ?Sized,
{
    suggester
        .suggest(image)
        .filter(|region| region.validate().is_ok())
        .unwrap_or(fallback)
}
