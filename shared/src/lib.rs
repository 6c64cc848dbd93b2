use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Three-way reading of a class label. `NoLeaf` is the sentinel for the
/// background class and must never be presented as a disease finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Verdict {
    Healthy,
    Diseased,
    NoLeaf,
}

/// Camera-capture payload: a base64 data URL as produced by a canvas capture.
#[derive(Serialize, Deserialize, Clone)]
pub struct CaptureRequest {
    pub image_data: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiagnosisResponse {
    /// Raw class label, e.g. "Apple___Apple_scab".
    pub label: String,
    /// Human-readable form, e.g. "Apple - Apple Scab".
    pub display_name: String,
    pub verdict: Verdict,
    /// Percentage in [0, 100].
    pub confidence: f32,
    /// Set when confidence fell below the configured threshold; the result
    /// should be surfaced as inconclusive regardless of the verdict.
    pub low_confidence: bool,
    /// Full probability vector, index-aligned with the class table.
    pub predictions: Vec<f32>,
}
