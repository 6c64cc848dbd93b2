//! Inference pipeline: decode and preprocess an arbitrary user image, run one
//! forward pass through the preloaded classifier, and interpret the arg-max
//! class and confidence into a diagnosis.

pub mod config;
pub mod labels;
pub mod model;
pub mod preprocess;

use std::cmp::Ordering;
use std::path::Path;

use shared::DiagnosisResponse;

use crate::error::PipelineError;
use config::PipelineConfig;
use model::Model;

pub struct Pipeline {
    model: Model,
    config: PipelineConfig,
}

impl Pipeline {
    /// Loads the model artifact once; the returned pipeline is shared
    /// read-only across all requests for the process lifetime.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let model = Model::load(Path::new(&config.model_path))?;
        Ok(Self { model, config })
    }

    /// One raw image in, one diagnosis out, synchronously. Errors are local
    /// to the request and never affect the loaded model.
    pub fn diagnose(&self, image: &[u8]) -> Result<DiagnosisResponse, PipelineError> {
        let tensor = preprocess::preprocess(image, self.config.image.size, self.config.scaling)?;
        let predictions = self.model.predict(tensor)?;
        interpret(&predictions, self.config.confidence_threshold)
    }
}

/// Arg-max over the prediction vector, mapped through the fixed class table.
/// Confidence is the winning probability as a percentage, clamped to [0, 100];
/// results under `threshold` are flagged inconclusive regardless of verdict.
pub fn interpret(
    predictions: &[f32],
    threshold: f32,
) -> Result<DiagnosisResponse, PipelineError> {
    let (index, &score) = predictions
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .ok_or_else(|| PipelineError::BadOutput("empty prediction vector".into()))?;

    let label = labels::class_name(index).ok_or_else(|| {
        PipelineError::BadOutput(format!("class index {} outside the label table", index))
    })?;

    let confidence = (score * 100.0).clamp(0.0, 100.0);

    Ok(DiagnosisResponse {
        label: label.to_string(),
        display_name: labels::display_name(label),
        verdict: labels::verdict_for(label),
        confidence,
        low_confidence: confidence < threshold,
        predictions: predictions.to_vec(),
    })
}
