use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Inference contract for the loaded artifact, read once at startup from
/// `config/pipeline.yaml`. The scaling policy in particular must match what
/// the model was trained on; a mismatch produces plausible-looking but wrong
/// predictions, so it is configuration, never guessed from the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub model_path: String,
    pub image: ImageConfig,
    pub scaling: PixelScaling,
    /// Percentage; results below this are flagged as inconclusive.
    pub confidence_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub size: u32,
    pub channels: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelScaling {
    /// Pixels stay in [0, 255]; the artifact rescales internally.
    Raw,
    /// Divide by 255 for artifacts trained on [0, 1] inputs.
    Unit,
}

impl PixelScaling {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelScaling::Raw => "raw",
            PixelScaling::Unit => "unit",
        }
    }
}

impl PipelineConfig {
    pub fn load() -> Result<Self, PipelineError> {
        let config_path = match std::env::var("PIPELINE_CONFIG") {
            Ok(path) => path,
            Err(_) => {
                let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
                    PipelineError::Config(
                        "PIPELINE_CONFIG not set and no manifest directory to fall back to".into(),
                    )
                })?;
                format!("{}/../config/pipeline.yaml", manifest_dir)
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| PipelineError::Config(format!("failed to read {}: {}", config_path, e)))?;
        let config: PipelineConfig = serde_yaml::from_str(&config_str)
            .map_err(|e| PipelineError::Config(format!("failed to parse {}: {}", config_path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.image.size == 0 {
            return Err(PipelineError::Config("image size must be non-zero".into()));
        }
        if self.image.channels != 3 {
            return Err(PipelineError::Config(format!(
                "expected 3 image channels, got {}",
                self.image.channels
            )));
        }
        if !(0.0..=100.0).contains(&self.confidence_threshold) {
            return Err(PipelineError::Config(format!(
                "confidence threshold {} outside [0, 100]",
                self.confidence_threshold
            )));
        }
        Ok(())
    }
}
