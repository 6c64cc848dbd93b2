use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("model artifact not found at {0}")]
    MissingArtifact(PathBuf),
    #[error("model error: {0}")]
    Model(#[from] ort::Error),
    #[error("failed to decode image: {0}")]
    InvalidImage(#[from] image::ImageError),
    #[error("tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("unexpected model output: {0}")]
    BadOutput(String),
    #[error("invalid pipeline config: {0}")]
    Config(String),
}
