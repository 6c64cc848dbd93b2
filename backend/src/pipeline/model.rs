use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;

use crate::error::PipelineError;
use crate::pipeline::labels::NUM_CLASSES;

/// Loaded classifier artifact. The session is read-only after load; the mutex
/// exists only because `ort` needs `&mut` to run, which also serializes
/// inference to one request at a time.
pub struct Model {
    session: Mutex<Session>,
}

impl Model {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::MissingArtifact(path.to_path_buf()));
        }

        let _ = ort::init().with_name("leaf-diagnosis").commit();

        let session = Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(path)?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// One synchronous forward pass. The artifact's final layer is already
    /// softmax, so the output is returned as-is after a length check against
    /// the class table.
    pub fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>, PipelineError> {
        let mut session = self.session.lock().unwrap();

        let input_name = session.inputs()[0].name().to_string();
        let input_tensor = Value::from_array(input)?;

        let outputs = session.run(ort::inputs![input_name.as_str() => input_tensor])?;

        let output = outputs
            .values()
            .next()
            .ok_or_else(|| PipelineError::BadOutput("model produced no outputs".into()))?;
        let (_, data) = output.try_extract_tensor::<f32>()?;

        if data.len() != NUM_CLASSES {
            return Err(PipelineError::BadOutput(format!(
                "expected {} class scores, got {}",
                NUM_CLASSES,
                data.len()
            )));
        }

        Ok(data.to_vec())
    }
}
