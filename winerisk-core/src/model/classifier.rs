//! Classifier - ONNX Runtime Integration
//!
//! Runs the pretrained binary classifier natively. No Python runtime,
//! prediction in microseconds.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::RiskError;
use crate::features::{WineSample, FEATURE_COUNT};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Probability-of-class-1 scorer over an ordered wine sample.
///
/// The production impl wraps an ONNX session; tests substitute fixed
/// outputs.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, sample: &WineSample) -> Result<f64, RiskError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX-backed binary classifier.
pub struct OnnxClassifier {
    // ort sessions run with &mut, so exclusive access per inference
    session: Mutex<Session>,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier").finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load the serialized classifier from file.
    pub fn load(model_path: &Path) -> Result<Self, RiskError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(RiskError::ArtifactNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| RiskError::Inference(format!("Failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| RiskError::Inference(format!("Failed to set optimization: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| RiskError::MalformedArtifact {
                path: model_path.to_path_buf(),
                detail: e.to_string(),
            })?;

        log::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, sample: &WineSample) -> Result<f64, RiskError> {
        // Single-row input in canonical feature order
        let row: Vec<f32> = sample.as_array().iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row)
            .map_err(|e| RiskError::Inference(format!("Array error: {e}")))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| RiskError::Inference("No output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| RiskError::Inference(format!("Tensor error: {e}")))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| RiskError::Inference(format!("Inference failed: {e}")))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| RiskError::Inference("No output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| RiskError::Inference(format!("Extract error: {e}")))?;

        let data = output_tensor.1;

        // Binary head: either [p1] or [p0, p1]; class 1 is the last column
        let p = data
            .last()
            .copied()
            .ok_or_else(|| RiskError::Inference("Empty output tensor".to_string()))?;

        Ok((p as f64).clamp(0.0, 1.0))
    }
}
