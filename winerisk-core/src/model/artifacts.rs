//! Artifact Store - load-once model + threshold
//!
//! Both artifacts live at fixed paths under the models directory and are
//! read exactly once per process. A missing artifact is fatal to startup;
//! callers surface the error and halt instead of retrying.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{Classifier, OnnxClassifier};
use super::threshold::ThresholdRecord;
use crate::error::RiskError;
use crate::evaluator::{self, RiskResult};
use crate::features::{LayoutInfo, WineSample};

/// Serialized classifier, relative to the models directory
pub const CLASSIFIER_FILE: &str = "wine_risk_model.onnx";

/// Threshold record, relative to the models directory
pub const THRESHOLDS_FILE: &str = "risk_thresholds.json";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata captured at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub checksum_sha256: String,
    pub feature_version: u8,
    pub feature_count: usize,
    pub layout_hash: u32,
    pub threshold: f64,
    pub loaded_at: DateTime<Utc>,
}

/// Engine status for the model-info surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_path: String,
    pub checksum_sha256: String,
    pub threshold: f64,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: DateTime<Utc>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// ARTIFACT STORE
// ============================================================================

/// The loaded classifier and frozen threshold, shared read-only by all
/// evaluation calls for the process lifetime.
pub struct ArtifactStore {
    classifier: Arc<dyn Classifier>,
    threshold: f64,
    metadata: ModelMetadata,
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

static ARTIFACTS: OnceCell<Arc<ArtifactStore>> = OnceCell::new();

/// Load-once accessor: at most one disk read/deserialization per process,
/// regardless of concurrent first access. Subsequent calls return the
/// cached store.
pub fn load_global(models_dir: &Path) -> Result<Arc<ArtifactStore>, RiskError> {
    ARTIFACTS
        .get_or_try_init(|| ArtifactStore::load(models_dir).map(Arc::new))
        .cloned()
}

impl ArtifactStore {
    /// Read and deserialize both artifacts from the models directory.
    pub fn load(models_dir: &Path) -> Result<Self, RiskError> {
        let model_path = models_dir.join(CLASSIFIER_FILE);
        let thresholds_path = models_dir.join(THRESHOLDS_FILE);

        let classifier = OnnxClassifier::load(&model_path)?;
        let checksum = file_checksum(&model_path)?;
        log::info!("Classifier checksum (sha256): {checksum}");

        let record = ThresholdRecord::load(&thresholds_path)?;
        let threshold = record.frozen_threshold();
        log::info!("Frozen threshold: {threshold}");

        let layout = LayoutInfo::current();
        log::info!(
            "Feature layout: v{} hash {:08x} ({} features)",
            layout.version,
            layout.hash,
            layout.feature_count
        );

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            checksum_sha256: checksum,
            feature_version: layout.version,
            feature_count: layout.feature_count,
            layout_hash: layout.hash,
            threshold,
            loaded_at: Utc::now(),
        };

        Ok(Self {
            classifier: Arc::new(classifier),
            threshold,
            metadata,
        })
    }

    /// Assemble a store from already-built parts. Embedders and tests use
    /// this to supply their own classifier.
    pub fn from_parts(classifier: Arc<dyn Classifier>, threshold: f64) -> Self {
        let layout = LayoutInfo::current();
        let metadata = ModelMetadata {
            model_path: "<memory>".to_string(),
            checksum_sha256: String::new(),
            feature_version: layout.version,
            feature_count: layout.feature_count,
            layout_hash: layout.hash,
            threshold,
            loaded_at: Utc::now(),
        };

        Self {
            classifier,
            threshold,
            metadata,
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Score one validated sample against the frozen threshold.
    pub fn score(&self, sample: &WineSample) -> Result<RiskResult, RiskError> {
        evaluator::evaluate(self.classifier.as_ref(), sample, self.threshold)
    }

    pub fn status(&self) -> EngineStatus {
        let (inference_count, avg_latency_ms) = evaluator::inference_stats();

        EngineStatus {
            model_loaded: true,
            model_path: self.metadata.model_path.clone(),
            checksum_sha256: self.metadata.checksum_sha256.clone(),
            threshold: self.threshold,
            feature_version: self.metadata.feature_version,
            layout_hash: self.metadata.layout_hash,
            loaded_at: self.metadata.loaded_at,
            inference_count,
            avg_latency_ms,
        }
    }
}

fn file_checksum(path: &Path) -> Result<String, RiskError> {
    let bytes = std::fs::read(path).map_err(|e| RiskError::MalformedArtifact {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::RiskDecision;

    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn predict_proba(&self, _sample: &WineSample) -> Result<f64, RiskError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_load_empty_dir_fails_on_classifier() {
        let dir = tempfile::tempdir().unwrap();

        let err = ArtifactStore::load(dir.path()).unwrap_err();
        match err {
            RiskError::ArtifactNotFound(path) => {
                assert_eq!(path, dir.path().join(CLASSIFIER_FILE));
            }
            other => panic!("expected ArtifactNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_parts_scores_end_to_end() {
        let store = ArtifactStore::from_parts(Arc::new(FixedClassifier(0.35)), 0.288);
        let sample = WineSample::from_values([
            7.4, 0.70, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4,
        ]);

        let result = store.score(&sample).unwrap();
        assert_eq!(result.probability, 0.35);
        assert_eq!(result.decision, RiskDecision::HighRisk);
        assert_eq!(result.threshold_used, 0.288);
    }

    #[test]
    fn test_status_reflects_store() {
        let store = ArtifactStore::from_parts(Arc::new(FixedClassifier(0.1)), 0.288);
        let status = store.status();

        assert!(status.model_loaded);
        assert_eq!(status.threshold, 0.288);
        assert_eq!(status.feature_version, crate::features::FEATURE_VERSION);
        assert_eq!(status.layout_hash, crate::features::layout_hash());
    }
}
