//! Model Module - Artifact loading & classifier
//!
//! Separates artifact handling from scoring so the classifier backend
//! stays swappable.

pub mod artifacts;
pub mod classifier;
pub mod threshold;

// Re-export common types
pub use artifacts::{load_global, ArtifactStore, EngineStatus, ModelMetadata};
pub use classifier::{Classifier, OnnxClassifier};
pub use threshold::{ThresholdRecord, DEFAULT_FROZEN_THRESHOLD, FROZEN_THRESHOLD_KEY};
