//! Wine Quality Risk - Inference Core
//!
//! Loads the pretrained artifacts (ONNX classifier + frozen decision
//! threshold) and scores wine samples for low-technical-quality risk.
//!
//! ## Architecture
//! - `features/` - Feature schema, validation, typical-range flags
//! - `model/` - Artifact loading (ONNX session, threshold record)
//! - `evaluator` - Probability -> decision mapping

pub mod error;
pub mod evaluator;
pub mod features;
pub mod model;

// Re-export common types
pub use error::RiskError;
pub use evaluator::{evaluate, RiskDecision, RiskResult};
pub use features::{detect_risk_flags, WineSample, FEATURE_COUNT, FEATURE_LAYOUT};
pub use model::{load_global, ArtifactStore, Classifier, EngineStatus, ModelMetadata};
