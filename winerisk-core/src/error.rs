//! Error handling

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between raw input and a risk decision.
///
/// Artifact variants are fatal at startup; the rest are per-request.
#[derive(Debug, Error)]
pub enum RiskError {
    // Artifact errors (startup)
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("Malformed artifact {path}: {detail}")]
    MalformedArtifact { path: PathBuf, detail: String },

    // Validation errors (per request)
    #[error("Missing required feature(s): {0:?}")]
    MissingFeatures(Vec<String>),

    #[error("Unexpected feature(s): {unexpected:?}. Allowed: {allowed:?}")]
    UnexpectedFeatures {
        unexpected: Vec<String>,
        allowed: &'static [&'static str],
    },

    #[error("Feature '{feature}' is not numeric: {value}")]
    NotNumeric { feature: String, value: String },

    // Scoring errors (per request)
    #[error("Inference failed: {0}")]
    Inference(String),
}
