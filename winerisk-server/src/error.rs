//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use winerisk_core::RiskError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Per-request input problems
    #[error("{0}")]
    ValidationError(String),

    // Scoring failed; user gets a generic message, detail stays diagnostic
    #[error("Prediction failed. Please check inputs.")]
    PredictionError(String),

    // Generic errors
    #[error("Internal server error")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, detail) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::PredictionError(detail) => {
                tracing::error!("Prediction failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Prediction failed. Please check inputs.".to_string(),
                    Some(detail),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "detail": detail,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<RiskError> for AppError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::MissingFeatures(_)
            | RiskError::UnexpectedFeatures { .. }
            | RiskError::NotNumeric { .. } => AppError::ValidationError(err.to_string()),
            RiskError::Inference(_) => AppError::PredictionError(err.to_string()),
            RiskError::ArtifactNotFound(_) | RiskError::MalformedArtifact { .. } => {
                AppError::InternalError(err.to_string())
            }
        }
    }
}
