//! Model status handler

use axum::{extract::State, Json};
use winerisk_core::EngineStatus;

use crate::AppState;

/// Loaded-model status: artifact path, checksum, threshold, layout and
/// inference stats.
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.artifacts.status())
}
