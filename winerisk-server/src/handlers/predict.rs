//! Risk prediction handler

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};
use winerisk_core::{detect_risk_flags, RiskResult, WineSample};

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub result: RiskResult,

    /// Inputs outside typical dataset ranges (reference-only)
    pub flags: Vec<String>,

    /// Echo of the validated input
    pub input: HashMap<String, f64>,
}

/// Score one wine sample.
///
/// The body must contain exactly the 11 schema features with numeric
/// values; validation failures come back as 400 with the specific message.
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> AppResult<Json<PredictResponse>> {
    let sample = WineSample::from_map(&body)?;
    let result = state.artifacts.score(&sample)?;

    let input = sample.named_values();
    let flags = detect_risk_flags(&input);

    tracing::debug!(
        "Scored sample: {} p={:.3} (threshold {:.3})",
        result.decision.as_str(),
        result.probability,
        result.threshold_used
    );

    Ok(Json(PredictResponse {
        result,
        flags,
        input,
    }))
}
