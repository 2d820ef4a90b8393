//! Risk Evaluator - probability to decision
//!
//! Pure request/response: one classifier call, one threshold compare.
//! The threshold was frozen at model-packaging time and is never
//! recomputed here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::features::WineSample;
use crate::model::Classifier;

// ============================================================================
// STATE
// ============================================================================

/// Latency stats (microseconds summed across all inferences)
static LATENCY_SUM: AtomicU64 = AtomicU64::new(0);
static INFERENCE_COUNT: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// DATA STRUCTURES
// ============================================================================

pub const HIGH_RISK_INTERPRETATION: &str =
    "Flag for preventive quality review before market release.";
pub const LOW_RISK_INTERPRETATION: &str =
    "No preventive flag based on current chemical profile.";

/// Binary decision against the frozen threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskDecision {
    #[serde(rename = "HIGH RISK")]
    HighRisk,
    #[serde(rename = "LOW RISK")]
    LowRisk,
}

impl RiskDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskDecision::HighRisk => "HIGH RISK",
            RiskDecision::LowRisk => "LOW RISK",
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            RiskDecision::HighRisk => HIGH_RISK_INTERPRETATION,
            RiskDecision::LowRisk => LOW_RISK_INTERPRETATION,
        }
    }
}

/// Evaluation output, constructed fresh per call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResult {
    #[serde(rename = "risk_probability")]
    pub probability: f64,
    #[serde(rename = "risk_decision")]
    pub decision: RiskDecision,
    pub threshold_used: f64,
    pub interpretation: String,
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Score a validated sample against the frozen threshold.
///
/// A probability exactly equal to the threshold is HIGH RISK; the
/// inclusive compare is a frozen tie-break, not a tunable.
pub fn evaluate(
    classifier: &dyn Classifier,
    sample: &WineSample,
    threshold: f64,
) -> Result<RiskResult, RiskError> {
    let start = Instant::now();
    let probability = classifier.predict_proba(sample)?;

    // Track metrics
    LATENCY_SUM.fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
    INFERENCE_COUNT.fetch_add(1, Ordering::Relaxed);

    let decision = if probability >= threshold {
        RiskDecision::HighRisk
    } else {
        RiskDecision::LowRisk
    };

    Ok(RiskResult {
        probability,
        decision,
        threshold_used: threshold,
        interpretation: decision.interpretation().to_string(),
    })
}

/// (inference count, average latency in ms) for the process lifetime
pub fn inference_stats() -> (u64, f32) {
    let sum = LATENCY_SUM.load(Ordering::Relaxed);
    let count = INFERENCE_COUNT.load(Ordering::Relaxed);
    let avg = if count > 0 {
        (sum as f32 / count as f32) / 1000.0
    } else {
        0.0
    };
    (count, avg)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::detect_risk_flags;

    /// Classifier stub returning a fixed probability
    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn predict_proba(&self, _sample: &WineSample) -> Result<f64, RiskError> {
            Ok(self.0)
        }
    }

    fn reference_sample() -> WineSample {
        WineSample::from_values([
            7.4, 0.70, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4,
        ])
    }

    #[test]
    fn test_probability_at_threshold_is_high_risk() {
        // Inclusive boundary: p == threshold flags the sample
        let classifier = FixedClassifier(0.288);
        let result = evaluate(&classifier, &reference_sample(), 0.288).unwrap();

        assert_eq!(result.decision, RiskDecision::HighRisk);
        assert_eq!(result.interpretation, HIGH_RISK_INTERPRETATION);
    }

    #[test]
    fn test_probability_below_threshold_is_low_risk() {
        let classifier = FixedClassifier(0.287);
        let result = evaluate(&classifier, &reference_sample(), 0.288).unwrap();

        assert_eq!(result.decision, RiskDecision::LowRisk);
        assert_eq!(result.interpretation, LOW_RISK_INTERPRETATION);
    }

    #[test]
    fn test_reference_sample_scenario() {
        // Reference scenario: p = 0.35 against the frozen 0.288
        let classifier = FixedClassifier(0.35);
        let result = evaluate(&classifier, &reference_sample(), 0.288).unwrap();

        assert_eq!(result.probability, 0.35);
        assert_eq!(result.decision.as_str(), "HIGH RISK");
        assert_eq!(result.threshold_used, 0.288);
        assert_eq!(
            result.interpretation,
            "Flag for preventive quality review before market release."
        );
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let classifier = FixedClassifier(0.42);
        let sample = reference_sample();

        let first = evaluate(&classifier, &sample, 0.288).unwrap();
        let second = evaluate(&classifier, &sample, 0.288).unwrap();

        assert_eq!(first.probability, second.probability);
        assert_eq!(first.decision, second.decision);
        assert_eq!(first.interpretation, second.interpretation);
    }

    #[test]
    fn test_range_flags_do_not_affect_decision() {
        let classifier = FixedClassifier(0.35);
        let sample = reference_sample();

        let before = evaluate(&classifier, &sample, 0.288).unwrap();
        let _flags = detect_risk_flags(&sample.named_values());
        let after = evaluate(&classifier, &sample, 0.288).unwrap();

        assert_eq!(before.probability, after.probability);
        assert_eq!(before.decision, after.decision);
    }

    #[test]
    fn test_decision_wire_format() {
        let classifier = FixedClassifier(0.9);
        let result = evaluate(&classifier, &reference_sample(), 0.288).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["risk_decision"], "HIGH RISK");
        assert_eq!(json["risk_probability"], 0.9);
        assert_eq!(json["threshold_used"], 0.288);
    }

    #[test]
    fn test_classifier_errors_propagate() {
        struct FailingClassifier;
        impl Classifier for FailingClassifier {
            fn predict_proba(&self, _sample: &WineSample) -> Result<f64, RiskError> {
                Err(RiskError::Inference("output tensor shape".to_string()))
            }
        }

        let err = evaluate(&FailingClassifier, &reference_sample(), 0.288).unwrap_err();
        assert!(matches!(err, RiskError::Inference(_)));
    }
}
