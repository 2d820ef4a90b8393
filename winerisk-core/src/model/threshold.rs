//! Frozen Decision Threshold
//!
//! The threshold was selected at model-packaging time and shipped next to
//! the classifier as a small JSON mapping. It is never recomputed at
//! inference time.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::RiskError;

/// Key the packaging step writes the frozen threshold under
pub const FROZEN_THRESHOLD_KEY: &str = "frozen_threshold";

/// Fallback when the record lacks the expected key
pub const DEFAULT_FROZEN_THRESHOLD: f64 = 0.288;

/// Deserialized threshold artifact
#[derive(Debug, Clone, Default)]
pub struct ThresholdRecord {
    entries: HashMap<String, Value>,
}

impl ThresholdRecord {
    /// Load the threshold record from file.
    pub fn load(path: &Path) -> Result<Self, RiskError> {
        if !path.exists() {
            return Err(RiskError::ArtifactNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| RiskError::MalformedArtifact {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let entries = serde_json::from_str(&raw).map_err(|e| RiskError::MalformedArtifact {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        Ok(Self { entries })
    }

    pub fn from_entries(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    /// The frozen threshold, falling back to the packaged default when the
    /// key is absent. The fallback is logged so a mis-packaged record is
    /// visible in operation.
    pub fn frozen_threshold(&self) -> f64 {
        match self.entries.get(FROZEN_THRESHOLD_KEY).and_then(Value::as_f64) {
            Some(threshold) => threshold,
            None => {
                log::warn!(
                    "Threshold record has no '{}' key, using default {}",
                    FROZEN_THRESHOLD_KEY,
                    DEFAULT_FROZEN_THRESHOLD
                );
                DEFAULT_FROZEN_THRESHOLD
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_frozen_threshold_from_record() {
        let record = ThresholdRecord::from_entries(HashMap::from([(
            FROZEN_THRESHOLD_KEY.to_string(),
            json!(0.42),
        )]));

        assert_eq!(record.frozen_threshold(), 0.42);
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let record = ThresholdRecord::from_entries(HashMap::from([(
            "calibration_date".to_string(),
            json!("2024-03-01"),
        )]));

        assert_eq!(record.frozen_threshold(), 0.288);
    }

    #[test]
    fn test_empty_record_falls_back_to_default() {
        let record = ThresholdRecord::default();
        assert_eq!(record.frozen_threshold(), DEFAULT_FROZEN_THRESHOLD);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_thresholds.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"frozen_threshold": 0.288, "model": "histgb"}}"#).unwrap();

        let record = ThresholdRecord::load(&path).unwrap();
        assert_eq!(record.frozen_threshold(), 0.288);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_thresholds.json");

        let err = ThresholdRecord::load(&path).unwrap_err();
        assert!(matches!(err, RiskError::ArtifactNotFound(_)));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_thresholds.json");
        std::fs::write(&path, "not json").unwrap();

        let err = ThresholdRecord::load(&path).unwrap_err();
        assert!(matches!(err, RiskError::MalformedArtifact { .. }));
    }
}
