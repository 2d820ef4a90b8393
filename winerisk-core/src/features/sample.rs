//! Wine Sample - validated, ordered model input
//!
//! A `WineSample` can only be built from values in canonical layout order,
//! so whatever reaches the classifier matches the order it was trained with.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::error::RiskError;

/// One wine sample, features in the order defined by `FEATURE_LAYOUT`.
#[derive(Debug, Clone, PartialEq)]
pub struct WineSample {
    values: [f64; FEATURE_COUNT],
}

impl WineSample {
    /// Build from values already in canonical order.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Validate a raw key/value map against the schema and build the
    /// ordered sample.
    ///
    /// Rejects missing keys, unexpected keys and non-numeric values.
    pub fn from_map(input: &Map<String, Value>) -> Result<Self, RiskError> {
        let missing: Vec<String> = FEATURE_LAYOUT
            .iter()
            .filter(|name| !input.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RiskError::MissingFeatures(missing));
        }

        let unexpected: Vec<String> = input
            .keys()
            .filter(|key| feature_index(key).is_none())
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(RiskError::UnexpectedFeatures {
                unexpected,
                allowed: FEATURE_LAYOUT,
            });
        }

        let mut values = [0.0f64; FEATURE_COUNT];
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            values[i] = coerce(name, &input[*name])?;
        }

        Ok(Self { values })
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Values as ordered array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Named view for logging, echoing and range flags
    pub fn named_values(&self) -> HashMap<String, f64> {
        FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }
}

/// Coerce one JSON value to f64. Numeric strings are accepted.
fn coerce(feature: &str, value: &Value) -> Result<f64, RiskError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| RiskError::NotNumeric {
            feature: feature.to_string(),
            value: n.to_string(),
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| RiskError::NotNumeric {
            feature: feature.to_string(),
            value: s.clone(),
        }),
        other => Err(RiskError::NotNumeric {
            feature: feature.to_string(),
            value: other.to_string(),
        }),
    }
}
