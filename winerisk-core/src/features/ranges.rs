//! Typical Ranges - reference-only bounds
//!
//! Approximate ranges seen in the training dataset, used to surface
//! unusual inputs. Interpretation aid only - never part of the decision.

use std::collections::HashMap;

/// (feature, low, high) in fixed iteration order
pub const TYPICAL_RANGES: &[(&str, f64, f64)] = &[
    ("volatile acidity", 0.2, 0.7),
    ("alcohol", 9.5, 12.5),
    ("total sulfur dioxide", 20.0, 100.0),
    ("chlorides", 0.03, 0.09),
    ("density", 0.994, 0.999),
    ("sulphates", 0.4, 0.8),
];

/// Flag inputs that fall outside typical dataset ranges.
///
/// Features absent from the map are skipped. Order follows
/// [`TYPICAL_RANGES`].
pub fn detect_risk_flags(features: &HashMap<String, f64>) -> Vec<String> {
    let mut flags = Vec::new();

    for &(feature, low, high) in TYPICAL_RANGES {
        let value = match features.get(feature) {
            Some(v) => *v,
            None => continue,
        };

        if value < low {
            flags.push(format!("{feature}: unusually low ({value})"));
        } else if value > high {
            flags.push(format!("{feature}: unusually high ({value})"));
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_alcohol_below_range_flagged() {
        let flags = detect_risk_flags(&features(&[("alcohol", 8.0)]));

        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("alcohol"));
        assert!(flags[0].contains("unusually low"));
    }

    #[test]
    fn test_alcohol_within_range_not_flagged() {
        let flags = detect_risk_flags(&features(&[("alcohol", 11.0)]));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_above_range_flagged_high() {
        let flags = detect_risk_flags(&features(&[("total sulfur dioxide", 150.0)]));

        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("total sulfur dioxide"));
        assert!(flags[0].contains("unusually high"));
    }

    #[test]
    fn test_boundary_values_not_flagged() {
        // Bounds themselves are inside the typical range
        let flags = detect_risk_flags(&features(&[("alcohol", 9.5)]));
        assert!(flags.is_empty());

        let flags = detect_risk_flags(&features(&[("alcohol", 12.5)]));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_absent_features_skipped() {
        let flags = detect_risk_flags(&HashMap::new());
        assert!(flags.is_empty());
    }

    #[test]
    fn test_flag_order_follows_table() {
        let flags = detect_risk_flags(&features(&[
            ("alcohol", 8.0),
            ("volatile acidity", 1.2),
            ("sulphates", 0.1),
        ]));

        assert_eq!(flags.len(), 3);
        assert!(flags[0].starts_with("volatile acidity"));
        assert!(flags[1].starts_with("alcohol"));
        assert!(flags[2].starts_with("sulphates"));
    }
}
