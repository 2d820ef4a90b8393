//! Features Module - Wine sample schema
//!
//! Owns the canonical feature layout, input validation and the
//! reference-only typical-range flags.

pub mod layout;
pub mod ranges;
pub mod sample;

// Re-export common types
pub use layout::{feature_index, feature_name, layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use ranges::{detect_risk_flags, TYPICAL_RANGES};
pub use sample::WineSample;
