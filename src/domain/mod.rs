//! Domain layer: Core types and feature derivation.
//!
//! Pure Rust types with no I/O. Everything here is recomputed from scratch
//! for each set of inputs.

mod features;
mod inputs;
mod prediction;

pub use features::{
    met_minutes, waist_hip_ratio, DerivedFeatures, FeatureMap, FeatureOrder, FeatureVector,
    FEATURE_NAMES,
};
pub use inputs::{AlcoholFrequency, RawInputs, Sex};
pub use prediction::{Assessment, PredictionResult, RiskLabel, Threshold, ThresholdSource};
