//! # HTN Risk
//!
//! Survey-based hypertension risk estimation.
//!
//! This crate provides:
//! - Feature derivation from survey inputs (waist-to-hip risk, heavy alcohol
//!   use, MET-minutes of physical activity)
//! - A logistic-regression classifier loaded from an exported JSON artifact
//! - A terminal form that re-estimates on every edit
//!
//! ## Architecture
//!
//! - `domain`: Survey inputs, derived features, prediction types
//! - `ports`: The `Classifier` trait
//! - `adapters`: Artifact loading and the logistic-regression classifier
//! - `application`: The risk estimator and its immutable artifact context
//! - `config`: Process configuration for the binary
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{ModelArtifacts, RiskEstimator};
pub use domain::{Assessment, PredictionResult, RawInputs, RiskLabel};

/// Result type for HTN risk operations
pub type Result<T> = std::result::Result<T, RiskError>;

/// Main error type for HTN risk estimation
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("Artifact load failed: {0}")]
    ArtifactLoad(#[from] adapters::ArtifactError),

    #[error("Threshold artifact unusable: {0}")]
    ThresholdLoad(String),

    #[error("Invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    #[error("Feature order references unknown feature '{0}'")]
    MissingFeature(String),

    #[error("Feature count mismatch: expected {expected}, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("Classifier returned invalid probability {0}")]
    InvalidProbability(f64),
}
