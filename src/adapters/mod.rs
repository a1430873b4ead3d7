//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: logistic-regression classifier from an exported JSON model
//! - `artifacts`: loading of the model directory (classifier, manifest, threshold)

pub mod artifacts;
pub mod logistic;

pub use artifacts::{load_artifacts, ArtifactError};
pub use logistic::LogisticRegression;
