//! Application layer: Use cases and services.
//!
//! Orchestrates domain logic with the classifier port.

mod estimator;

pub use estimator::{assess, estimate, ModelArtifacts, RiskEstimator};
