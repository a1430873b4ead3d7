//! Ports layer: Trait definitions for external collaborators.
//!
//! The trained model is the only external collaborator the estimator calls
//! at runtime.

mod classifier;

pub use classifier::Classifier;
