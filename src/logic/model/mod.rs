//! Model Module - Trained Artifact Adapters
//!
//! Wraps the two opaque artifacts produced at training time: the ONNX
//! classifier and the fitted numeric scaler. Both are loaded once at
//! startup and treated as read-only afterwards.

pub mod classifier;
pub mod scaler;

// Re-export common types
pub use classifier::{InferenceError, LoadedModel, ProbabilisticClassifier};
pub use scaler::{FittedScaler, SchemaMismatchError};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// A trained artifact could not be loaded at startup
#[derive(Debug, Clone)]
pub struct ArtifactError(pub String);

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArtifactError: {}", self.0)
    }
}

impl std::error::Error for ArtifactError {}
