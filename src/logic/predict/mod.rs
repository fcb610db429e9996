//! Predict Module - Pipeline Orchestration
//!
//! Composes encode -> align -> scale -> predict_proba. The engine wrapper
//! keeps the rest of the system usable when the trained artifacts are
//! missing: risk factors and history browsing never require the model.

pub mod predictor;
pub mod engine;

// Re-export common types
pub use engine::{EngineStatus, PredictionEngine};
pub use predictor::{ModelUnavailableError, PredictError, PredictionResult, Predictor};
