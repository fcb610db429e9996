//! Prediction Engine - Degraded-Mode Wrapper
//!
//! Holds the predictor when the artifacts loaded, or nothing when they did
//! not. Risk-factor extraction works either way; only `predict` requires
//! the model. This keeps the dashboard browsable with a missing or broken
//! artifact pair.

use serde::Serialize;

use super::predictor::{ModelUnavailableError, PredictError, PredictionResult, Predictor};
use crate::logic::record::RawRecord;
use crate::logic::risk;
use crate::logic::risk::RiskFactor;

// ============================================================================
// ENGINE STATUS
// ============================================================================

/// Status snapshot for the UI layer
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_path: String,
    /// "model metadata" or "builtin fallback"
    pub column_source: String,
    pub feature_count: usize,
    pub layout_hash: u32,
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct PredictionEngine {
    predictor: Option<Predictor>,
}

impl PredictionEngine {
    /// Load both artifacts; on failure log and come up degraded
    pub fn init(model_path: &std::path::Path, scaler_path: &std::path::Path) -> Self {
        match Predictor::load(model_path, scaler_path) {
            Ok(predictor) => {
                log::info!(
                    "prediction engine ready ({} columns, source: {})",
                    predictor.catalog().len(),
                    if predictor.column_aware() {
                        "model metadata"
                    } else {
                        "builtin fallback"
                    }
                );
                Self {
                    predictor: Some(predictor),
                }
            }
            Err(e) => {
                log::warn!("prediction disabled, artifacts failed to load: {}", e);
                Self { predictor: None }
            }
        }
    }

    pub fn with_predictor(predictor: Predictor) -> Self {
        Self {
            predictor: Some(predictor),
        }
    }

    /// Engine with prediction disabled (degraded mode)
    pub fn disabled() -> Self {
        Self { predictor: None }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn status(&self) -> EngineStatus {
        match &self.predictor {
            Some(p) => EngineStatus {
                model_loaded: true,
                model_path: p.model_path().to_string(),
                column_source: if p.column_aware() {
                    "model metadata".to_string()
                } else {
                    "builtin fallback".to_string()
                },
                feature_count: p.catalog().len(),
                layout_hash: p.catalog().layout_hash(),
            },
            None => EngineStatus {
                model_loaded: false,
                model_path: "None".to_string(),
                column_source: "n/a".to_string(),
                feature_count: 0,
                layout_hash: 0,
            },
        }
    }

    /// Full prediction; `ModelUnavailable` while degraded
    pub fn predict(&self, record: &RawRecord) -> Result<PredictionResult, PredictError> {
        match &self.predictor {
            Some(predictor) => predictor.run(record),
            None => Err(PredictError::ModelUnavailable(ModelUnavailableError)),
        }
    }

    /// Rule-based explanations; never requires the model
    pub fn risk_factors(&self, record: &RawRecord) -> Vec<RiskFactor> {
        risk::extract(record)
    }
}

// ============================================================================
// TESTS
// ============================================================================
