//! Predictor - Encode, Align, Scale, Infer
//!
//! Owns the loaded artifacts and the schema catalog, all built once at
//! startup and read-only afterwards. Each call is a pure synchronous
//! computation; no retries - re-running a deterministic transform on the
//! same input cannot change the outcome.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::logic::features::{align, encode, EncodingError};
use crate::logic::model::classifier::InferenceError;
use crate::logic::model::scaler::SchemaMismatchError;
use crate::logic::model::{ArtifactError, FittedScaler, LoadedModel};
use crate::logic::record::RawRecord;
use crate::logic::risk;
use crate::logic::risk::{RiskFactor, RiskLevel};
use crate::logic::schema::SchemaCatalog;

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Outcome of one prediction call. Ephemeral - produced per call, persisted
/// by the history collaborator if the caller chooses to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of dropout, in [0,1]
    pub probability: f32,
    pub risk_level: RiskLevel,
    /// Matching rule labels, in rule order; empty is valid
    pub risk_factors: Vec<RiskFactor>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// The model/scaler pair failed to load at startup; prediction is disabled
/// while the rest of the system keeps operating
#[derive(Debug, Clone)]
pub struct ModelUnavailableError;

impl std::fmt::Display for ModelUnavailableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "prediction unavailable: model or scaler failed to load at startup")
    }
}

impl std::error::Error for ModelUnavailableError {}

/// Per-call prediction failure
#[derive(Debug)]
pub enum PredictError {
    Encoding(EncodingError),
    SchemaMismatch(SchemaMismatchError),
    Inference(InferenceError),
    ModelUnavailable(ModelUnavailableError),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::Encoding(e) => e.fmt(f),
            PredictError::SchemaMismatch(e) => e.fmt(f),
            PredictError::Inference(e) => e.fmt(f),
            PredictError::ModelUnavailable(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredictError::Encoding(e) => Some(e),
            PredictError::SchemaMismatch(e) => Some(e),
            PredictError::Inference(e) => Some(e),
            PredictError::ModelUnavailable(e) => Some(e),
        }
    }
}

impl From<EncodingError> for PredictError {
    fn from(e: EncodingError) -> Self {
        PredictError::Encoding(e)
    }
}

impl From<SchemaMismatchError> for PredictError {
    fn from(e: SchemaMismatchError) -> Self {
        PredictError::SchemaMismatch(e)
    }
}

impl From<InferenceError> for PredictError {
    fn from(e: InferenceError) -> Self {
        PredictError::Inference(e)
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

pub struct Predictor {
    model: LoadedModel,
    scaler: FittedScaler,
    catalog: SchemaCatalog,
    model_path: String,
}

impl Predictor {
    /// Assemble a predictor from already-loaded parts.
    ///
    /// The catalog is resolved here, once: from the model's declared
    /// columns when it carries them, else from the built-in list.
    pub fn new(model: LoadedModel, scaler: FittedScaler, model_path: String) -> Self {
        let catalog = SchemaCatalog::resolve(model.expected_columns().map(|c| c.to_vec()));
        Self {
            model,
            scaler,
            catalog,
            model_path,
        }
    }

    /// Load both trained artifacts from disk
    pub fn load(
        model_path: &std::path::Path,
        scaler_path: &std::path::Path,
    ) -> Result<Self, ArtifactError> {
        let model = LoadedModel::load(model_path)?;
        let scaler = FittedScaler::load(scaler_path)?;
        Ok(Self::new(
            model,
            scaler,
            model_path.display().to_string(),
        ))
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    /// True when the catalog came from the model's own declaration
    pub fn column_aware(&self) -> bool {
        self.model.expected_columns().is_some()
    }

    /// Dropout probability for one record
    pub fn predict(&self, record: &RawRecord) -> Result<f32, PredictError> {
        let features = encode(record)?;
        let mut vector = align(&features, &self.catalog);
        self.scaler.transform(&mut vector, &self.catalog)?;

        let matrix = Array2::from_shape_vec((1, vector.len()), vector.as_slice().to_vec())
            .map_err(|e| InferenceError(format!("shape error: {}", e)))?;

        let proba = self.model.classifier().predict_proba(&matrix)?;
        let probability = proba[[0, 1]].clamp(0.0, 1.0);

        log::debug!("predicted dropout probability {:.4}", probability);
        Ok(probability)
    }

    /// Probability plus risk banding and rule-based explanations
    pub fn run(&self, record: &RawRecord) -> Result<PredictionResult, PredictError> {
        let probability = self.predict(record)?;
        Ok(PredictionResult {
            probability,
            risk_level: RiskLevel::from_probability(probability),
            risk_factors: risk::extract(record),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
