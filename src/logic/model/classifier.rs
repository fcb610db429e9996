//! Classifier Adapter - ONNX Runtime Integration
//!
//! Loads the trained classifier and exposes class probabilities. The model
//! is opaque: it accepts any same-shaped numeric matrix, so column order
//! correctness lives entirely in the schema catalog and aligner.

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use super::ArtifactError;

/// ONNX custom-metadata key carrying the training-time column order
/// (JSON array of names, written by the training exporter)
pub const FEATURE_NAMES_METADATA_KEY: &str = "feature_names";

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A trained classifier exposing per-class probabilities.
///
/// Input: one row per observation, columns in catalog order.
/// Output: same row count, 2 columns `[P(stay), P(dropout)]`.
pub trait ProbabilisticClassifier: Send + Sync {
    fn predict_proba(&self, features: &Array2<f32>) -> Result<Array2<f32>, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX-backed classifier.
///
/// The session requires `&mut` to run, so it sits behind a mutex; the
/// adapter itself stays safe for concurrent read-only callers.
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the session and read the declared column order, if any
    pub fn load(path: &std::path::Path) -> Result<(Self, Option<Vec<String>>), ArtifactError> {
        log::info!("Loading ONNX model from: {}", path.display());

        if !path.exists() {
            return Err(ArtifactError(format!("model not found: {}", path.display())));
        }

        let session = Session::builder()
            .map_err(|e| ArtifactError(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ArtifactError(format!("failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| ArtifactError(format!("failed to load model: {}", e)))?;

        let columns = read_declared_columns(&session);
        log::info!("ONNX model loaded successfully");

        Ok((
            Self {
                session: Mutex::new(session),
            },
            columns,
        ))
    }
}

/// Declared training-time columns from ONNX custom metadata, if present
fn read_declared_columns(session: &Session) -> Option<Vec<String>> {
    let metadata = match session.metadata() {
        Ok(m) => m,
        Err(e) => {
            log::debug!("no model metadata available: {}", e);
            return None;
        }
    };

    let raw = match metadata.custom(FEATURE_NAMES_METADATA_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::debug!("failed to read model metadata: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(columns) => Some(columns),
        Err(e) => {
            log::warn!(
                "model metadata key '{}' is not a JSON name array: {}",
                FEATURE_NAMES_METADATA_KEY,
                e
            );
            None
        }
    }
}

impl ProbabilisticClassifier for OnnxClassifier {
    fn predict_proba(&self, features: &Array2<f32>) -> Result<Array2<f32>, InferenceError> {
        let rows = features.nrows();
        if rows == 0 {
            return Err(InferenceError("empty feature matrix".to_string()));
        }

        let mut session = self.session.lock();

        // sklearn-exported classifiers name the probability output; fall
        // back to the last output otherwise
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == "probabilities")
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("model defines no outputs".to_string()))?;

        let input_tensor = Value::from_array(features.clone())
            .map_err(|e| InferenceError(format!("tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError(format!("no output '{}'", output_name)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("extract error: {}", e)))?;

        let data = output_tensor.1;
        if data.len() % rows != 0 {
            return Err(InferenceError(format!(
                "output size {} not divisible by {} rows",
                data.len(),
                rows
            )));
        }

        let classes = data.len() / rows;
        if classes != 2 {
            return Err(InferenceError(format!(
                "expected 2 class probabilities per row, got {}",
                classes
            )));
        }

        Array2::from_shape_vec((rows, classes), data.to_vec())
            .map_err(|e| InferenceError(format!("shape error: {}", e)))
    }
}

// ============================================================================
// CAPABILITY VARIANT
// ============================================================================

/// Loaded classifier with its declared capabilities resolved at load time.
///
/// `ColumnAware` models declare the exact column order they were trained
/// with; `Plain` models leave the catalog to the built-in fallback list.
/// A typed variant instead of runtime attribute probing.
pub enum LoadedModel {
    Plain(Box<dyn ProbabilisticClassifier>),
    ColumnAware {
        classifier: Box<dyn ProbabilisticClassifier>,
        columns: Vec<String>,
    },
}

impl LoadedModel {
    /// Load an ONNX model, resolving column awareness from its metadata
    pub fn load(path: &std::path::Path) -> Result<Self, ArtifactError> {
        let (classifier, columns) = OnnxClassifier::load(path)?;
        let classifier = Box::new(classifier);

        match columns {
            Some(columns) if !columns.is_empty() => Ok(LoadedModel::ColumnAware {
                classifier,
                columns,
            }),
            _ => Ok(LoadedModel::Plain(classifier)),
        }
    }

    /// Wrap an arbitrary classifier without declared columns
    pub fn plain(classifier: Box<dyn ProbabilisticClassifier>) -> Self {
        LoadedModel::Plain(classifier)
    }

    /// Wrap a classifier together with its declared column order
    pub fn column_aware(
        classifier: Box<dyn ProbabilisticClassifier>,
        columns: Vec<String>,
    ) -> Self {
        LoadedModel::ColumnAware {
            classifier,
            columns,
        }
    }

    /// Declared training-time column order, if the model carries one
    pub fn expected_columns(&self) -> Option<&[String]> {
        match self {
            LoadedModel::Plain(_) => None,
            LoadedModel::ColumnAware { columns, .. } => Some(columns),
        }
    }

    pub fn classifier(&self) -> &dyn ProbabilisticClassifier {
        match self {
            LoadedModel::Plain(classifier) => classifier.as_ref(),
            LoadedModel::ColumnAware { classifier, .. } => classifier.as_ref(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantClassifier(f32);

    impl ProbabilisticClassifier for ConstantClassifier {
        fn predict_proba(&self, features: &Array2<f32>) -> Result<Array2<f32>, InferenceError> {
            let rows = features.nrows();
            let mut out = Array2::zeros((rows, 2));
            for mut row in out.rows_mut() {
                row[0] = 1.0 - self.0;
                row[1] = self.0;
            }
            Ok(out)
        }
    }

    #[test]
    fn test_plain_model_has_no_columns() {
        let model = LoadedModel::plain(Box::new(ConstantClassifier(0.5)));
        assert!(model.expected_columns().is_none());
    }

    #[test]
    fn test_column_aware_model_reports_columns() {
        let columns = vec!["Age".to_string(), "Statut_Bourse".to_string()];
        let model =
            LoadedModel::column_aware(Box::new(ConstantClassifier(0.5)), columns.clone());
        assert_eq!(model.expected_columns(), Some(columns.as_slice()));
    }

    #[test]
    fn test_classifier_delegation() {
        let model = LoadedModel::plain(Box::new(ConstantClassifier(0.8)));
        let input = Array2::zeros((1, 4));
        let proba = model.classifier().predict_proba(&input).unwrap();
        assert_eq!(proba[[0, 1]], 0.8);
        assert!((proba[[0, 0]] - 0.2).abs() < 1e-6);
    }
}
