//! Scaler Adapter - Fitted Standardization Parameters
//!
//! Applies the training-time scaler to the numeric subset of an aligned
//! vector. Indicator columns pass through untouched. The scaler must have
//! been fit on exactly the catalog's numeric columns - an external
//! invariant this adapter can only check by shape and name.

use serde::{Deserialize, Serialize};

use super::ArtifactError;
use crate::logic::features::AlignedFeatureVector;
use crate::logic::schema::SchemaCatalog;

/// Guard against a degenerate scale factor
const MIN_SCALE: f32 = 1e-8;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Scaler/model/catalog disagreement - a configuration problem (stale or
/// incompatible trained-artifact pair), not a per-record problem
#[derive(Debug, Clone)]
pub enum SchemaMismatchError {
    ColumnCount { expected: usize, actual: usize },
    LayoutHash { expected: u32, actual: u32 },
    MissingColumn { column: String },
}

impl std::fmt::Display for SchemaMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaMismatchError::ColumnCount { expected, actual } => write!(
                f,
                "schema mismatch: scaler fit on {} columns, catalog has {} numeric columns",
                actual, expected
            ),
            SchemaMismatchError::LayoutHash { expected, actual } => write!(
                f,
                "schema mismatch: vector layout {:08x} does not match catalog layout {:08x}",
                actual, expected
            ),
            SchemaMismatchError::MissingColumn { column } => write!(
                f,
                "schema mismatch: scaler column '{}' absent from catalog",
                column
            ),
        }
    }
}

impl std::error::Error for SchemaMismatchError {}

// ============================================================================
// FITTED SCALER
// ============================================================================

/// Per-column standardization parameters exported at training time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedScaler {
    columns: Vec<String>,
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl FittedScaler {
    pub fn new(columns: Vec<String>, mean: Vec<f32>, scale: Vec<f32>) -> Result<Self, ArtifactError> {
        if mean.len() != columns.len() || scale.len() != columns.len() {
            return Err(ArtifactError(format!(
                "scaler parameter lengths disagree: {} columns, {} means, {} scales",
                columns.len(),
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self {
            columns,
            mean,
            scale,
        })
    }

    /// Identity scaler (mean 0, scale 1) - useful in tests
    pub fn identity(columns: Vec<String>) -> Self {
        let n = columns.len();
        Self {
            columns,
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        }
    }

    /// Load the JSON artifact written by the training exporter
    pub fn load(path: &std::path::Path) -> Result<Self, ArtifactError> {
        log::info!("Loading fitted scaler from: {}", path.display());

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ArtifactError(format!("scaler not readable: {}", e)))?;
        let scaler: FittedScaler = serde_json::from_str(&raw)
            .map_err(|e| ArtifactError(format!("scaler artifact malformed: {}", e)))?;

        // Re-validate through the constructor
        Self::new(scaler.columns, scaler.mean, scaler.scale)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Standardize the numeric columns of an aligned vector in place.
    ///
    /// Indicator columns are never touched. Fails when the vector was
    /// aligned against a different catalog, or when the scaler and the
    /// catalog disagree on the numeric column set.
    pub fn transform(
        &self,
        vector: &mut AlignedFeatureVector,
        catalog: &SchemaCatalog,
    ) -> Result<(), SchemaMismatchError> {
        if vector.layout_hash() != catalog.layout_hash() {
            return Err(SchemaMismatchError::LayoutHash {
                expected: catalog.layout_hash(),
                actual: vector.layout_hash(),
            });
        }

        let numeric = catalog.numeric_columns();
        if numeric.len() != self.columns.len() {
            return Err(SchemaMismatchError::ColumnCount {
                expected: numeric.len(),
                actual: self.columns.len(),
            });
        }

        for (i, column) in self.columns.iter().enumerate() {
            let idx = catalog
                .index_of(column)
                .ok_or_else(|| SchemaMismatchError::MissingColumn {
                    column: column.clone(),
                })?;

            let value = vector.get(idx).unwrap_or(0.0);
            let scale = self.scale[i].max(MIN_SCALE);
            vector.set(idx, (value - self.mean[i]) / scale);
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
