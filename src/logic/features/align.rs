//! Schema Aligner
//!
//! Reconciles an encoded feature set against the catalog: every catalog
//! column gets a value (0 when the encoder produced none), encoder columns
//! outside the catalog are silently dropped, and the output order is the
//! catalog order. Alignment never fails - schema drift in either direction
//! degrades to zero-fill or drop, so encoder evolution does not break
//! inference against an older trained model.

use serde::{Deserialize, Serialize};

use super::encoder::EncodedFeatureSet;
use crate::logic::schema::SchemaCatalog;

// ============================================================================
// ALIGNED FEATURE VECTOR
// ============================================================================

/// Feature values in exact catalog order, tagged with the catalog's layout
/// hash so downstream stages can detect a stale catalog/artifact pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedFeatureVector {
    layout_hash: u32,
    values: Vec<f32>,
}

impl AlignedFeatureVector {
    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub(crate) fn set(&mut self, index: usize, value: f32) {
        if index < self.values.len() {
            self.values[index] = value;
        }
    }

    /// Back to a named feature set (for re-alignment or inspection)
    pub fn to_feature_set(&self, catalog: &SchemaCatalog) -> EncodedFeatureSet {
        let mut features = EncodedFeatureSet::new();
        for (name, value) in catalog.columns().iter().zip(self.values.iter()) {
            features.insert(name, *value);
        }
        features
    }
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Align a feature set to the catalog's column order.
///
/// Guarantees: output length == catalog length, deterministic order, no
/// duplicates, missing columns zero-filled, extra columns dropped.
pub fn align(features: &EncodedFeatureSet, catalog: &SchemaCatalog) -> AlignedFeatureVector {
    let values = catalog
        .columns()
        .iter()
        .map(|name| features.get(name).unwrap_or(0.0))
        .collect();

    AlignedFeatureVector {
        layout_hash: catalog.layout_hash(),
        values,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::builtin()
    }

    #[test]
    fn test_output_matches_catalog_length() {
        let features = EncodedFeatureSet::new();
        let vector = align(&features, &catalog());
        assert_eq!(vector.len(), catalog().len());
    }

    #[test]
    fn test_missing_columns_zero_filled() {
        let mut features = EncodedFeatureSet::new();
        features.insert("Age", 17.0);

        let catalog = catalog();
        let vector = align(&features, &catalog);

        assert_eq!(vector.get(catalog.index_of("Age").unwrap()), Some(17.0));
        // A column the encoder never produced defaults to 0
        let idx = catalog.index_of("Sexe_Féminin").unwrap();
        assert_eq!(vector.get(idx), Some(0.0));
    }

    #[test]
    fn test_extra_columns_dropped_silently() {
        let mut features = EncodedFeatureSet::new();
        features.insert("Age", 17.0);
        features.insert("future_derived_feature", 42.0);

        let catalog = catalog();
        let vector = align(&features, &catalog);

        assert_eq!(vector.len(), catalog.len());
        let set = vector.to_feature_set(&catalog);
        assert!(!set.contains("future_derived_feature"));
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let mut features = EncodedFeatureSet::new();
        features.insert("Age", 17.0);
        features.insert("Moyenne_Generale_T2", 55.5);

        let catalog = catalog();
        let once = align(&features, &catalog);
        let twice = align(&once.to_feature_set(&catalog), &catalog);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_layout_hash_carried() {
        let catalog = catalog();
        let vector = align(&EncodedFeatureSet::new(), &catalog);
        assert_eq!(vector.layout_hash(), catalog.layout_hash());
    }
}
