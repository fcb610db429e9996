//! Schema Catalog - Centralized Column Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add column -> increment SCHEMA_VERSION
//! 2. Change order -> increment SCHEMA_VERSION
//! 3. Remove column -> increment SCHEMA_VERSION
//!
//! The categorical orderings below are the ones the encoding was fit with
//! at training time (alphabetical by label). They are a versioned contract,
//! never re-derived from live data: re-deriving would silently reorder
//! columns whenever the observed category set differs from training.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Current schema version
/// MUST be incremented when the column layout changes
pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// COLUMN LAYOUT (Authoritative fallback)
// ============================================================================

/// Full expected column order, used when the model does not declare its own.
/// Matches the column order the classifier was trained with.
pub const FALLBACK_COLUMNS: &[&str] = &[
    "Age",
    "Redoublement_Annee_Precedente",
    "Moyenne_Generale_T1",
    "Moyenne_Generale_T2",
    "Nombre_Matieres_Echec_T1",
    "Nombre_Absences_Injustifiees_T1",
    "Nombre_Absences_Injustifiees_T2",
    "Nombre_Retards_T1",
    "Nombre_Sanctions_Disciplinaires_T1",
    "Statut_Bourse",
    "evolution_moyenne",
    "evolution_absences",
    "total_absences",
    "Niveau_Scolaire_Actuel_3ème Humanités",
    "Niveau_Scolaire_Actuel_4ème Humanités",
    "Avis_Conseil_Classe_T1_Défavorable",
    "Avis_Conseil_Classe_T1_Favorable",
    "Avis_Conseil_Classe_T1_Favorable avec mise en garde",
    "Avis_Conseil_Classe_T1_Passable",
    "Avis_Conseil_Classe_T1_Très Défavorable",
    "Avis_Conseil_Classe_T1_Très Favorable",
    "Sexe_Féminin",
    "Sexe_Masculin",
];

/// Columns subject to scaling. Everything else is a 0/1 indicator that
/// passes through the scaler untouched.
pub const NUMERIC_COLUMNS: &[&str] = &[
    "Age",
    "Moyenne_Generale_T1",
    "Moyenne_Generale_T2",
    "Nombre_Matieres_Echec_T1",
    "Nombre_Absences_Injustifiees_T1",
    "Nombre_Absences_Injustifiees_T2",
    "Nombre_Retards_T1",
    "Nombre_Sanctions_Disciplinaires_T1",
    "evolution_moyenne",
    "evolution_absences",
    "total_absences",
];

// ============================================================================
// CATEGORICAL GROUP ORDERINGS (fit-time order)
// ============================================================================

/// School-level indicator columns, one per known level
pub const LEVEL_COLUMNS: &[&str] = &[
    "Niveau_Scolaire_Actuel_3ème Humanités",
    "Niveau_Scolaire_Actuel_4ème Humanités",
];

/// Sex indicator columns
pub const SEX_COLUMNS: &[&str] = &["Sexe_Féminin", "Sexe_Masculin"];

/// Council-opinion indicator columns, alphabetical by label as fit
pub const OPINION_COLUMNS: &[&str] = &[
    "Avis_Conseil_Classe_T1_Défavorable",
    "Avis_Conseil_Classe_T1_Favorable",
    "Avis_Conseil_Classe_T1_Favorable avec mise en garde",
    "Avis_Conseil_Classe_T1_Passable",
    "Avis_Conseil_Classe_T1_Très Défavorable",
    "Avis_Conseil_Classe_T1_Très Favorable",
];

// ============================================================================
// CATALOG
// ============================================================================

/// Immutable column catalog the pipeline aligns against.
///
/// Built once at startup, either from the model's declared column order or
/// from [`FALLBACK_COLUMNS`]. Never mutated, never recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaCatalog {
    columns: Vec<String>,
    layout_hash: u32,
}

impl SchemaCatalog {
    /// Catalog from the built-in fallback column list
    pub fn builtin() -> Self {
        Self::from_columns(FALLBACK_COLUMNS.iter().map(|s| s.to_string()).collect())
    }

    /// Catalog from an explicit ordered column list (model-declared)
    pub fn from_columns(columns: Vec<String>) -> Self {
        let layout_hash = compute_layout_hash(&columns);
        Self {
            columns,
            layout_hash,
        }
    }

    /// Build from the model's declared columns when available, else the
    /// built-in list. The choice is logged once at startup.
    pub fn resolve(declared: Option<Vec<String>>) -> Self {
        match declared {
            Some(columns) if !columns.is_empty() => {
                log::info!(
                    "Schema catalog: {} columns declared by model",
                    columns.len()
                );
                Self::from_columns(columns)
            }
            _ => {
                log::info!(
                    "Schema catalog: model declares no columns, using built-in list ({})",
                    FALLBACK_COLUMNS.len()
                );
                Self::builtin()
            }
        }
    }

    /// Ordered column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by name (O(n) but columns are few)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// CRC32 hash over version + column names, for stale-artifact detection
    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Numeric columns present in this catalog, in catalog order
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .filter(|c| is_numeric(c))
            .collect()
    }
}

/// Whether a column is scaled (numeric) or passed through (indicator)
pub fn is_numeric(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}

/// Compute CRC32 hash of a column layout
fn compute_layout_hash(columns: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[SCHEMA_VERSION]);
    for name in columns {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_column_count() {
        assert_eq!(FALLBACK_COLUMNS.len(), 23);
        assert_eq!(NUMERIC_COLUMNS.len(), 11);
    }

    #[test]
    fn test_groups_are_subsets_of_layout() {
        for group in [LEVEL_COLUMNS, SEX_COLUMNS, OPINION_COLUMNS] {
            for col in group {
                assert!(
                    FALLBACK_COLUMNS.contains(col),
                    "group column {} missing from layout",
                    col
                );
            }
        }
    }

    #[test]
    fn test_no_duplicate_columns() {
        let mut seen = std::collections::HashSet::new();
        for col in FALLBACK_COLUMNS {
            assert!(seen.insert(col), "duplicate column {}", col);
        }
    }

    #[test]
    fn test_numeric_partition() {
        // Every numeric column is in the layout; indicators are everything else
        for col in NUMERIC_COLUMNS {
            assert!(FALLBACK_COLUMNS.contains(col));
        }
        assert!(is_numeric("Age"));
        assert!(!is_numeric("Sexe_Féminin"));
        assert!(!is_numeric("Avis_Conseil_Classe_T1_Passable"));
    }

    #[test]
    fn test_layout_hash_consistency() {
        let a = SchemaCatalog::builtin();
        let b = SchemaCatalog::builtin();
        assert_eq!(a.layout_hash(), b.layout_hash());
        assert_ne!(a.layout_hash(), 0);
    }

    #[test]
    fn test_layout_hash_order_sensitive() {
        let mut reversed: Vec<String> =
            FALLBACK_COLUMNS.iter().map(|s| s.to_string()).collect();
        reversed.reverse();
        let a = SchemaCatalog::builtin();
        let b = SchemaCatalog::from_columns(reversed);
        assert_ne!(a.layout_hash(), b.layout_hash());
    }

    #[test]
    fn test_resolve_prefers_declared() {
        let declared = vec!["Age".to_string(), "Statut_Bourse".to_string()];
        let catalog = SchemaCatalog::resolve(Some(declared));
        assert_eq!(catalog.len(), 2);

        let fallback = SchemaCatalog::resolve(None);
        assert_eq!(fallback.len(), FALLBACK_COLUMNS.len());

        let empty = SchemaCatalog::resolve(Some(Vec::new()));
        assert_eq!(empty.len(), FALLBACK_COLUMNS.len());
    }

    #[test]
    fn test_index_of() {
        let catalog = SchemaCatalog::builtin();
        assert_eq!(catalog.index_of("Age"), Some(0));
        assert_eq!(catalog.index_of("Sexe_Masculin"), Some(22));
        assert_eq!(catalog.index_of("nonexistent"), None);
    }

    #[test]
    fn test_numeric_columns_follow_catalog() {
        let catalog = SchemaCatalog::builtin();
        assert_eq!(catalog.numeric_columns().len(), NUMERIC_COLUMNS.len());

        // A reduced catalog only reports the numeric columns it contains
        let reduced = SchemaCatalog::from_columns(vec![
            "Age".to_string(),
            "Sexe_Féminin".to_string(),
        ]);
        assert_eq!(reduced.numeric_columns(), vec!["Age"]);
    }
}
