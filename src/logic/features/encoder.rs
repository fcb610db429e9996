//! Feature Encoder
//!
//! Converts a [`RawRecord`] into the mapped, one-hot-expanded,
//! derived-feature-augmented representation, pre-scaling. Pure function of
//! its input; column ordering is the aligner's job.
//!
//! Step order matters: derived features read the renamed numeric fields, so
//! renaming must happen first.

use std::collections::HashMap;

use crate::logic::record::RawRecord;
use crate::logic::schema::catalog::{LEVEL_COLUMNS, OPINION_COLUMNS, SEX_COLUMNS};

// ============================================================================
// ENCODED FEATURE SET
// ============================================================================

/// Mapping from canonical feature name to numeric value, unordered.
///
/// For a valid record each one-hot group sums to exactly 1; an unknown
/// categorical value leaves its whole group at 0 (lenient by contract).
#[derive(Debug, Clone, Default)]
pub struct EncodedFeatureSet {
    values: HashMap<String, f32>,
}

impl EncodedFeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of a group of indicator columns (1.0 for a known category)
    pub fn group_sum(&self, group: &[&str]) -> f32 {
        group.iter().map(|c| self.get(c).unwrap_or(0.0)).sum()
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// A renamed field required by a later encoding step was absent
#[derive(Debug, Clone)]
pub struct EncodingError {
    pub missing: String,
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "encoding failed: required feature '{}' missing after renaming",
            self.missing
        )
    }
}

impl std::error::Error for EncodingError {}

// ============================================================================
// ENCODING
// ============================================================================

/// Encode a raw record into canonical named features.
///
/// 1. Rename base fields to their training-time names
/// 2-4. One-hot expand level, sex and council opinion in fit-time order
/// 5. Compute derived features from the renamed numerics
/// 6. Raw categorical fields never enter the map (the enums carry them)
pub fn encode(record: &RawRecord) -> Result<EncodedFeatureSet, EncodingError> {
    let mut features = EncodedFeatureSet::new();

    // Step 1: renamed base fields
    features.insert("Age", record.age as f32);
    features.insert(
        "Redoublement_Annee_Precedente",
        if record.redoublement { 1.0 } else { 0.0 },
    );
    features.insert(
        "Statut_Bourse",
        if record.statut_bourse { 1.0 } else { 0.0 },
    );
    features.insert("Moyenne_Generale_T1", record.moyenne_t1);
    features.insert("Moyenne_Generale_T2", record.moyenne_t2);
    features.insert("Nombre_Matieres_Echec_T1", record.nb_matieres_echec as f32);
    features.insert(
        "Nombre_Absences_Injustifiees_T1",
        record.absences_t1 as f32,
    );
    features.insert(
        "Nombre_Absences_Injustifiees_T2",
        record.absences_t2 as f32,
    );
    features.insert("Nombre_Retards_T1", record.retards as f32);
    features.insert(
        "Nombre_Sanctions_Disciplinaires_T1",
        record.sanctions as f32,
    );

    // Steps 2-4: one-hot groups, unknown values leave the group all-zero
    expand_group(&mut features, LEVEL_COLUMNS, record.niveau.indicator_column());
    expand_group(&mut features, SEX_COLUMNS, record.sexe.indicator_column());
    expand_group(
        &mut features,
        OPINION_COLUMNS,
        record.avis_conseil.indicator_column(),
    );

    // Step 5: derived features, from the renamed fields
    let t1 = require(&features, "Moyenne_Generale_T1")?;
    let t2 = require(&features, "Moyenne_Generale_T2")?;
    let abs_t1 = require(&features, "Nombre_Absences_Injustifiees_T1")?;
    let abs_t2 = require(&features, "Nombre_Absences_Injustifiees_T2")?;

    features.insert("evolution_moyenne", t2 - t1);
    features.insert("evolution_absences", abs_t2 - abs_t1);
    features.insert("total_absences", abs_t1 + abs_t2);

    Ok(features)
}

/// Zero-init a whole indicator group, then mark the active category (if any)
fn expand_group(features: &mut EncodedFeatureSet, group: &[&str], active: Option<&str>) {
    for col in group {
        features.insert(col, 0.0);
    }
    if let Some(col) = active {
        features.insert(col, 1.0);
    }
}

fn require(features: &EncodedFeatureSet, name: &str) -> Result<f32, EncodingError> {
    features.get(name).ok_or_else(|| EncodingError {
        missing: name.to_string(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::record::{CouncilOpinion, RawRecord, SchoolLevel, Sex};

    fn sample_record() -> RawRecord {
        RawRecord {
            age: 18,
            sexe: Sex::Male,
            niveau: SchoolLevel::Grade3,
            redoublement: false,
            statut_bourse: true,
            moyenne_t1: 65.0,
            moyenne_t2: 66.0,
            nb_matieres_echec: 1,
            absences_t1: 2,
            absences_t2: 3,
            retards: 1,
            sanctions: 0,
            avis_conseil: CouncilOpinion::Favorable,
        }
    }

    #[test]
    fn test_renamed_fields_present() {
        let features = encode(&sample_record()).unwrap();
        assert_eq!(features.get("Age"), Some(18.0));
        assert_eq!(features.get("Moyenne_Generale_T1"), Some(65.0));
        assert_eq!(features.get("Nombre_Absences_Injustifiees_T2"), Some(3.0));
        assert_eq!(features.get("Redoublement_Annee_Precedente"), Some(0.0));
        assert_eq!(features.get("Statut_Bourse"), Some(1.0));
    }

    #[test]
    fn test_one_hot_groups_sum_to_one() {
        let features = encode(&sample_record()).unwrap();
        assert_eq!(features.group_sum(LEVEL_COLUMNS), 1.0);
        assert_eq!(features.group_sum(SEX_COLUMNS), 1.0);
        assert_eq!(features.group_sum(OPINION_COLUMNS), 1.0);
    }

    #[test]
    fn test_one_hot_marks_right_column() {
        let features = encode(&sample_record()).unwrap();
        assert_eq!(
            features.get("Niveau_Scolaire_Actuel_3ème Humanités"),
            Some(1.0)
        );
        assert_eq!(
            features.get("Niveau_Scolaire_Actuel_4ème Humanités"),
            Some(0.0)
        );
        assert_eq!(features.get("Sexe_Masculin"), Some(1.0));
        assert_eq!(features.get("Sexe_Féminin"), Some(0.0));
        assert_eq!(features.get("Avis_Conseil_Classe_T1_Favorable"), Some(1.0));
    }

    #[test]
    fn test_derived_features() {
        // T1 65.0, T2 66.0, absences 2 and 3
        let features = encode(&sample_record()).unwrap();
        assert_eq!(features.get("evolution_moyenne"), Some(1.0));
        assert_eq!(features.get("evolution_absences"), Some(1.0));
        assert_eq!(features.get("total_absences"), Some(5.0));
    }

    #[test]
    fn test_unknown_opinion_yields_zero_block() {
        let mut record = sample_record();
        record.avis_conseil = CouncilOpinion::Unknown;

        let features = encode(&record).unwrap();
        assert_eq!(features.group_sum(OPINION_COLUMNS), 0.0);
        for col in OPINION_COLUMNS {
            assert_eq!(features.get(col), Some(0.0));
        }
    }

    #[test]
    fn test_unknown_level_and_sex_yield_zero_blocks() {
        let mut record = sample_record();
        record.niveau = SchoolLevel::Unknown;
        record.sexe = Sex::Unknown;

        let features = encode(&record).unwrap();
        assert_eq!(features.group_sum(LEVEL_COLUMNS), 0.0);
        assert_eq!(features.group_sum(SEX_COLUMNS), 0.0);
    }

    #[test]
    fn test_negative_deltas() {
        let mut record = sample_record();
        record.moyenne_t1 = 70.0;
        record.moyenne_t2 = 58.0;
        record.absences_t1 = 8;
        record.absences_t2 = 2;

        let features = encode(&record).unwrap();
        assert_eq!(features.get("evolution_moyenne"), Some(-12.0));
        assert_eq!(features.get("evolution_absences"), Some(-6.0));
        assert_eq!(features.get("total_absences"), Some(10.0));
    }
}
