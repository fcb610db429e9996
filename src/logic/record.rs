//! Raw Student Record
//!
//! One student observation as submitted by the dashboard form or a batch
//! caller, prior to any transformation. Wire field names match the training
//! data. Range validation (age in [12,25], averages in [0,100], ...) is
//! enforced at the UI boundary, not here.

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORICAL ENUMS
// ============================================================================

/// Student sex
///
/// `Unknown` absorbs any wire value outside the known enumeration; it
/// encodes as an all-zero indicator block rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "Masculin")]
    Male,
    #[serde(rename = "Féminin")]
    Female,
    #[serde(other)]
    Unknown,
}

impl Sex {
    /// Training-time indicator column for this value, if known
    pub fn indicator_column(&self) -> Option<&'static str> {
        match self {
            Sex::Male => Some("Sexe_Masculin"),
            Sex::Female => Some("Sexe_Féminin"),
            Sex::Unknown => None,
        }
    }
}

/// Current school level (source-specific secondary levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchoolLevel {
    #[serde(rename = "3ème Humanités")]
    Grade3,
    #[serde(rename = "4ème Humanités")]
    Grade4,
    #[serde(other)]
    Unknown,
}

impl SchoolLevel {
    pub fn indicator_column(&self) -> Option<&'static str> {
        match self {
            SchoolLevel::Grade3 => Some("Niveau_Scolaire_Actuel_3ème Humanités"),
            SchoolLevel::Grade4 => Some("Niveau_Scolaire_Actuel_4ème Humanités"),
            SchoolLevel::Unknown => None,
        }
    }
}

/// Term-1 class-council opinion, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CouncilOpinion {
    #[serde(rename = "Très Défavorable")]
    VeryUnfavorable,
    #[serde(rename = "Défavorable")]
    Unfavorable,
    #[serde(rename = "Passable")]
    Passable,
    #[serde(rename = "Favorable avec mise en garde")]
    FavorableWithWarning,
    #[serde(rename = "Favorable")]
    Favorable,
    #[serde(rename = "Très Favorable")]
    VeryFavorable,
    #[serde(other)]
    Unknown,
}

impl CouncilOpinion {
    pub fn indicator_column(&self) -> Option<&'static str> {
        match self {
            CouncilOpinion::VeryUnfavorable => Some("Avis_Conseil_Classe_T1_Très Défavorable"),
            CouncilOpinion::Unfavorable => Some("Avis_Conseil_Classe_T1_Défavorable"),
            CouncilOpinion::Passable => Some("Avis_Conseil_Classe_T1_Passable"),
            CouncilOpinion::FavorableWithWarning => {
                Some("Avis_Conseil_Classe_T1_Favorable avec mise en garde")
            }
            CouncilOpinion::Favorable => Some("Avis_Conseil_Classe_T1_Favorable"),
            CouncilOpinion::VeryFavorable => Some("Avis_Conseil_Classe_T1_Très Favorable"),
            CouncilOpinion::Unknown => None,
        }
    }

    /// True for the two negative opinions that flag a risk factor
    pub fn is_unfavorable(&self) -> bool {
        matches!(
            self,
            CouncilOpinion::Unfavorable | CouncilOpinion::VeryUnfavorable
        )
    }
}

// ============================================================================
// RAW RECORD
// ============================================================================

/// One student observation, pre-encoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub age: u32,
    pub sexe: Sex,
    pub niveau: SchoolLevel,
    pub redoublement: bool,
    pub statut_bourse: bool,
    pub moyenne_t1: f32,
    pub moyenne_t2: f32,
    pub nb_matieres_echec: u32,
    pub absences_t1: u32,
    pub absences_t2: u32,
    pub retards: u32,
    pub sanctions: u32,
    pub avis_conseil: CouncilOpinion,
}

impl RawRecord {
    /// Term-over-term change in the general average (T2 - T1)
    pub fn average_delta(&self) -> f32 {
        self.moyenne_t2 - self.moyenne_t1
    }

    /// Term-over-term change in unexcused absences (T2 - T1)
    pub fn absence_delta(&self) -> f32 {
        self.absences_t2 as f32 - self.absences_t1 as f32
    }

    /// Total unexcused absences over both terms
    pub fn absence_total(&self) -> f32 {
        (self.absences_t1 + self.absences_t2) as f32
    }
}

// ============================================================================
// TESTS
// ============================================================================
