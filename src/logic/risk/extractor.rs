//! Risk Factor Extractor
//!
//! Pure rule evaluator over the raw record, independent of the trained
//! model. Rules run in a fixed order, each independently; every matching
//! rule contributes a label. Zero matches is a valid outcome.

use serde::{Deserialize, Serialize};

use super::rules::{
    FAILED_SUBJECTS_THRESHOLD, GRADE_DECLINE_DELTA, HIGH_ABSENCE_THRESHOLD,
    HIGH_LATENESS_THRESHOLD, LOW_AVERAGE_THRESHOLD, SANCTIONS_THRESHOLD,
};
use crate::logic::record::RawRecord;

// ============================================================================
// RISK FACTORS
// ============================================================================

/// Human-readable risk explanation. Display labels match the wording used
/// in the historical reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    GradeDecline,
    InsufficientAverage,
    ManyFailedSubjects,
    HighAbsenteeism,
    IncreasingAbsences,
    FrequentLateness,
    BehavioralProblems,
    UnfavorableCouncilOpinion,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::GradeDecline => "Baisse significative des résultats scolaires",
            RiskFactor::InsufficientAverage => "Moyenne générale insuffisante",
            RiskFactor::ManyFailedSubjects => "Nombre élevé de matières en échec",
            RiskFactor::HighAbsenteeism => "Taux d'absentéisme élevé",
            RiskFactor::IncreasingAbsences => "Augmentation des absences",
            RiskFactor::FrequentLateness => "Nombre important de retards",
            RiskFactor::BehavioralProblems => "Problèmes de comportement",
            RiskFactor::UnfavorableCouncilOpinion => "Avis défavorable du conseil de classe",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Evaluate all rules against a record, in rule order
pub fn extract(record: &RawRecord) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if record.average_delta() < GRADE_DECLINE_DELTA {
        factors.push(RiskFactor::GradeDecline);
    }

    if record.moyenne_t2 < LOW_AVERAGE_THRESHOLD {
        factors.push(RiskFactor::InsufficientAverage);
    }

    if record.nb_matieres_echec > FAILED_SUBJECTS_THRESHOLD {
        factors.push(RiskFactor::ManyFailedSubjects);
    }

    if record.absences_t2 > HIGH_ABSENCE_THRESHOLD {
        factors.push(RiskFactor::HighAbsenteeism);
    }
    if record.absences_t2 > record.absences_t1 {
        factors.push(RiskFactor::IncreasingAbsences);
    }

    if record.retards > HIGH_LATENESS_THRESHOLD {
        factors.push(RiskFactor::FrequentLateness);
    }

    if record.sanctions > SANCTIONS_THRESHOLD {
        factors.push(RiskFactor::BehavioralProblems);
    }

    if record.avis_conseil.is_unfavorable() {
        factors.push(RiskFactor::UnfavorableCouncilOpinion);
    }

    factors
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::record::{CouncilOpinion, SchoolLevel, Sex};

    fn base_record() -> RawRecord {
        RawRecord {
            age: 17,
            sexe: Sex::Male,
            niveau: SchoolLevel::Grade3,
            redoublement: false,
            statut_bourse: false,
            moyenne_t1: 70.0,
            moyenne_t2: 72.0,
            nb_matieres_echec: 0,
            absences_t1: 1,
            absences_t2: 1,
            retards: 0,
            sanctions: 0,
            avis_conseil: CouncilOpinion::Favorable,
        }
    }

    #[test]
    fn test_no_factors_for_good_student() {
        assert!(extract(&base_record()).is_empty());
    }

    #[test]
    fn test_struggling_student_scenario() {
        // T2 average 45, 4 failed subjects, absences 12 > 2, lateness 1,
        // sanctions 0, opinion Passable
        let mut record = base_record();
        record.moyenne_t1 = 48.0;
        record.moyenne_t2 = 45.0;
        record.nb_matieres_echec = 4;
        record.absences_t1 = 2;
        record.absences_t2 = 12;
        record.retards = 1;
        record.sanctions = 0;
        record.avis_conseil = CouncilOpinion::Passable;

        let factors = extract(&record);
        assert_eq!(
            factors,
            vec![
                RiskFactor::InsufficientAverage,
                RiskFactor::ManyFailedSubjects,
                RiskFactor::HighAbsenteeism,
                RiskFactor::IncreasingAbsences,
            ]
        );
        assert!(!factors.contains(&RiskFactor::FrequentLateness));
        assert!(!factors.contains(&RiskFactor::BehavioralProblems));
        assert!(!factors.contains(&RiskFactor::UnfavorableCouncilOpinion));
    }

    #[test]
    fn test_grade_decline_is_strict() {
        let mut record = base_record();
        record.moyenne_t1 = 70.0;
        record.moyenne_t2 = 65.0; // delta exactly -5: not flagged
        assert!(!extract(&record).contains(&RiskFactor::GradeDecline));

        record.moyenne_t2 = 64.5; // delta -5.5: flagged
        assert!(extract(&record).contains(&RiskFactor::GradeDecline));
    }

    #[test]
    fn test_unfavorable_opinions_flagged() {
        for opinion in [CouncilOpinion::Unfavorable, CouncilOpinion::VeryUnfavorable] {
            let mut record = base_record();
            record.avis_conseil = opinion;
            assert!(extract(&record).contains(&RiskFactor::UnfavorableCouncilOpinion));
        }
    }

    #[test]
    fn test_unknown_opinion_does_not_error() {
        let mut record = base_record();
        record.avis_conseil = CouncilOpinion::Unknown;
        assert!(extract(&record).is_empty());
    }

    #[test]
    fn test_all_rules_can_fire_together() {
        let record = RawRecord {
            age: 19,
            sexe: Sex::Female,
            niveau: SchoolLevel::Grade4,
            redoublement: true,
            statut_bourse: false,
            moyenne_t1: 55.0,
            moyenne_t2: 40.0,
            nb_matieres_echec: 6,
            absences_t1: 5,
            absences_t2: 15,
            retards: 12,
            sanctions: 4,
            avis_conseil: CouncilOpinion::VeryUnfavorable,
        };

        let factors = extract(&record);
        assert_eq!(factors.len(), 8);
        assert_eq!(factors[0], RiskFactor::GradeDecline);
        assert_eq!(factors[7], RiskFactor::UnfavorableCouncilOpinion);
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            RiskFactor::InsufficientAverage.label(),
            "Moyenne générale insuffisante"
        );
        assert_eq!(
            RiskFactor::HighAbsenteeism.to_string(),
            "Taux d'absentéisme élevé"
        );
    }
}
