//! Risk Rules & Thresholds
//!
//! Constants for the rule evaluator and the probability banding.
//! No extraction logic here - only thresholds and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// RULE THRESHOLDS (Constants)
// ============================================================================

/// Average delta (T2 - T1) below this flags a grade decline
pub const GRADE_DECLINE_DELTA: f32 = -5.0;

/// T2 average below this is insufficient
pub const LOW_AVERAGE_THRESHOLD: f32 = 50.0;

/// More failed subjects than this flags a risk
pub const FAILED_SUBJECTS_THRESHOLD: u32 = 3;

/// More T2 unexcused absences than this flags high absenteeism
pub const HIGH_ABSENCE_THRESHOLD: u32 = 10;

/// More latenesses than this flags a risk
pub const HIGH_LATENESS_THRESHOLD: u32 = 10;

/// More disciplinary sanctions than this flags behavioral problems
pub const SANCTIONS_THRESHOLD: u32 = 2;

// ============================================================================
// PROBABILITY BANDING
// ============================================================================

/// At or above this probability a student counts as "at risk" in the
/// history statistics
pub const AT_RISK_THRESHOLD: f32 = 0.5;

/// Default lower bound of the Moderate band
pub const MODERATE_MIN: f32 = 0.4;

/// Default lower bound of the High band
pub const HIGH_MIN: f32 = 0.7;

/// Probability bands shown to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Configurable band boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// At or above this = Moderate
    pub moderate_min: f32,
    /// At or above this = High
    pub high_min: f32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            moderate_min: MODERATE_MIN,
            high_min: HIGH_MIN,
        }
    }
}

impl RiskThresholds {
    /// High sensitivity - lower bounds, more students flagged
    pub fn high_sensitivity() -> Self {
        Self {
            moderate_min: 0.3,
            high_min: 0.6,
        }
    }
}

impl RiskLevel {
    /// Band a dropout probability with the default thresholds
    pub fn from_probability(probability: f32) -> Self {
        Self::from_probability_with(probability, &RiskThresholds::default())
    }

    pub fn from_probability_with(probability: f32, thresholds: &RiskThresholds) -> Self {
        if probability >= thresholds.high_min {
            RiskLevel::High
        } else if probability >= thresholds.moderate_min {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.4), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.69), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.7), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::High);
    }

    #[test]
    fn test_high_sensitivity_flags_earlier() {
        let thresholds = RiskThresholds::high_sensitivity();
        assert_eq!(
            RiskLevel::from_probability_with(0.65, &thresholds),
            RiskLevel::High
        );
        assert_eq!(RiskLevel::from_probability(0.65), RiskLevel::Moderate);
    }
}
