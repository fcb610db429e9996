//! Stored Prediction Record

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::predict::PredictionResult;
use crate::logic::record::RawRecord;
use crate::logic::risk::{RiskFactor, RiskLevel};

/// One persisted prediction: the original input plus the outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub recorded_at: DateTime<Utc>,
    pub school_year: String,
    /// Caller-assigned student identifier, if any
    pub student_id: Option<String>,
    pub record: RawRecord,
    pub probability: f32,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
}

impl PredictionRecord {
    pub fn new(
        student_id: Option<String>,
        record: RawRecord,
        result: &PredictionResult,
    ) -> Self {
        let now = Utc::now();
        Self {
            recorded_at: now,
            school_year: now.year().to_string(),
            student_id,
            record,
            probability: result.probability,
            risk_level: result.risk_level,
            risk_factors: result.risk_factors.clone(),
        }
    }
}
