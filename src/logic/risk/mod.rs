//! Risk Module - Rule-Based Explanations & Banding
//!
//! Independent of the trained model: rules read the raw record directly,
//! banding reads the predicted probability.

pub mod rules;
pub mod extractor;

// Re-export common types
pub use extractor::{extract, RiskFactor};
pub use rules::{RiskLevel, RiskThresholds};
