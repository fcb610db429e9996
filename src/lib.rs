//! Elite Vigilance Core - Dropout Prediction Pipeline
//!
//! Feature encoding, schema alignment, scaling and probability inference
//! for the dropout-risk model, plus rule-based risk-factor extraction.
//! The UI layer consumes this crate through [`logic::predict::PredictionEngine`].

pub mod constants;
pub mod logic;

pub use logic::predict::{PredictionEngine, PredictionResult, Predictor};
pub use logic::record::RawRecord;
pub use logic::risk::{RiskFactor, RiskLevel};
