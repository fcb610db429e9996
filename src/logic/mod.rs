//! Logic Module - Prediction Pipeline & Engines
//!
//! - `record` - Raw student observation and its categorical enums
//! - `schema` - Trained-model column catalog (order, numeric partition, hash)
//! - `features` - Feature encoding and schema alignment
//! - `model` - Classifier and scaler adapters (ONNX, fitted params)
//! - `predict` - Orchestration: encode -> align -> scale -> predict_proba
//! - `risk` - Rule-based risk-factor extraction and risk banding
//! - `history` - Append-only prediction history (persistence collaborator)

pub mod record;
pub mod schema;
pub mod features;
pub mod model;
pub mod predict;
pub mod risk;
pub mod history;
