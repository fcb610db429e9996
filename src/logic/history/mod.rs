//! History Module - Prediction Persistence Collaborator
//!
//! Durable record of past predictions for the dashboard's history and
//! statistics pages. The prediction core only produces values; whether and
//! when to store them is the caller's decision.

pub mod record;
pub mod recorder;

// Re-export common types
pub use record::PredictionRecord;
pub use recorder::{HistoryRecorder, HistoryStats};
