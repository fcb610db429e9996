//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default artifact location, only edit this file.

use std::path::PathBuf;

/// Default directory holding the trained artifacts (model + scaler)
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Trained classifier artifact (ONNX export of the fitted model)
pub const MODEL_FILE: &str = "modele_decrochage.onnx";

/// Fitted scaler artifact (per-column mean/scale, exported at training time)
pub const SCALER_FILE: &str = "scaler.json";

/// Prediction history file name
pub const HISTORY_FILE: &str = "predictions.jsonl";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Elite Vigilance";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the artifact directory from environment or use default
pub fn get_model_dir() -> PathBuf {
    std::env::var("VIGILANCE_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_DIR))
}

/// Full path to the model artifact
pub fn get_model_path() -> PathBuf {
    get_model_dir().join(MODEL_FILE)
}

/// Full path to the scaler artifact
pub fn get_scaler_path() -> PathBuf {
    get_model_dir().join(SCALER_FILE)
}

/// Get the prediction history path from environment or use default
///
/// Default: `<local data dir>/elite-vigilance/predictions.jsonl`
pub fn get_history_path() -> PathBuf {
    if let Ok(path) = std::env::var("VIGILANCE_HISTORY_FILE") {
        return PathBuf::from(path);
    }

    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("elite-vigilance")
        .join(HISTORY_FILE)
}
