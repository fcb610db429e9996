//! Elite Vigilance Core - CLI Entry Point
//!
//! Reads one student record as JSON (file path or stdin), runs the
//! prediction pipeline, prints the outcome as JSON and appends it to the
//! history. Stays usable without the trained artifacts: risk factors are
//! rule-based and never need the model.

use std::io::Read;
use std::process::ExitCode;

use vigilance_core::constants;
use vigilance_core::logic::history::{HistoryRecorder, PredictionRecord};
use vigilance_core::logic::predict::{PredictError, PredictionEngine};
use vigilance_core::logic::record::RawRecord;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} core v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut input: Option<String> = None;
    let mut student_id: Option<String> = None;
    let mut store = true;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--student-id" => student_id = iter.next().cloned(),
            "--no-store" => store = false,
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => input = Some(other.to_string()),
        }
    }

    let raw = match read_input(input.as_deref()) {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("cannot read record: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let record: RawRecord = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(e) => {
            log::error!("malformed record: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let engine = PredictionEngine::init(&constants::get_model_path(), &constants::get_scaler_path());

    match engine.predict(&record) {
        Ok(result) => {
            if store {
                persist(&record, student_id, &result);
            }

            let labels: Vec<&str> = result.risk_factors.iter().map(|f| f.label()).collect();
            let out = serde_json::json!({
                "probability": result.probability,
                "risk_level": result.risk_level,
                "risk_factors": labels,
            });
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(PredictError::ModelUnavailable(e)) => {
            // Degraded mode: rule-based explanations still apply
            log::warn!("{}", e);
            let labels: Vec<&str> = engine
                .risk_factors(&record)
                .iter()
                .map(|f| f.label())
                .collect();
            let out = serde_json::json!({
                "probability": serde_json::Value::Null,
                "risk_factors": labels,
            });
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("prediction failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!(
        "Usage: vigilance-core [RECORD.json|-] [--student-id ID] [--no-store]\n\
         Reads a student record as JSON from a file (or stdin with '-')\n\
         and prints the dropout prediction as JSON."
    );
}

fn read_input(input: Option<&str>) -> std::io::Result<String> {
    match input {
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn persist(
    record: &RawRecord,
    student_id: Option<String>,
    result: &vigilance_core::logic::predict::PredictionResult,
) {
    let path = constants::get_history_path();
    match HistoryRecorder::open(&path) {
        Ok(recorder) => {
            let stored = PredictionRecord::new(student_id, record.clone(), result);
            if let Err(e) = recorder.append(&stored) {
                log::error!("failed to store prediction: {}", e);
            }
        }
        Err(e) => log::error!("history unavailable ({}): {}", path.display(), e),
    }
}
