//! Prediction History Recorder
//!
//! Append-only JSONL writer for prediction records.
//! Thread-safe, persistent, flushed per write.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;

use super::record::PredictionRecord;
use crate::logic::risk::rules::AT_RISK_THRESHOLD;

// ============================================================================
// RECORDER
// ============================================================================

/// Append-only JSONL recorder for predictions
pub struct HistoryRecorder {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl HistoryRecorder {
    /// Open (or create) the history file, creating parent directories
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::info!("Opened prediction history: {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Append one prediction record
    pub fn append(&self, record: &PredictionRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;

        // Flush for durability
        writer.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored records, in insertion order.
    /// Unparseable lines are skipped with a warning, not fatal.
    pub fn read_all(&self) -> std::io::Result<Vec<PredictionRecord>> {
        read_history(&self.path)
    }

    /// Summary statistics over the stored history
    pub fn stats(&self) -> std::io::Result<HistoryStats> {
        Ok(HistoryStats::from_records(&self.read_all()?))
    }
}

/// Read a history file without holding a recorder
pub fn read_history(path: &Path) -> std::io::Result<Vec<PredictionRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PredictionRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("skipping malformed history line: {}", e),
        }
    }

    Ok(records)
}

// ============================================================================
// STATS
// ============================================================================

/// Dashboard summary over stored predictions
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    /// Records with probability >= the at-risk threshold
    pub at_risk: usize,
    pub at_risk_rate: f32,
    pub mean_probability: f32,
}

impl HistoryStats {
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        let total = records.len();
        let at_risk = records
            .iter()
            .filter(|r| r.probability >= AT_RISK_THRESHOLD)
            .count();

        let (at_risk_rate, mean_probability) = if total > 0 {
            let sum: f32 = records.iter().map(|r| r.probability).sum();
            (at_risk as f32 / total as f32, sum / total as f32)
        } else {
            (0.0, 0.0)
        };

        Self {
            total,
            at_risk,
            at_risk_rate,
            mean_probability,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
