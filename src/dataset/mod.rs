//! Triage training records
//!
//! Loads the medical triage corpus from a JSON array file
//! (`medical_data.json` shape). Each record is independent; no ordering or
//! uniqueness is assumed across records.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single labeled triage sample.
///
/// Only `input_text` is required downstream; every other field defaults to
/// empty when absent from the source file so that partially labeled records
/// still format cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageRecord {
    /// Patient complaint text (required by the prompt formatter)
    #[serde(default)]
    pub input_text: Option<String>,
    /// Detected symptoms, joined with ", " at format time
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Urgency label (e.g. "Acil", "Normal")
    #[serde(default)]
    pub urgency_label: String,
    /// Recommended action for the patient
    #[serde(default)]
    pub response: String,
    /// Free-text clinical reasoning behind the label
    #[serde(default)]
    pub reasoning: String,
}

/// Corpus-level statistics, printed by the prepare command.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    /// Total number of records
    pub total: usize,
    /// Records with a non-empty complaint
    pub with_complaint: usize,
    /// Average complaint length in chars (0 for an empty corpus)
    pub avg_complaint_len: usize,
    /// Distinct urgency labels, sorted
    pub urgency_labels: Vec<String>,
}

/// Dataset loading errors.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Data file not found: {path}: {source}")]
    FileNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },
}

/// Load triage records from a JSON array file.
///
/// # Errors
/// Returns [`DatasetError`] if the file cannot be read or is not a JSON
/// array of record objects.
pub fn load_records(path: &Path) -> Result<Vec<TriageRecord>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::FileNotFound {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| DatasetError::InvalidJson {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Compute corpus statistics.
#[must_use]
pub fn corpus_stats(records: &[TriageRecord]) -> CorpusStats {
    let complaints: Vec<&str> = records
        .iter()
        .filter_map(|r| r.input_text.as_deref())
        .filter(|t| !t.trim().is_empty())
        .collect();

    let avg_complaint_len = if complaints.is_empty() {
        0
    } else {
        complaints.iter().map(|t| t.len()).sum::<usize>() / complaints.len()
    };

    let mut urgency_labels: Vec<String> = records
        .iter()
        .map(|r| r.urgency_label.clone())
        .filter(|l| !l.is_empty())
        .collect();
    urgency_labels.sort();
    urgency_labels.dedup();

    CorpusStats {
        total: records.len(),
        with_complaint: complaints.len(),
        avg_complaint_len,
        urgency_labels,
    }
}
