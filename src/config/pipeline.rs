//! Pipeline configuration.
//!
//! One explicit config value passed into each stage. Defaults reproduce the
//! production tuning run; a JSON file can override any field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lora::LoraConfig;
use crate::train::TrainingArguments;

/// End-to-end pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Base model repository ID
    pub base_model: String,
    /// Path to the triage records file
    pub data_path: PathBuf,
    /// Shared storage directory the stages hand artifacts through
    pub volume_dir: PathBuf,
    /// LoRA hyperparameters
    pub lora: LoraConfig,
    /// Training hyperparameters
    pub training: TrainingArguments,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let volume_dir = PathBuf::from("vol");
        let training = TrainingArguments::default().with_output_dir(volume_dir.join("finetuned"));
        Self {
            base_model: "unsloth/llama-3-8b-bnb-4bit".to_string(),
            data_path: PathBuf::from("medical_data.json"),
            volume_dir,
            lora: LoraConfig::default(),
            training,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] naming the path on read or parse
    /// failure.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Config(format!("Cannot read config {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            crate::Error::Config(format!("Invalid config {}: {e}", path.display()))
        })
    }

    /// Directory the trained adapter lands in.
    #[must_use]
    pub fn adapter_dir(&self) -> PathBuf {
        self.volume_dir.join("finetuned")
    }

    /// Directory the merged model lands in.
    #[must_use]
    pub fn merged_dir(&self) -> PathBuf {
        self.volume_dir.join("merged_model")
    }

    /// Path of the prepared (tokenized) dataset hand-off file.
    #[must_use]
    pub fn prepared_dataset_path(&self) -> PathBuf {
        self.volume_dir.join("prepared_dataset.json")
    }
}
