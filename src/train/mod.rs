//! Training driver
//!
//! The optimization loop itself is an external collaborator behind the
//! [`SftTrainer`] trait; this module owns the configuration handed to it and
//! the single-shot orchestration around it: format the corpus, tokenize it
//! to fixed length in dataset order, trigger the trainer once, and persist
//! the adapter artifacts. There is no checkpoint recovery; an interrupted
//! run restarts from scratch.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::TriageRecord;
use crate::lora::{LoraConfig, PeftAdapterConfig};
use crate::tokenizer::{encode_records, TokenizedExample, Tokenizer};

/// File name for the persisted training arguments.
pub const TRAINING_ARGS_FILE: &str = "training_args.json";

/// Training hyperparameters handed to the external optimizer loop.
///
/// Defaults are the values the triage model was tuned with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingArguments {
    /// Directory the adapter is persisted to
    pub output_dir: PathBuf,
    /// Per-device batch size
    pub per_device_batch_size: usize,
    /// Micro-batches accumulated before each optimizer update
    pub gradient_accumulation_steps: usize,
    /// Learning rate
    pub learning_rate: f64,
    /// Optimizer step budget (`None` defers to `num_epochs`)
    pub max_steps: Option<usize>,
    /// Epoch budget (`None` defers to `max_steps`)
    pub num_epochs: Option<usize>,
    /// Log progress every N steps
    pub logging_steps: usize,
    /// Weight decay
    pub weight_decay: f64,
    /// Fixed sequence length every example is padded/truncated to
    pub max_seq_length: usize,
    /// Random seed
    pub seed: u64,
}

impl Default for TrainingArguments {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("vol/finetuned"),
            per_device_batch_size: 1,
            gradient_accumulation_steps: 4,
            learning_rate: 2e-4,
            max_steps: Some(30),
            num_epochs: None,
            logging_steps: 5,
            weight_decay: 0.01,
            max_seq_length: 512,
            seed: 42,
        }
    }
}

impl TrainingArguments {
    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the step budget
    #[must_use]
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Validate the arguments.
    ///
    /// # Errors
    /// Returns [`TrainError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), TrainError> {
        if self.learning_rate <= 0.0 {
            return Err(TrainError::InvalidConfig(
                "learning_rate must be positive".to_string(),
            ));
        }
        if self.per_device_batch_size == 0 {
            return Err(TrainError::InvalidConfig(
                "per_device_batch_size must be greater than 0".to_string(),
            ));
        }
        if self.gradient_accumulation_steps == 0 {
            return Err(TrainError::InvalidConfig(
                "gradient_accumulation_steps must be greater than 0".to_string(),
            ));
        }
        if self.max_seq_length == 0 {
            return Err(TrainError::InvalidConfig(
                "max_seq_length must be greater than 0".to_string(),
            ));
        }
        if self.max_steps.is_none() && self.num_epochs.is_none() {
            return Err(TrainError::InvalidConfig(
                "either max_steps or num_epochs must be set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary returned by the external trainer after its loop finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    /// Optimizer steps actually executed
    pub steps_completed: usize,
    /// Final training loss, if the trainer reports one
    pub final_loss: Option<f64>,
    /// Number of examples the trainer consumed
    pub examples_seen: usize,
}

/// Training errors.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("Trainer failed: {0}")]
    TrainerFailed(String),

    #[error("Failed to persist adapter: {0}")]
    Persist(#[from] std::io::Error),
}

/// Seam for the external supervised fine-tuning loop.
///
/// Implementations own the model, the LoRA math, and the optimizer; the
/// driver only supplies tokenized examples and configuration, and triggers
/// the loop exactly once per run.
pub trait SftTrainer {
    /// Run the optimization loop over the full example set.
    ///
    /// # Errors
    /// Returns [`TrainError::TrainerFailed`] on any loop failure.
    fn train(
        &mut self,
        examples: &[TokenizedExample],
        args: &TrainingArguments,
    ) -> Result<TrainReport, TrainError>;

    /// Persist the trained adapter weights into `dir`.
    ///
    /// # Errors
    /// Returns [`TrainError`] if the weights cannot be written.
    fn save_adapter(&self, dir: &Path) -> Result<(), TrainError>;
}

/// Format, tokenize, and train in one pass, then persist the adapter.
///
/// Records are consumed in dataset order, never shuffled. On success the
/// output directory holds the trainer's
/// adapter weights plus `adapter_config.json` and `training_args.json`.
///
/// # Errors
/// Fails on invalid configuration, a record missing `input_text`, tokenizer
/// failure, trainer failure, or IO errors while persisting.
pub fn run_training(
    records: &[TriageRecord],
    tokenizer: &dyn Tokenizer,
    trainer: &mut dyn SftTrainer,
    lora: &LoraConfig,
    args: &TrainingArguments,
) -> crate::Result<TrainReport> {
    args.validate()?;
    lora.validate().map_err(TrainError::InvalidConfig)?;

    let examples = encode_records(tokenizer, records, args.max_seq_length)?;
    let report = trainer.train(&examples, args)?;

    std::fs::create_dir_all(&args.output_dir).map_err(TrainError::Persist)?;
    trainer.save_adapter(&args.output_dir)?;

    PeftAdapterConfig::from_lora_config(lora, None)
        .write_to_dir(&args.output_dir)
        .map_err(TrainError::Persist)?;

    let args_json = serde_json::to_string_pretty(args)
        .map_err(|e| crate::Error::Config(format!("Failed to serialize training args: {e}")))?;
    std::fs::write(args.output_dir.join(TRAINING_ARGS_FILE), args_json)
        .map_err(TrainError::Persist)?;

    Ok(report)
}

/// Write tokenized examples to disk for hand-off to a remote runner.
///
/// # Errors
/// Returns IO/serialization errors.
pub fn write_prepared_dataset(path: &Path, examples: &[TokenizedExample]) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(examples)
        .map_err(|e| crate::Error::Config(format!("Failed to serialize dataset: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}
