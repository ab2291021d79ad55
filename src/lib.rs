//! Triyaj: Turkish medical triage fine-tuning pipeline
//!
//! Orchestrates the full lifecycle of a LoRA fine-tune of a causal language
//! model on Turkish medical triage data:
//!
//! - Dataset loading and chat-prompt formatting
//! - Fixed-length tokenization for supervised fine-tuning
//! - Training driver around an external optimization loop
//! - Merged-model integrity verification
//! - tar.gz packaging of model directories
//! - Publishing to HuggingFace Hub with a generated model card
//! - Stateless single-turn inference with stop-marker truncation
//!
//! The GPU-bound collaborators (optimizer loop, weight merge, text
//! generation) sit behind the [`train::SftTrainer`], [`merge::ModelMerger`],
//! and [`infer::TextGenerator`] traits; this crate owns the configuration,
//! data plumbing, and every check around them.
//!
//! # Example
//!
//! ```
//! use triyaj::dataset::TriageRecord;
//! use triyaj::prompt::format_training_prompt;
//!
//! let record = TriageRecord {
//!     input_text: Some("Nefes darlığı var".to_string()),
//!     symptoms: vec!["öksürük".to_string()],
//!     urgency_label: "Acil".to_string(),
//!     response: "Hastaneye gidin".to_string(),
//!     reasoning: "Solunum sıkıntısı".to_string(),
//! };
//! let text = format_training_prompt(&record).unwrap();
//! assert!(text.contains("Hasta şikayeti: Nefes darlığı var"));
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod dataset;
#[cfg(feature = "hub-publish")]
pub mod hub;
pub mod infer;
pub mod lora;
pub mod merge;
pub mod prompt;
pub mod tokenizer;
pub mod train;

pub use config::PipelineConfig;
pub use dataset::TriageRecord;
pub use lora::LoraConfig;
pub use prompt::{format_inference_prompt, format_training_prompt};
pub use tokenizer::{TokenId, TokenizedExample, Tokenizer};
pub use train::TrainingArguments;

/// Crate-level error aggregating the per-stage error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Dataset(#[from] dataset::DatasetError),

    #[error(transparent)]
    Prompt(#[from] prompt::PromptError),

    #[error(transparent)]
    Tokenizer(#[from] tokenizer::TokenizerError),

    #[error(transparent)]
    Train(#[from] train::TrainError),

    #[error(transparent)]
    Merge(#[from] merge::MergeError),

    #[error(transparent)]
    Archive(#[from] archive::ArchiveError),

    #[cfg(feature = "hub-publish")]
    #[error(transparent)]
    Publish(#[from] hub::PublishError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Crate-level result type.
pub type Result<T> = std::result::Result<T, Error>;
