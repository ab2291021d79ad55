//! Prepare command: format and tokenize the triage dataset.
//!
//! Produces the hand-off artifacts a GPU runner consumes: the tokenized
//! dataset and the training arguments, written into the volume directory.

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{PipelineConfig, PrepareArgs};
use crate::dataset::{corpus_stats, load_records};
use crate::prompt::format_training_prompt;
use crate::tokenizer::{encode_records, CharTokenizer};
use crate::train::{write_prepared_dataset, TRAINING_ARGS_FILE};

pub fn run_prepare(args: PrepareArgs, level: LogLevel) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path).map_err(|e| e.to_string())?,
        None => PipelineConfig::default(),
    };
    config.data_path = args.data.clone();
    if let Some(dir) = &args.volume_dir {
        config.volume_dir = dir.clone();
        config.training.output_dir = dir.join("finetuned");
    }
    if let Some(len) = args.max_seq_length {
        config.training.max_seq_length = len;
    }
    config.training.validate().map_err(|e| e.to_string())?;
    config.lora.validate()?;

    let records = load_records(&config.data_path).map_err(|e| e.to_string())?;
    let stats = corpus_stats(&records);
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Loaded {} record(s) from {} ({} with complaints)",
            stats.total,
            config.data_path.display(),
            stats.with_complaint
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Urgency labels: {}",
            if stats.urgency_labels.is_empty() {
                "(none)".to_string()
            } else {
                stats.urgency_labels.join(", ")
            }
        ),
    );

    // Vocabulary is built from the formatted prompts themselves so the
    // prepared IDs are self-consistent
    let mut texts = Vec::with_capacity(records.len());
    for record in &records {
        texts.push(format_training_prompt(record).map_err(|e| e.to_string())?);
    }
    let corpus: Vec<&str> = texts.iter().map(String::as_str).collect();
    let tokenizer = CharTokenizer::from_corpus(&corpus);

    let examples = encode_records(&tokenizer, &records, config.training.max_seq_length)
        .map_err(|e| e.to_string())?;

    let dataset_path = config.prepared_dataset_path();
    write_prepared_dataset(&dataset_path, &examples).map_err(|e| e.to_string())?;

    let args_path = config.volume_dir.join(TRAINING_ARGS_FILE);
    let args_json = serde_json::to_string_pretty(&config.training)
        .map_err(|e| format!("Failed to serialize training args: {e}"))?;
    std::fs::write(&args_path, args_json)
        .map_err(|e| format!("Failed to write {}: {e}", args_path.display()))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Prepared {} example(s) of length {} -> {}",
            examples.len(),
            config.training.max_seq_length,
            dataset_path.display()
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Training arguments -> {}", args_path.display()),
    );
    Ok(())
}
