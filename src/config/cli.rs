//! CLI types - Cli, Command, and per-command argument structs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Triyaj: Turkish medical triage fine-tuning pipeline
#[derive(Parser, Debug, Clone)]
#[command(name = "triyaj")]
#[command(version)]
#[command(
    about = "Dataset preparation, merge verification, packaging, and Hub publishing for the Turkish medical triage model"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Format and tokenize the triage dataset for training
    Prepare(PrepareArgs),

    /// Verify a merged model directory contains the essential files
    Verify(VerifyArgs),

    /// Show a model directory's file listing and sizes
    Info(InfoArgs),

    /// Package a model directory into a tar.gz archive
    Package(PackageArgs),

    /// List and extract a model archive
    Extract(ExtractArgs),

    /// Publish a model directory to HuggingFace Hub
    Publish(PublishArgs),
}

/// Arguments for the prepare command
#[derive(Parser, Debug, Clone)]
pub struct PrepareArgs {
    /// Path to the triage records JSON file
    #[arg(value_name = "DATA", default_value = "medical_data.json")]
    pub data: PathBuf,

    /// Pipeline config file (JSON); defaults reproduce the tuning run
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the volume directory artifacts are written to
    #[arg(short, long)]
    pub volume_dir: Option<PathBuf>,

    /// Override the fixed sequence length
    #[arg(long)]
    pub max_seq_length: Option<usize>,
}

/// Arguments for the verify command
#[derive(Parser, Debug, Clone)]
pub struct VerifyArgs {
    /// Merged model directory
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Model directory
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,
}

/// Arguments for the package command
#[derive(Parser, Debug, Clone)]
pub struct PackageArgs {
    /// Model directory to archive
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Output archive path
    #[arg(short, long, default_value = "merged_medical_model.tar.gz")]
    pub output: PathBuf,

    /// Name of the single top-level directory inside the archive
    #[arg(long, default_value = "merged_model")]
    pub top_level: String,
}

/// Arguments for the extract command
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// Archive to extract
    #[arg(value_name = "ARCHIVE", default_value = "merged_medical_model.tar.gz")]
    pub archive: PathBuf,

    /// Destination directory
    #[arg(short, long, default_value = ".")]
    pub dest: PathBuf,
}

/// Arguments for the publish command
///
/// Any value not given as a flag is read interactively, so the command can
/// run with no flags at all.
#[derive(Parser, Debug, Clone)]
pub struct PublishArgs {
    /// Model directory to upload
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Hub username/owner
    #[arg(short, long)]
    pub username: Option<String>,

    /// Model name (repository name under the owner)
    #[arg(short, long)]
    pub name: Option<String>,

    /// API token (falls back to HF_TOKEN, then an interactive prompt)
    #[arg(long)]
    pub token: Option<String>,

    /// Create the repository as private
    #[arg(long)]
    pub private: bool,

    /// Skip the upload confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Skip model card generation
    #[arg(long)]
    pub no_model_card: bool,
}
