//! Triyaj CLI
//!
//! Stage-per-subcommand entry point for the triage fine-tuning pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Format and tokenize the dataset
//! triyaj prepare medical_data.json
//!
//! # Check a merged model directory
//! triyaj verify vol/merged_model
//!
//! # Inspect a model directory
//! triyaj info vol/merged_model
//!
//! # Package and extract the download archive
//! triyaj package vol/merged_model -o merged_medical_model.tar.gz
//! triyaj extract merged_medical_model.tar.gz
//!
//! # Upload to HuggingFace Hub
//! triyaj publish vol/merged_model -u dousery -n llama3-medical-turkish-emergency
//! ```

use clap::Parser;
use std::process::ExitCode;
use triyaj::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
