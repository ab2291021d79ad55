//! Publish command: upload a merged model to HuggingFace Hub.
//!
//! Values not supplied as flags are read interactively (token, model
//! directory, username, model name), and the upload requires a yes/no
//! confirmation unless `--yes` is passed. Anything not beginning with "y"
//! aborts the upload.

use std::io::Write;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PublishArgs;

/// Whether an answer confirms the upload.
fn confirmed(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}

/// Read one interactive line, with a prompt.
fn prompt_line(message: &str) -> Result<String, String> {
    print!("{message}");
    std::io::stdout()
        .flush()
        .map_err(|e| format!("stdout: {e}"))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("stdin: {e}"))?;
    Ok(line.trim().to_string())
}

fn resolve(flag: Option<String>, message: &str) -> Result<String, String> {
    match flag {
        Some(value) => Ok(value),
        None => prompt_line(message),
    }
}

pub fn run_publish(args: PublishArgs, level: LogLevel) -> Result<(), String> {
    let token = match args.token.clone().or_else(|| std::env::var("HF_TOKEN").ok()) {
        Some(token) => token,
        None => prompt_line("HF Token (write yetkili): ")?,
    };

    let model_dir = match args.model_dir.clone() {
        Some(dir) => dir,
        None => prompt_line("Model klasörü yolu (örn: ./merged_model): ")?.into(),
    };
    if !model_dir.exists() {
        return Err(format!("Model directory not found: {}", model_dir.display()));
    }

    let username = resolve(args.username.clone(), "Hugging Face kullanıcı adınız: ")?;
    let default_name = "llama3-medical-turkish-emergency";
    let name = match args.name.clone() {
        Some(name) => name,
        None => {
            let entered = prompt_line(&format!("Model adı (default: {default_name}): "))?;
            if entered.is_empty() {
                default_name.to_string()
            } else {
                entered
            }
        }
    };
    let repo_id = format!("{username}/{name}");

    if !args.yes {
        let answer = prompt_line(&format!(
            "{repo_id} adıyla upload yapmak istediğinizi onaylıyor musunuz? (y/N): "
        ))?;
        if !confirmed(&answer) {
            log(level, LogLevel::Normal, "Upload iptal edildi");
            return Ok(());
        }
    }

    do_publish(&args, &repo_id, token, &model_dir, level)
}

#[cfg(feature = "hub-publish")]
fn do_publish(
    args: &PublishArgs,
    repo_id: &str,
    token: String,
    model_dir: &std::path::Path,
    level: LogLevel,
) -> Result<(), String> {
    use crate::hub::{HfPublisher, ModelCard, PublishConfig};
    use crate::lora::LoraConfig;
    use crate::merge::model_info;
    use crate::train::TrainingArguments;

    let mut config = PublishConfig::new(repo_id).with_token(token);
    config.private = args.private;

    let model_card = if args.no_model_card {
        None
    } else {
        let total_size_gb = model_info(model_dir)
            .ok()
            .map(|info| info.total_size as f64 / (1024.0 * 1024.0 * 1024.0));
        Some(ModelCard {
            repo_id: repo_id.to_string(),
            base_model: "unsloth/llama-3-8b-bnb-4bit".to_string(),
            license: config.license.clone(),
            tags: config.tags.clone(),
            lora: LoraConfig::default(),
            training: TrainingArguments::default(),
            total_size_gb,
        })
    };

    let publisher = HfPublisher::new(config).map_err(|e| format!("Publisher: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Publishing {} -> {repo_id}", model_dir.display()),
    );
    let result = publisher
        .publish(model_dir, model_card.as_ref())
        .map_err(|e| format!("Upload failed: {e}"))?;

    if result.repo_existed {
        log(
            level,
            LogLevel::Normal,
            "Repository zaten mevcut, güncellendi",
        );
    }
    log(level, LogLevel::Normal, &result.to_string());
    Ok(())
}

#[cfg(not(feature = "hub-publish"))]
fn do_publish(
    _args: &PublishArgs,
    _repo_id: &str,
    _token: String,
    _model_dir: &std::path::Path,
    _level: LogLevel,
) -> Result<(), String> {
    Err("Publishing requires the 'hub-publish' feature".to_string())
}
