//! Merge step and output verification
//!
//! Folding the adapter into the base weights is done by the serving
//! framework behind the [`ModelMerger`] trait. This module owns the check
//! that runs after the merger has written to disk: the output directory
//! must contain the essential files a consumer needs to load the model. A
//! missing file is a hard failure that enumerates every missing name.

use std::path::Path;

use serde::Serialize;

/// Files a merged model directory must contain to be loadable.
pub const ESSENTIAL_FILES: [&str; 3] = [
    "config.json",
    "model.safetensors.index.json",
    "tokenizer.json",
];

/// Merge errors.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Merge backend failed: {0}")]
    BackendFailed(String),

    #[error("Merged model directory not found: {path}")]
    OutputMissing { path: String },

    #[error("Missing essential files: {}", missing.join(", "))]
    MissingEssentialFiles { missing: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One file inside a model directory.
#[derive(Debug, Clone, Serialize)]
pub struct ModelFile {
    /// Path relative to the model directory
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Recursive listing of a model directory.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Files sorted by relative path
    pub files: Vec<ModelFile>,
    /// Sum of all file sizes in bytes
    pub total_size: u64,
}

/// Seam for the external merge backend (base + adapter → consolidated).
pub trait ModelMerger {
    /// Merge the adapter into the base model and write the consolidated
    /// weight set (plus tokenizer/config files) into `output_dir`.
    ///
    /// # Errors
    /// Returns [`MergeError::BackendFailed`] on any backend failure.
    fn merge(
        &mut self,
        base_model: &str,
        adapter_dir: &Path,
        output_dir: &Path,
    ) -> Result<(), MergeError>;
}

/// Check that every essential file exists in a merged model directory.
///
/// # Errors
/// Returns [`MergeError::MissingEssentialFiles`] listing each absent name,
/// or [`MergeError::OutputMissing`] if the directory itself does not exist.
pub fn verify_essential_files(dir: &Path) -> Result<(), MergeError> {
    if !dir.exists() {
        return Err(MergeError::OutputMissing {
            path: dir.display().to_string(),
        });
    }

    let missing: Vec<String> = ESSENTIAL_FILES
        .iter()
        .filter(|name| !dir.join(name).exists())
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MergeError::MissingEssentialFiles { missing })
    }
}

/// Walk a model directory and collect relative paths with sizes.
///
/// # Errors
/// Returns [`MergeError::OutputMissing`] for an absent directory and IO
/// errors from the walk.
pub fn model_info(dir: &Path) -> Result<ModelInfo, MergeError> {
    if !dir.exists() {
        return Err(MergeError::OutputMissing {
            path: dir.display().to_string(),
        });
    }

    let mut files = Vec::new();
    collect_files(dir, dir, &mut files)?;
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let total_size = files.iter().map(|f| f.size).sum();
    Ok(ModelInfo { files, total_size })
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<ModelFile>) -> Result<(), MergeError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else {
            let name = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            out.push(ModelFile {
                name,
                size: entry.metadata()?.len(),
            });
        }
    }
    Ok(())
}

/// Trigger the merge backend, then verify the output it wrote.
///
/// # Errors
/// Propagates backend failures and the essential-file check; on success
/// returns the output listing so the caller can log it.
pub fn run_merge(
    merger: &mut dyn ModelMerger,
    base_model: &str,
    adapter_dir: &Path,
    output_dir: &Path,
) -> Result<ModelInfo, MergeError> {
    merger.merge(base_model, adapter_dir, output_dir)?;
    verify_essential_files(output_dir)?;
    model_info(output_dir)
}
