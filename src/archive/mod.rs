//! Model packaging as gzip-compressed tape archives
//!
//! The published download artifact is a `.tar.gz` whose single top-level
//! entry is a named directory (`merged_model/` by default) holding the full
//! artifact tree. Extraction always lists the members first, so an operator
//! sees what a downloaded archive will write before it writes anything.

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

/// Archive errors.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Source directory not found: {path}")]
    SourceMissing { path: String },

    #[error("Archive not found: {path}")]
    ArchiveMissing { path: String },

    #[error("Invalid top-level name '{name}': must be a bare directory name")]
    InvalidTopLevel { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One member of an archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveEntry {
    /// Member path inside the archive
    pub name: String,
    /// Stored size in bytes
    pub size: u64,
}

/// Compress a directory tree into `archive_path`.
///
/// The archive's single top-level entry is `top_level/`, with the contents
/// of `model_dir` underneath it.
///
/// # Errors
/// Fails if the source directory is absent, the top-level name contains a
/// path separator, or the write fails.
pub fn create_archive(
    model_dir: &Path,
    archive_path: &Path,
    top_level: &str,
) -> Result<(), ArchiveError> {
    if !model_dir.is_dir() {
        return Err(ArchiveError::SourceMissing {
            path: model_dir.display().to_string(),
        });
    }
    if top_level.is_empty() || top_level.contains('/') || top_level.contains('\\') {
        return Err(ArchiveError::InvalidTopLevel {
            name: top_level.to_string(),
        });
    }

    if let Some(parent) = archive_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(archive_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    builder.append_dir_all(top_level, model_dir)?;
    builder.into_inner()?.finish()?;
    Ok(())
}

/// List archive members without extracting anything.
///
/// # Errors
/// Fails if the archive is absent or unreadable.
pub fn list_entries(archive_path: &Path) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    if !archive_path.is_file() {
        return Err(ArchiveError::ArchiveMissing {
            path: archive_path.display().to_string(),
        });
    }

    let file = File::open(archive_path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let mut entries = Vec::new();
    for entry in archive.entries()? {
        let entry = entry?;
        entries.push(ArchiveEntry {
            name: entry.path()?.display().to_string(),
            size: entry.size(),
        });
    }
    Ok(entries)
}

/// List, then extract an archive into `dest`.
///
/// Returns the member listing that was taken before extraction.
///
/// # Errors
/// Fails if the archive is absent or any member cannot be unpacked.
pub fn extract_archive(
    archive_path: &Path,
    dest: &Path,
) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let entries = list_entries(archive_path)?;

    std::fs::create_dir_all(dest)?;
    let file = File::open(archive_path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.unpack(dest)?;

    Ok(entries)
}
