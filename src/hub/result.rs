//! Publishing result and error types.

use std::fmt;

/// How the remote repository came to exist for this publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoCreation {
    /// Created fresh by this run
    Created,
    /// Already existed (HTTP 409); publish continues as an update
    AlreadyExisted,
}

/// Successful publish summary.
#[derive(Clone, Debug)]
pub struct PublishResult {
    /// Repository URL on the Hub
    pub repo_url: String,
    /// Repository ID
    pub repo_id: String,
    /// Number of model files uploaded (card and tags excluded)
    pub files_uploaded: usize,
    /// Whether this run updated an existing repository
    pub repo_existed: bool,
    /// Whether a model card was generated and uploaded
    pub model_card_generated: bool,
}

impl fmt::Display for PublishResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} files{})",
            if self.repo_existed { "Updated" } else { "Published" },
            self.repo_url,
            self.files_uploaded,
            if self.model_card_generated { " + model card" } else { "" }
        )
    }
}

/// Errors during publishing.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Authentication required: set HF_TOKEN or pass a token")]
    AuthRequired,

    #[error("Invalid repository ID '{repo_id}': must be 'owner/name'")]
    InvalidRepoId { repo_id: String },

    #[error("Model directory not found: {path}")]
    ModelDirMissing { path: String },

    #[error("No model files found in {path}")]
    NoFiles { path: String },

    #[error("Failed to create repository '{repo_id}': {message}")]
    RepoCreationFailed { repo_id: String, message: String },

    #[error("Failed to upload '{path}': {message}")]
    UploadFailed { path: String, message: String },

    #[error("HTTP error: {message}")]
    Http { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
