//! HuggingFace Hub publisher.
//!
//! Thin blocking client over the HF REST API: create (or reuse) the
//! repository, upload the model directory file by file, then the generated
//! model card and the tag list. An HTTP 409 from the create call is
//! classified as [`RepoCreation::AlreadyExisted`] and the publish continues
//! as an update.

use std::path::{Path, PathBuf};

use super::config::PublishConfig;
use super::model_card::ModelCard;
use super::result::{PublishError, PublishResult, RepoCreation};

const HF_API_BASE: &str = "https://huggingface.co/api";

/// File extensions considered part of the model artifact.
const MODEL_EXTENSIONS: [&str; 6] = ["safetensors", "gguf", "bin", "json", "txt", "model"];

/// Classify the create-repo response status.
///
/// 2xx means the repository was created; 409 means it already existed,
/// which is the recoverable collision. Anything else is fatal.
#[must_use]
pub(crate) fn classify_create_status(status: u16) -> Option<RepoCreation> {
    match status {
        200..=299 => Some(RepoCreation::Created),
        409 => Some(RepoCreation::AlreadyExisted),
        _ => None,
    }
}

/// Collect the top-level model files of a directory for upload.
///
/// Hidden files and non-artifact extensions are skipped. Returned paths are
/// paired with their name in the repository.
pub(crate) fn collect_model_files(
    dir: &Path,
) -> Result<Vec<(PathBuf, String)>, PublishError> {
    if !dir.is_dir() {
        return Err(PublishError::ModelDirMissing {
            path: dir.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let keep = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| MODEL_EXTENSIONS.contains(&ext));
        if keep {
            files.push((path, name));
        }
    }

    files.sort_by(|a, b| a.1.cmp(&b.1));
    if files.is_empty() {
        return Err(PublishError::NoFiles {
            path: dir.display().to_string(),
        });
    }
    Ok(files)
}

/// HuggingFace Hub publisher.
pub struct HfPublisher {
    config: PublishConfig,
    client: reqwest::blocking::Client,
    token: String,
}

impl HfPublisher {
    /// Create a publisher.
    ///
    /// # Errors
    /// Fails when no token can be resolved, the repo ID is not
    /// `owner/name`, or the HTTP client cannot be built.
    pub fn new(config: PublishConfig) -> Result<Self, PublishError> {
        let token = config
            .token
            .clone()
            .or_else(|| std::env::var("HF_TOKEN").ok())
            .ok_or(PublishError::AuthRequired)?;

        if config.repo_id.is_empty() || !config.repo_id.contains('/') {
            return Err(PublishError::InvalidRepoId {
                repo_id: config.repo_id.clone(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent("triyaj/0.1")
            .build()
            .map_err(|e| PublishError::Http {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            client,
            token,
        })
    }

    /// Repository URL on the Hub.
    #[must_use]
    pub fn repo_url(&self) -> String {
        format!("https://huggingface.co/{}", self.config.repo_id)
    }

    /// Create the repository, tolerating a name collision.
    ///
    /// POST `<https://huggingface.co/api/repos/create>`
    ///
    /// # Errors
    /// Any non-2xx status other than 409 is
    /// [`PublishError::RepoCreationFailed`].
    pub fn create_repo(&self) -> Result<RepoCreation, PublishError> {
        let url = format!("{HF_API_BASE}/repos/create");

        let mut body = serde_json::json!({
            "name": self.config.repo_name(),
            "type": "model",
            "private": self.config.private,
        });
        if let Some(owner) = self.config.repo_owner() {
            body["organization"] = serde_json::Value::String(owner.to_string());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| PublishError::Http {
                message: format!("Create repo request failed: {e}"),
            })?;

        let status = response.status().as_u16();
        classify_create_status(status).ok_or_else(|| {
            let body = response.text().unwrap_or_default();
            PublishError::RepoCreationFailed {
                repo_id: self.config.repo_id.clone(),
                message: format!("HTTP {status}: {body}"),
            }
        })
    }

    /// Upload a local file to the repository.
    ///
    /// # Errors
    /// Returns [`PublishError::UploadFailed`] naming the remote path.
    pub fn upload_file(&self, local_path: &Path, path_in_repo: &str) -> Result<(), PublishError> {
        let content = std::fs::read(local_path)?;
        self.upload_bytes(&content, path_in_repo)
    }

    /// Upload bytes directly to the repository.
    ///
    /// PUT `<https://huggingface.co/api/models/{repo_id}/upload/main/{path}>`
    ///
    /// # Errors
    /// Returns [`PublishError::UploadFailed`] naming the remote path.
    pub fn upload_bytes(&self, content: &[u8], path_in_repo: &str) -> Result<(), PublishError> {
        let url = format!(
            "{HF_API_BASE}/models/{}/upload/main/{path_in_repo}",
            self.config.repo_id
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/octet-stream")
            .body(content.to_vec())
            .send()
            .map_err(|e| PublishError::UploadFailed {
                path: path_in_repo.to_string(),
                message: format!("Upload request failed: {e}"),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            Err(PublishError::UploadFailed {
                path: path_in_repo.to_string(),
                message: format!("HTTP {status}: {body}"),
            })
        }
    }

    /// Full publish flow: create or reuse the repo, upload the model
    /// directory, then the model card, then `tags.json`.
    ///
    /// # Errors
    /// The 409 collision is absorbed into the update path; every other
    /// failure aborts.
    pub fn publish(
        &self,
        model_dir: &Path,
        model_card: Option<&ModelCard>,
    ) -> Result<PublishResult, PublishError> {
        let files = collect_model_files(model_dir)?;
        let creation = self.create_repo()?;

        let mut files_uploaded = 0;
        for (local_path, remote_path) in &files {
            self.upload_file(local_path, remote_path)?;
            files_uploaded += 1;
        }

        let model_card_generated = if let Some(card) = model_card {
            self.upload_bytes(card.to_markdown().as_bytes(), "README.md")?;
            true
        } else {
            false
        };

        let tags_json = serde_json::to_string(&serde_json::json!({ "tags": self.config.tags }))
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        self.upload_bytes(tags_json.as_bytes(), "tags.json")?;

        Ok(PublishResult {
            repo_url: self.repo_url(),
            repo_id: self.config.repo_id.clone(),
            files_uploaded,
            repo_existed: creation == RepoCreation::AlreadyExisted,
            model_card_generated,
        })
    }
}

impl std::fmt::Debug for HfPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfPublisher")
            .field("repo_id", &self.config.repo_id)
            .field("private", &self.config.private)
            .finish_non_exhaustive()
    }
}
