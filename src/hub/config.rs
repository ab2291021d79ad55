//! Publishing configuration.

use serde::{Deserialize, Serialize};

/// Default tag set for the triage model.
pub const DEFAULT_TAGS: [&str; 7] = [
    "medical",
    "turkish",
    "emergency",
    "triage",
    "llama",
    "lora",
    "healthcare",
];

/// Configuration for publishing a model to HuggingFace Hub.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Repository ID ("owner/name")
    pub repo_id: String,
    /// Whether the repository should be private
    pub private: bool,
    /// License identifier for the model card
    pub license: String,
    /// Tags uploaded as `tags.json` and listed in the card frontmatter
    pub tags: Vec<String>,
    /// API token; resolved from `HF_TOKEN` when unset
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            repo_id: String::new(),
            private: false,
            license: "apache-2.0".to_string(),
            tags: DEFAULT_TAGS.iter().map(ToString::to_string).collect(),
            token: None,
        }
    }
}

impl PublishConfig {
    /// Create a config for a repository.
    #[must_use]
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            ..Default::default()
        }
    }

    /// Set the token explicitly.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Repository name (part after the last '/').
    #[must_use]
    pub fn repo_name(&self) -> &str {
        self.repo_id.rsplit('/').next().unwrap_or(&self.repo_id)
    }

    /// Owner/organization (part before the first '/').
    #[must_use]
    pub fn repo_owner(&self) -> Option<&str> {
        let mut parts = self.repo_id.splitn(2, '/');
        let owner = parts.next()?;
        parts.next().map(|_| owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_parts() {
        let config = PublishConfig::new("dousery/llama3-medical-turkish-emergency");
        assert_eq!(config.repo_name(), "llama3-medical-turkish-emergency");
        assert_eq!(config.repo_owner(), Some("dousery"));
    }

    #[test]
    fn test_bare_name_has_no_owner() {
        let config = PublishConfig::new("just-a-name");
        assert_eq!(config.repo_name(), "just-a-name");
        assert_eq!(config.repo_owner(), None);
    }

    #[test]
    fn test_defaults() {
        let config = PublishConfig::default();
        assert!(!config.private);
        assert_eq!(config.license, "apache-2.0");
        assert!(config.tags.contains(&"triage".to_string()));
    }
}
