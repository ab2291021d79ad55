//! LoRA adaptation configuration
//!
//! LoRA layers a small set of trainable low-rank matrices onto frozen base
//! weights; the optimizer only ever sees the adapter parameters. The actual
//! adapter math lives in the external trainer; this module owns the
//! configuration handed to it and the PEFT-compatible `adapter_config.json`
//! written next to saved adapter weights so the artifact loads directly in
//! `peft.PeftModel.from_pretrained()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the PEFT adapter configuration.
pub const ADAPTER_CONFIG_FILE: &str = "adapter_config.json";

/// LoRA hyperparameters.
///
/// Defaults are the values the triage model was tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoraConfig {
    /// Rank of the low-rank decomposition
    pub rank: usize,
    /// Scaling parameter (effective scale is alpha/rank)
    pub alpha: f32,
    /// Dropout applied to the adapter path during training
    pub dropout: f32,
    /// Names of the projection modules to adapt
    pub target_modules: Vec<String>,
    /// Bias handling: "none", "all", or "lora_only"
    pub bias: String,
    /// Random seed for adapter initialization
    pub seed: u64,
}

impl Default for LoraConfig {
    fn default() -> Self {
        Self {
            rank: 16,
            alpha: 16.0,
            dropout: 0.1,
            target_modules: [
                "q_proj", "k_proj", "v_proj", "o_proj", "gate_proj", "up_proj", "down_proj",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            bias: "none".to_string(),
            seed: 42,
        }
    }
}

impl LoraConfig {
    /// Set the rank
    #[must_use]
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = rank;
        self
    }

    /// Set alpha
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set dropout
    #[must_use]
    pub fn with_dropout(mut self, dropout: f32) -> Self {
        self.dropout = dropout;
        self
    }

    /// Validate hyperparameters.
    ///
    /// # Errors
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.rank == 0 {
            return Err("LoRA rank must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.dropout) {
            return Err(format!("LoRA dropout must be in [0, 1], got {}", self.dropout));
        }
        if self.target_modules.is_empty() {
            return Err("LoRA target_modules must not be empty".to_string());
        }
        Ok(())
    }
}

/// PEFT adapter configuration matching the HuggingFace PEFT schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeftAdapterConfig {
    /// PEFT method type (always "LORA" here)
    pub peft_type: String,
    /// LoRA rank
    pub r: usize,
    /// LoRA alpha scaling parameter
    pub lora_alpha: f32,
    /// Target module names, sorted for stable output
    pub target_modules: Vec<String>,
    /// LoRA dropout rate
    pub lora_dropout: f32,
    /// Bias handling
    pub bias: String,
    /// Base model name or path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_name_or_path: Option<String>,
    /// Task type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    /// Inference mode flag
    #[serde(default)]
    pub inference_mode: bool,
}

impl PeftAdapterConfig {
    /// Build the PEFT view of a [`LoraConfig`].
    #[must_use]
    pub fn from_lora_config(config: &LoraConfig, base_model: Option<&str>) -> Self {
        let mut target_modules = config.target_modules.clone();
        target_modules.sort();

        Self {
            peft_type: "LORA".to_string(),
            r: config.rank,
            lora_alpha: config.alpha,
            target_modules,
            lora_dropout: config.dropout,
            bias: config.bias.clone(),
            base_model_name_or_path: base_model.map(String::from),
            task_type: Some("CAUSAL_LM".to_string()),
            inference_mode: false,
        }
    }

    /// Write `adapter_config.json` into an adapter output directory.
    ///
    /// # Errors
    /// Returns IO errors from directory creation or the write itself.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(dir.join(ADAPTER_CONFIG_FILE), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuning_run() {
        let config = LoraConfig::default();
        assert_eq!(config.rank, 16);
        assert!((config.alpha - 16.0).abs() < f32::EPSILON);
        assert!((config.dropout - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.target_modules.len(), 7);
        assert_eq!(config.bias, "none");
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validate_rejects_zero_rank() {
        let config = LoraConfig::default().with_rank(0);
        assert!(config.validate().unwrap_err().contains("rank"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_dropout() {
        let config = LoraConfig::default().with_dropout(1.5);
        assert!(config.validate().unwrap_err().contains("dropout"));
    }

    #[test]
    fn test_peft_config_schema() {
        let peft =
            PeftAdapterConfig::from_lora_config(&LoraConfig::default(), Some("unsloth/llama-3-8b-bnb-4bit"));
        assert_eq!(peft.peft_type, "LORA");
        assert_eq!(peft.r, 16);
        assert_eq!(peft.task_type.as_deref(), Some("CAUSAL_LM"));

        let json = serde_json::to_string(&peft).unwrap();
        assert!(json.contains("\"q_proj\""));
        assert!(json.contains("unsloth/llama-3-8b-bnb-4bit"));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let adapter_dir = dir.path().join("finetuned");
        let peft = PeftAdapterConfig::from_lora_config(&LoraConfig::default(), None);

        peft.write_to_dir(&adapter_dir).unwrap();

        let content =
            std::fs::read_to_string(adapter_dir.join(ADAPTER_CONFIG_FILE)).unwrap();
        let parsed: PeftAdapterConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, peft);
    }
}
