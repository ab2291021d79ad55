//! Model card generation.
//!
//! Renders the descriptive README uploaded alongside the model: YAML
//! frontmatter for Hub indexing plus Turkish usage notes, the medical
//! disclaimer, and the training details.

use chrono::Utc;

use crate::lora::LoraConfig;
use crate::train::TrainingArguments;

/// Model card for the published triage model.
#[derive(Debug, Clone)]
pub struct ModelCard {
    /// Repository ID the card is published under
    pub repo_id: String,
    /// Base model the adapter was trained on
    pub base_model: String,
    /// License identifier for the frontmatter
    pub license: String,
    /// Frontmatter tags
    pub tags: Vec<String>,
    /// LoRA hyperparameters section
    pub lora: LoraConfig,
    /// Training parameters section
    pub training: TrainingArguments,
    /// Total artifact size in GiB, when known
    pub total_size_gb: Option<f64>,
}

impl ModelCard {
    /// Render the card as README markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        // Frontmatter
        out.push_str("---\n");
        out.push_str("language:\n- tr\n");
        out.push_str(&format!("license: {}\n", self.license));
        out.push_str("library_name: transformers\n");
        out.push_str("pipeline_tag: text-generation\n");
        out.push_str("tags:\n");
        for tag in &self.tags {
            out.push_str(&format!("- {tag}\n"));
        }
        out.push_str(&format!("base_model: {}\n", self.base_model));
        out.push_str("---\n\n");

        out.push_str("# Tıbbi Aciliyet Değerlendirme Modeli\n\n");
        out.push_str(&format!(
            "Bu model, `{}` temel modeli üzerine LoRA yöntemi ile Türkçe tıbbi aciliyet \
             verileri üzerinde fine-tune edilmiştir. Hasta şikayetlerini analiz ederek \
             aciliyet seviyesi değerlendirmesi yapar.\n\n",
            self.base_model
        ));

        if let Some(size) = self.total_size_gb {
            out.push_str(&format!("**Boyut**: ~{size:.1} GB\n\n"));
        }

        out.push_str("## Önemli Uyarı\n\n");
        out.push_str(
            "Bu model sadece eğitim ve araştırma amaçlıdır. Gerçek tıbbi durumlar için \
             kullanılmamalıdır; profesyonel tıbbi tavsiye yerine geçmez. Acil durumlarda \
             112'yi arayın.\n\n",
        );

        out.push_str("## LoRA Konfigürasyonu\n\n");
        out.push_str(&format!(
            "- **Rank (r)**: {}\n- **Alpha**: {}\n- **Dropout**: {}\n- **Target Modules**: {}\n- **Bias**: {}\n\n",
            self.lora.rank,
            self.lora.alpha,
            self.lora.dropout,
            self.lora.target_modules.join(", "),
            self.lora.bias
        ));

        out.push_str("## Eğitim Parametreleri\n\n");
        out.push_str(&format!(
            "- **Batch Size**: {} (gradient accumulation: {})\n- **Learning Rate**: {}\n",
            self.training.per_device_batch_size,
            self.training.gradient_accumulation_steps,
            self.training.learning_rate,
        ));
        if let Some(steps) = self.training.max_steps {
            out.push_str(&format!("- **Max Steps**: {steps}\n"));
        }
        out.push_str(&format!(
            "- **Max Length**: {} tokens\n\n",
            self.training.max_seq_length
        ));

        out.push_str("## Prompt Formatı\n\n");
        out.push_str(
            "```\n\
             <|im_start|>system\n\
             Sen tıbbi aciliyet değerlendirmesi yapan bir asistansın.\n\
             <|im_end|>\n\
             <|im_start|>user\n\
             Hasta şikayeti: [ŞİKAYET]\n\
             Tespit edilen semptomlar: [SEMPTOMLAR]\n\
             <|im_end|>\n\
             <|im_start|>assistant\n\
             Aciliyet Seviyesi: [SEVİYE]\n\
             Öneriler: [ÖNERİLER]\n\
             Değerlendirme: [AÇIKLAMA]\n\
             <|im_end|>\n\
             ```\n\n",
        );

        out.push_str(&format!(
            "**Son Güncelleme**: {}\n",
            Utc::now().format("%d %B %Y")
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> ModelCard {
        ModelCard {
            repo_id: "dousery/llama3-medical-turkish-emergency".to_string(),
            base_model: "unsloth/llama-3-8b-bnb-4bit".to_string(),
            license: "apache-2.0".to_string(),
            tags: vec!["medical".to_string(), "turkish".to_string()],
            lora: LoraConfig::default(),
            training: TrainingArguments::default(),
            total_size_gb: Some(15.2),
        }
    }

    #[test]
    fn test_frontmatter_fields() {
        let md = sample_card().to_markdown();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("language:\n- tr"));
        assert!(md.contains("license: apache-2.0"));
        assert!(md.contains("base_model: unsloth/llama-3-8b-bnb-4bit"));
        assert!(md.contains("- medical\n- turkish\n"));
    }

    #[test]
    fn test_card_carries_hyperparameters() {
        let md = sample_card().to_markdown();
        assert!(md.contains("**Rank (r)**: 16"));
        assert!(md.contains("gradient accumulation: 4"));
        assert!(md.contains("**Max Steps**: 30"));
        assert!(md.contains("~15.2 GB"));
    }

    #[test]
    fn test_card_contains_usage_warning_and_template() {
        let md = sample_card().to_markdown();
        assert!(md.contains("112'yi arayın"));
        assert!(md.contains("<|im_start|>assistant"));
    }
}
