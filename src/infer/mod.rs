//! Stateless single-turn inference
//!
//! Wraps a free-text complaint in the triage chat template with an open
//! assistant segment, asks the loaded model (behind [`TextGenerator`]) for a
//! bounded completion, and cuts the raw output at the first `<|im_end|>`.
//! Nothing is retained between calls.

use serde::{Deserialize, Serialize};

use crate::prompt::{format_inference_prompt, IM_END};

/// Sampling parameters for generation.
///
/// Defaults match the settings the triage model is served with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Completion length ceiling in tokens
    pub max_new_tokens: usize,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub top_p: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 150,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Inference errors.
#[derive(Debug, thiserror::Error)]
pub enum InferError {
    #[error("Empty complaint")]
    EmptyComplaint,

    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Seam for the loaded model's text generation.
pub trait TextGenerator {
    /// Produce a completion for `prompt`, bounded by `params`.
    ///
    /// The returned text is the raw continuation after the prompt; it may
    /// run past the stop marker; truncation is the caller's job.
    ///
    /// # Errors
    /// Returns [`InferError::GenerationFailed`] on any backend failure.
    fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<String, InferError>;
}

/// Cut generated text at the first stop marker and trim whitespace.
#[must_use]
pub fn truncate_at_stop(text: &str) -> &str {
    match text.find(IM_END) {
        Some(pos) => text[..pos].trim(),
        None => text.trim(),
    }
}

/// Answer a single complaint.
///
/// Each call is independent: the complaint is wrapped in the fixed template
/// with an empty assistant segment, generated once, and truncated at the
/// first `<|im_end|>`.
///
/// # Errors
/// Rejects an empty complaint; propagates generator failures.
pub fn answer_complaint(
    generator: &dyn TextGenerator,
    complaint: &str,
    params: &SamplingParams,
) -> Result<String, InferError> {
    if complaint.trim().is_empty() {
        return Err(InferError::EmptyComplaint);
    }

    let prompt = format_inference_prompt(complaint.trim());
    let raw = generator.generate(&prompt, params)?;
    Ok(truncate_at_stop(&raw).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generator that replays a canned completion and records the prompt.
    struct CannedGenerator {
        completion: String,
        seen_prompt: std::cell::RefCell<String>,
    }

    impl CannedGenerator {
        fn new(completion: &str) -> Self {
            Self {
                completion: completion.to_string(),
                seen_prompt: std::cell::RefCell::new(String::new()),
            }
        }
    }

    impl TextGenerator for CannedGenerator {
        fn generate(&self, prompt: &str, _params: &SamplingParams) -> Result<String, InferError> {
            *self.seen_prompt.borrow_mut() = prompt.to_string();
            Ok(self.completion.clone())
        }
    }

    #[test]
    fn test_answer_truncates_at_stop_marker() {
        let generator = CannedGenerator::new(
            "Aciliyet Seviyesi: Acil\nÖneriler: Hastaneye gidin\n<|im_end|>\n<|im_start|>user\nleftover",
        );

        let answer =
            answer_complaint(&generator, "Nefes darlığı var", &SamplingParams::default()).unwrap();
        assert_eq!(answer, "Aciliyet Seviyesi: Acil\nÖneriler: Hastaneye gidin");
        assert!(!answer.contains("<|im_end|>"));
        assert!(!answer.contains("leftover"));
    }

    #[test]
    fn test_answer_without_stop_marker_is_trimmed() {
        let generator = CannedGenerator::new("  Aciliyet Seviyesi: Normal  ");
        let answer =
            answer_complaint(&generator, "Hafif baş ağrısı", &SamplingParams::default()).unwrap();
        assert_eq!(answer, "Aciliyet Seviyesi: Normal");
    }

    #[test]
    fn test_prompt_wraps_complaint_with_open_assistant_segment() {
        let generator = CannedGenerator::new("x<|im_end|>");
        answer_complaint(&generator, "Karın ağrısı", &SamplingParams::default()).unwrap();

        let prompt = generator.seen_prompt.borrow();
        assert!(prompt.contains("Hasta şikayeti: Karın ağrısı"));
        assert!(prompt.ends_with("<|im_start|>assistant\n"));
    }

    #[test]
    fn test_empty_complaint_rejected() {
        let generator = CannedGenerator::new("never used");
        let err =
            answer_complaint(&generator, "   ", &SamplingParams::default()).unwrap_err();
        assert!(matches!(err, InferError::EmptyComplaint));
    }

    #[test]
    fn test_truncate_at_stop_first_occurrence() {
        assert_eq!(truncate_at_stop("a<|im_end|>b<|im_end|>c"), "a");
        assert_eq!(truncate_at_stop("no marker"), "no marker");
        assert_eq!(truncate_at_stop("<|im_end|>"), "");
    }

    #[test]
    fn test_default_sampling_params() {
        let params = SamplingParams::default();
        assert_eq!(params.max_new_tokens, 150);
        assert!((params.temperature - 0.7).abs() < f64::EPSILON);
        assert!((params.top_p - 0.9).abs() < f64::EPSILON);
    }
}
