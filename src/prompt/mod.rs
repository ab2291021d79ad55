//! Chat-prompt formatting for triage records
//!
//! Builds the fixed `<|im_start|>` / `<|im_end|>` conversation template the
//! model is trained and queried with. Every training prompt carries exactly
//! one system, one user, and one assistant segment, in that order, each
//! opened and closed by its delimiter pair; the inference stop condition
//! relies on `<|im_end|>` appearing only at segment boundaries.
//!
//! Formatting is pure and deterministic: the same record always yields the
//! same bytes.

use crate::dataset::TriageRecord;

/// Segment-opening delimiter.
pub const IM_START: &str = "<|im_start|>";
/// Segment-closing delimiter.
pub const IM_END: &str = "<|im_end|>";

/// System prompt the model was tuned with.
pub const SYSTEM_PROMPT: &str = "Sen tıbbi aciliyet değerlendirmesi yapan bir asistansın.";

/// Prompt formatting errors.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Record is missing required field '{field}'")]
    MissingField { field: &'static str },
}

/// Format a record as a full supervised training prompt.
///
/// Optional fields render as empty strings in their slot; `symptoms` is
/// joined with `", "`. Only `input_text` is mandatory.
///
/// # Errors
/// Returns [`PromptError::MissingField`] when `input_text` is absent. No
/// other validation is performed.
pub fn format_training_prompt(record: &TriageRecord) -> Result<String, PromptError> {
    let input_text = record
        .input_text
        .as_deref()
        .ok_or(PromptError::MissingField {
            field: "input_text",
        })?;

    let symptoms = record.symptoms.join(", ");

    Ok(format!(
        "{IM_START}system\n{SYSTEM_PROMPT}\n{IM_END}\n\
         {IM_START}user\n\
         Hasta şikayeti: {input_text}\n\
         Tespit edilen semptomlar: {symptoms}\n\
         {IM_END}\n\
         {IM_START}assistant\n\
         Aciliyet Seviyesi: {}\n\
         Öneriler: {}\n\
         Değerlendirme: {}\n\
         {IM_END}",
        record.urgency_label, record.response, record.reasoning
    ))
}

/// Format a free-text complaint as an inference prompt.
///
/// The assistant segment is left open (the prompt ends with
/// `<|im_start|>assistant\n`) so the model completes it; generation stops at
/// the first `<|im_end|>` it produces.
#[must_use]
pub fn format_inference_prompt(complaint: &str) -> String {
    format!(
        "{IM_START}system\n{SYSTEM_PROMPT}\n{IM_END}\n\
         {IM_START}user\n\
         Hasta şikayeti: {complaint}\n\
         {IM_END}\n\
         {IM_START}assistant\n"
    )
}
