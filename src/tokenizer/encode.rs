//! Fixed-length example encoding.
//!
//! Every example comes out at one fixed length: truncate from the end past
//! the configured maximum, right-pad with the pad ID when shorter, and copy
//! the input IDs verbatim into the labels. The whole sequence, system and
//! user turns included, contributes to the loss; any shifted loss masking
//! is owned by the external trainer.

use serde::{Deserialize, Serialize};

use crate::dataset::TriageRecord;
use crate::prompt::format_training_prompt;

use super::error::Result;
use super::traits::{TokenId, Tokenizer};

/// A tokenized training example of fixed length.
///
/// Invariant: `input_ids.len() == labels.len() == max_len` for the length
/// the example was encoded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedExample {
    /// Token IDs, truncated/padded to the configured maximum
    pub input_ids: Vec<TokenId>,
    /// Element-wise copy of `input_ids`
    pub labels: Vec<TokenId>,
}

/// Encode a formatted prompt into a fixed-length example.
///
/// # Errors
/// Propagates tokenizer failures (e.g. an unbuilt vocabulary).
pub fn encode_example(
    tokenizer: &dyn Tokenizer,
    text: &str,
    max_len: usize,
) -> Result<TokenizedExample> {
    let mut input_ids = tokenizer.encode(text)?;
    input_ids.truncate(max_len);
    input_ids.resize(max_len, tokenizer.pad_id());

    let labels = input_ids.clone();
    Ok(TokenizedExample { input_ids, labels })
}

/// Format and encode a full record set, in dataset order.
///
/// Records are not shuffled; batching order is whatever order the data file
/// had (see DESIGN.md).
///
/// # Errors
/// Fails on the first record missing `input_text` or on tokenizer failure.
pub fn encode_records(
    tokenizer: &dyn Tokenizer,
    records: &[TriageRecord],
    max_len: usize,
) -> crate::Result<Vec<TokenizedExample>> {
    let mut examples = Vec::with_capacity(records.len());
    for record in records {
        let text = format_training_prompt(record)?;
        examples.push(encode_example(tokenizer, &text, max_len)?);
    }
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CharTokenizer;
    use proptest::prelude::*;

    fn tokenizer() -> CharTokenizer {
        CharTokenizer::from_corpus(&[
            "<|im_start|>system user assistant<|im_end|>",
            "Hasta şikayeti: Nefes darlığı var, öksürük Aciliyet Seviyesi",
        ])
    }

    #[test]
    fn test_short_text_right_padded() {
        let t = tokenizer();
        let example = encode_example(&t, "Hasta", 32).unwrap();
        assert_eq!(example.input_ids.len(), 32);
        assert_eq!(example.labels.len(), 32);
        assert_eq!(*example.input_ids.last().unwrap(), t.pad_id());
    }

    #[test]
    fn test_long_text_truncated_from_end() {
        let t = tokenizer();
        let full = t.encode("Hasta şikayeti: Nefes darlığı var").unwrap();
        let example = encode_example(&t, "Hasta şikayeti: Nefes darlığı var", 8).unwrap();
        assert_eq!(example.input_ids.len(), 8);
        assert_eq!(example.input_ids, full[..8].to_vec());
    }

    #[test]
    fn test_labels_copy_input_ids() {
        let t = tokenizer();
        let example = encode_example(&t, "Nefes darlığı", 16).unwrap();
        assert_eq!(example.input_ids, example.labels);
    }

    #[test]
    fn test_encode_records_preserves_order() {
        use crate::dataset::TriageRecord;

        let t = tokenizer();
        let make = |text: &str| TriageRecord {
            input_text: Some(text.to_string()),
            symptoms: Vec::new(),
            urgency_label: String::new(),
            response: String::new(),
            reasoning: String::new(),
        };
        let records = vec![make("Nefes darlığı var"), make("Hasta")];

        let examples = encode_records(&t, &records, 64).unwrap();
        assert_eq!(examples.len(), 2);
        assert_ne!(examples[0], examples[1]);
        // Same record re-encodes identically
        let again = encode_records(&t, &records, 64).unwrap();
        assert_eq!(examples, again);
    }

    proptest! {
        #[test]
        fn prop_fixed_length_invariant(text in "[a-zA-Z :,]{0,200}", max_len in 1usize..128) {
            let t = CharTokenizer::from_corpus(&["abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ :,"]);
            let example = encode_example(&t, &text, max_len).unwrap();
            prop_assert_eq!(example.input_ids.len(), max_len);
            prop_assert_eq!(example.labels.len(), max_len);
            prop_assert_eq!(&example.input_ids, &example.labels);
        }
    }
}
