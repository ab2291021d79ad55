//! Character-level tokenizer baseline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::{Result, TokenizerError};
use super::traits::{TokenId, Tokenizer};

/// Reserved padding ID; real character IDs start at 1.
const PAD_ID: TokenId = 0;

/// Trainable character-level tokenizer.
///
/// Vocabulary is built from a corpus with IDs assigned by descending
/// frequency (ties broken by code point) so the same corpus always yields
/// the same vocabulary. ID 0 is reserved for padding. Characters outside
/// the vocabulary are skipped on encode, matching the usual char-baseline
/// behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharTokenizer {
    vocab: HashMap<char, TokenId>,
    id_to_char: HashMap<TokenId, char>,
    trained: bool,
}

impl CharTokenizer {
    /// Create an untrained tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vocab: HashMap::new(),
            id_to_char: HashMap::new(),
            trained: false,
        }
    }

    /// Build the vocabulary from a corpus.
    pub fn train(&mut self, corpus: &[&str]) {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for text in corpus {
            for c in text.chars() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }

        let mut chars: Vec<(char, usize)> = counts.into_iter().collect();
        chars.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        self.vocab.clear();
        self.id_to_char.clear();
        for (id, (c, _)) in chars.into_iter().enumerate() {
            let id = id as TokenId + 1; // 0 is PAD
            self.vocab.insert(c, id);
            self.id_to_char.insert(id, c);
        }
        self.trained = true;
    }

    /// Build a tokenizer directly from a corpus.
    #[must_use]
    pub fn from_corpus(corpus: &[&str]) -> Self {
        let mut tokenizer = Self::new();
        tokenizer.train(corpus);
        tokenizer
    }
}

impl Default for CharTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        if !self.trained {
            return Err(TokenizerError::NotTrained);
        }

        Ok(text.chars().filter_map(|c| self.vocab.get(&c).copied()).collect())
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        if !self.trained {
            return Err(TokenizerError::NotTrained);
        }

        let mut out = String::with_capacity(ids.len());
        for &id in ids {
            if id == PAD_ID {
                continue;
            }
            let c = self
                .id_to_char
                .get(&id)
                .ok_or(TokenizerError::InvalidTokenId(id))?;
            out.push(*c);
        }
        Ok(out)
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len() + 1 // plus PAD
    }

    fn pad_id(&self) -> TokenId {
        PAD_ID
    }
}
