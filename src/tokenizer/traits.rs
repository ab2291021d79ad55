//! Tokenizer trait definition.

use super::error::Result;

/// Token ID type
pub type TokenId = u32;

/// Seam for the external tokenizer.
///
/// Implementations must be deterministic: encoding the same text twice
/// yields the same IDs.
pub trait Tokenizer: Send + Sync {
    /// Encode text to token IDs
    fn encode(&self, text: &str) -> Result<Vec<TokenId>>;

    /// Decode token IDs back to text
    fn decode(&self, ids: &[TokenId]) -> Result<String>;

    /// Vocabulary size (including reserved specials)
    fn vocab_size(&self) -> usize;

    /// Padding token ID
    fn pad_id(&self) -> TokenId;
}
