//! Tokenization for supervised fine-tuning
//!
//! The real subword tokenizer ships with the base model and is owned by the
//! serving framework; this crate only needs the [`Tokenizer`] seam plus the
//! fixed-length encoding policy around it. A trainable character-level
//! [`CharTokenizer`] is included as a self-contained baseline so the
//! pipeline (and its tests) run without external vocabulary files.

mod char;
mod encode;
mod error;
mod traits;

pub use char::CharTokenizer;
pub use encode::{encode_example, encode_records, TokenizedExample};
pub use error::{Result, TokenizerError};
pub use traits::{TokenId, Tokenizer};
