//! Text ↔ token id conversion.

use crate::error::Result;
use tokenizers::Tokenizer;

/// Maps text to token ids and back.
///
/// Token counts bound classifier input, so `token_count` includes the special
/// tokens the model sees (e.g. `[CLS]`/`[SEP]`).
pub trait TokenCodec {
    /// Encode text to token ids, optionally wrapping it in special tokens.
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>>;

    /// Decode token ids to text, skipping special tokens.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// Number of tokens the model input would have for `text`.
    fn token_count(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text, true)?.len())
    }

    /// Tokens added around every input by the model's post-processor.
    fn special_token_overhead(&self) -> Result<usize> {
        self.token_count("")
    }
}

impl TokenCodec for Tokenizer {
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        // `**self` reaches the inherent `TokenizerImpl` methods behind `Deref`
        let encoding = (**self).encode(text, add_special_tokens)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        Ok((**self).decode(ids, true)?)
    }
}
