//! Core traits for sentiment pipeline components.

use crate::codec::TokenCodec;
use crate::error::Result;
use crate::types::Sentiment;

/// Sentiment classifier over single pieces of text.
///
/// The classifier is also the codec for its own input, so callers can check
/// token budgets with the same tokenizer the model uses.
pub trait SentimentModel: TokenCodec {
    /// Classify one piece of text.
    ///
    /// Note: Takes `&mut self` because ONNX Runtime's Session::run requires it.
    fn classify(&mut self, text: &str) -> Result<Sentiment>;
}

impl<M: SentimentModel + ?Sized> SentimentModel for &mut M {
    fn classify(&mut self, text: &str) -> Result<Sentiment> {
        (**self).classify(text)
    }
}

impl<C: TokenCodec + ?Sized> TokenCodec for &mut C {
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        (**self).encode(text, add_special_tokens)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        (**self).decode(ids)
    }
}
