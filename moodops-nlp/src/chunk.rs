//! Token-window chunking for text longer than the classifier input limit.

use crate::codec::TokenCodec;
use crate::error::{ConfigError, Result};

/// Default window size in tokens (DistilBERT input limit)
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Configuration for text chunking.
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct ChunkConfig {
    /// Maximum tokens per line or chunk
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ChunkConfig {
    /// Create a new chunk configuration.
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// Reject window sizes that cannot hold a single token.
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(self.max_tokens).into());
        }
        Ok(())
    }

    /// Window size left for content once the model's special tokens are added.
    pub fn content_tokens(&self, special_overhead: usize) -> usize {
        self.max_tokens.saturating_sub(special_overhead).max(1)
    }
}

/// Split text into consecutive windows of at most `max_tokens` tokens.
///
/// Tokens are encoded without special tokens and each window is decoded on its
/// own. Windows cover the input in order without overlap; the trailing window
/// may be shorter than `max_tokens` and is still emitted.
pub fn chunk_text<C>(codec: &C, text: &str, max_tokens: usize) -> Result<Vec<String>>
where
    C: TokenCodec + ?Sized,
{
    ChunkConfig::new(max_tokens).validate()?;

    let ids = codec.encode(text, false)?;

    tracing::debug!(tokens = ids.len(), max_tokens, "chunking text");

    ids.chunks(max_tokens)
        .map(|window| codec.decode(window))
        .collect()
}

/// Calculate the number of windows `chunk_text` produces for a token count.
pub fn estimate_chunk_count(token_count: usize, max_tokens: usize) -> usize {
    if max_tokens == 0 {
        return 0;
    }
    token_count.div_ceil(max_tokens)
}
