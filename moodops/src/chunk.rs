//! Chunk subcommand - show how text splits into model-sized token windows.

use crate::config::{ModelConfig, load_tokenizer};
use eyre::{Result, WrapErr};
use moodops_nlp::chunk::{ChunkConfig, chunk_text, estimate_chunk_count};
use moodops_nlp::codec::TokenCodec;
use std::path::PathBuf;

/// CLI arguments for text chunking.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Text to split (default: read stdin)
    pub text: Option<String>,

    /// Read text from a file instead
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub chunk_config: ChunkConfig,

    #[command(flatten)]
    pub model: crate::cli::ModelArgs,
}

/// Where the text comes from.
#[derive(Debug)]
pub enum Input {
    Text(String),
    File(PathBuf),
    Stdin,
}

/// Resolved configuration for text chunking.
#[derive(Debug)]
pub struct Config {
    pub input: Input,
    pub chunk_config: ChunkConfig,
    pub model: ModelConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        args.chunk_config.validate()?;

        let input = match (args.text, args.file) {
            (Some(text), _) => Input::Text(text),
            (None, Some(path)) => Input::File(path),
            (None, None) => Input::Stdin,
        };

        Ok(Self {
            input,
            chunk_config: args.chunk_config,
            model: args.model.try_into()?,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let text = match config.input {
        Input::Text(text) => text,
        Input::File(path) => std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read text: {:?}", path.display()))?,
        Input::Stdin => std::io::read_to_string(std::io::stdin()).wrap_err("failed to read stdin")?,
    };

    let tokenizer = load_tokenizer(&config.model)?;

    let overhead = tokenizer.special_token_overhead()?;
    let window = config.chunk_config.content_tokens(overhead);
    let tokens = TokenCodec::encode(&tokenizer, &text, false)?.len();

    tracing::info!(
        tokens,
        window,
        chunks = estimate_chunk_count(tokens, window),
        "splitting text"
    );

    let chunks = chunk_text(&tokenizer, &text, window)?;

    for (i, chunk) in chunks.iter().enumerate() {
        let count = tokenizer.token_count(chunk)?;
        println!("--- chunk {} ({count} tokens) ---", i + 1);
        println!("{chunk}");
    }

    Ok(())
}
