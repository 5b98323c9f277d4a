//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use moodops_nlp::models::distilbert::DEFAULT_MODEL_ID;

#[derive(Debug, Parser)]
#[command(name = "mood")]
#[command(about = "Sentiment analysis of YouTube video transcripts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify every transcript line of a video and print a summary
    Analyze(crate::analyze::Args),

    /// Serve the analysis web form
    Serve(crate::serve::Args),

    /// Split text into token windows with the model tokenizer
    Chunk(crate::chunk::Args),
}

/// Where to load the classifier from.
#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Hugging Face model id or local directory
    #[arg(long = "model", value_name = "ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// How to resolve --model
    #[arg(long, value_enum, default_value_t = ModelSource::Auto)]
    pub model_source: ModelSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelSource {
    /// Local directory if it exists, otherwise the Hugging Face Hub
    Auto,
    /// Local directory
    Path,
    /// Hugging Face cache only (offline)
    Cache,
    /// Hugging Face Hub, downloading missing files
    Api,
}

/// Execute CLI command - separated for testing.
pub fn run(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Analyze(args) => crate::analyze::execute(args.try_into()?),
        Commands::Serve(args) => crate::serve::execute(args.try_into()?),
        Commands::Chunk(args) => crate::chunk::execute(args.try_into()?),
    }
}
