//! Analyze subcommand - classify the transcript of one video.

use crate::analyzer::{AnalysisError, Analyzer, AnalyzerConfig};
use crate::config::{ModelConfig, load_classifier};
use crate::present::{OutputFormat, render_json, render_text};
use color_eyre::Section;
use eyre::{Report, Result};
use moodops_nlp::models::distilbert::DistilBertClassifier;
use moodops_yt::FetchError;
use moodops_yt::video_id::VideoId;
use moodops_yt::youtube::{FetchConfig, YoutubeTranscripts};
use std::time::Instant;

/// Analyzer backed by YouTube and the DistilBERT classifier.
pub type YoutubeAnalyzer = Analyzer<YoutubeTranscripts, DistilBertClassifier>;

/// Transcript retrieval and analysis flags shared by `analyze` and `serve`.
#[derive(clap::Args, Debug)]
pub struct AnalysisArgs {
    #[command(flatten)]
    pub fetch: FetchConfig,

    #[command(flatten)]
    pub analyzer: AnalyzerConfig,
}

/// CLI arguments for transcript analysis.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// YouTube video id or URL
    pub video: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub model: crate::cli::ModelArgs,
}

/// Resolved configuration for transcript analysis.
#[derive(Debug)]
pub struct Config {
    pub video_id: VideoId,
    pub format: OutputFormat,
    pub fetch: FetchConfig,
    pub analyzer: AnalyzerConfig,
    pub model: ModelConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let video_id = VideoId::parse(&args.video)
            .map_err(AnalysisError::from)
            .map_err(with_suggestion)?;

        args.analysis.analyzer.chunk.validate()?;

        Ok(Self {
            video_id,
            format: args.format,
            fetch: args.analysis.fetch,
            analyzer: args.analysis.analyzer,
            model: args.model.try_into()?,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let mut analyzer = build_analyzer(&config.model, config.fetch, config.analyzer)?;

    let s = Instant::now();

    let result = analyzer.analyze(&config.video_id);

    let d = s.elapsed();
    tracing::info!(
        video_id = %config.video_id,
        duration = %crate::config::format_secs(d.as_secs_f32()),
        "analysis finished"
    );

    match (config.format, result) {
        (OutputFormat::Json, result) => {
            println!("{}", render_json(&result));
            result.map(drop).map_err(with_suggestion)
        }
        (OutputFormat::Text, Ok(analysis)) => {
            println!("{}", render_text(&analysis));
            Ok(())
        }
        (OutputFormat::Text, Err(err)) => Err(with_suggestion(err)),
    }
}

/// Load the model and build an analyzer around it.
pub fn build_analyzer(
    model: &ModelConfig,
    fetch: FetchConfig,
    config: AnalyzerConfig,
) -> Result<YoutubeAnalyzer> {
    let classifier = load_classifier(model)?;
    let source = YoutubeTranscripts::new(fetch)?;

    Ok(Analyzer::new(source, classifier, config))
}

/// Attach a hint for failures the user can act on.
pub fn with_suggestion(err: AnalysisError) -> Report {
    let hint = match &err {
        AnalysisError::Fetch(FetchError::InvalidVideoId(_)) => {
            Some("pass an 11-character video id or a YouTube video URL")
        }
        AnalysisError::Fetch(FetchError::NoTranscriptFound { .. }) => {
            Some("pass --lang with one of the available languages")
        }
        AnalysisError::Fetch(FetchError::TranscriptsDisabled { .. })
        | AnalysisError::EmptyTranscript { .. } => Some("try a video that has captions"),
        AnalysisError::Fetch(FetchError::TooManyRequests | FetchError::RequestBlocked { .. }) => {
            Some("wait before retrying, or retry from a different network")
        }
        _ => None,
    };

    let report = Report::new(err);
    match hint {
        Some(hint) => report.suggestion(hint),
        None => report,
    }
}
