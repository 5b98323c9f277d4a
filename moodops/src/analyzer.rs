//! Transcript analysis: fetch, split into lines, classify.

use moodops_nlp::chunk::{ChunkConfig, chunk_text};
use moodops_nlp::error::Error as NlpError;
use moodops_nlp::traits::SentimentModel;
use moodops_nlp::types::{Label, Sentiment};
use moodops_yt::FetchError;
use moodops_yt::transcript::{CaptionEntry, TranscriptSource};
use moodops_yt::video_id::VideoId;
use serde::Serialize;
use thiserror::Error;

/// What to do with a line longer than the token budget.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlongPolicy {
    /// Drop the line and count it as skipped
    #[default]
    Skip,
    /// Split the line into token windows and classify each one
    Chunk,
}

/// Analysis settings shared by every request.
#[derive(clap::Args, Clone, Copy, Debug, Default)]
pub struct AnalyzerConfig {
    #[command(flatten)]
    pub chunk: ChunkConfig,

    /// Handling of lines longer than --max-tokens
    #[arg(long, value_enum, default_value_t = OverlongPolicy::Skip)]
    pub overlong: OverlongPolicy,
}

/// Classification of one transcript line (or one window of it).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineResult {
    pub line: String,
    pub label: Label,
    pub score: f32,
}

impl LineResult {
    pub fn new(line: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            line: line.into(),
            label: sentiment.label,
            score: sentiment.score,
        }
    }
}

/// Per-line results for one video.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub video_id: String,
    pub results: Vec<LineResult>,
    /// Over-budget lines dropped under [`OverlongPolicy::Skip`]
    pub skipped: usize,
}

/// Why a video could not be analyzed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("transcript for video {video_id} is empty")]
    EmptyTranscript { video_id: String },

    #[error("failed to classify line {line}: {source}")]
    Classification {
        /// 1-based line number within the joined transcript
        line: usize,
        #[source]
        source: NlpError,
    },
}

impl AnalysisError {
    /// Stable short tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Fetch(_) => "fetch",
            AnalysisError::EmptyTranscript { .. } => "empty_transcript",
            AnalysisError::Classification { .. } => "classification",
        }
    }
}

/// Fetches transcripts and classifies them line by line.
///
/// Owns its transcript source and model; build it once and reuse it for
/// every request.
pub struct Analyzer<S, M> {
    source: S,
    model: M,
    config: AnalyzerConfig,
}

impl<S, M> Analyzer<S, M>
where
    S: TranscriptSource,
    M: SentimentModel,
{
    pub fn new(source: S, model: M, config: AnalyzerConfig) -> Self {
        Self {
            source,
            model,
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Fetch the transcript of `video_id` and classify every non-blank line.
    ///
    /// Any fetch or classification failure aborts the whole analysis.
    pub fn analyze(&mut self, video_id: &VideoId) -> Result<Analysis, AnalysisError> {
        tracing::info!(%video_id, "analyzing video");

        let entries = self.source.fetch(video_id)?;

        if entries.is_empty() {
            return Err(AnalysisError::EmptyTranscript {
                video_id: video_id.to_string(),
            });
        }

        let (results, skipped) = self.classify_entries(&entries)?;

        tracing::info!(
            %video_id,
            results = results.len(),
            skipped,
            "analysis completed"
        );

        Ok(Analysis {
            video_id: video_id.to_string(),
            results,
            skipped,
        })
    }

    /// Classify caption entries, returning the results and the skipped count.
    pub fn classify_entries(
        &mut self,
        entries: &[CaptionEntry],
    ) -> Result<(Vec<LineResult>, usize), AnalysisError> {
        let text = entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let max_tokens = self.config.chunk.max_tokens;
        let mut results = Vec::new();
        let mut skipped = 0;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let number = index + 1;
            let fail = |source| AnalysisError::Classification {
                line: number,
                source,
            };

            let tokens = self.model.token_count(line).map_err(fail)?;

            if tokens <= max_tokens {
                let sentiment = self.model.classify(line).map_err(fail)?;
                results.push(LineResult::new(line, sentiment));
                continue;
            }

            match self.config.overlong {
                OverlongPolicy::Skip => {
                    tracing::warn!(line = number, tokens, max_tokens, "skipping over-long line");
                    skipped += 1;
                }
                OverlongPolicy::Chunk => {
                    let before = results.len();
                    skipped += self
                        .classify_windows(line, &mut results)
                        .map_err(fail)?;

                    tracing::debug!(
                        line = number,
                        tokens,
                        windows = results.len() - before,
                        "chunked over-long line"
                    );
                }
            }
        }

        Ok((results, skipped))
    }

    /// Classify each token window of an over-long line.
    ///
    /// Returns the number of windows that still exceed the budget after
    /// decoding and were dropped.
    fn classify_windows(
        &mut self,
        line: &str,
        results: &mut Vec<LineResult>,
    ) -> Result<usize, NlpError> {
        let overhead = self.model.special_token_overhead()?;
        let window = self.config.chunk.content_tokens(overhead);
        let mut dropped = 0;

        for chunk in chunk_text(&self.model, line, window)? {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }

            // Decoded text can re-tokenize differently
            if self.model.token_count(chunk)? > self.config.chunk.max_tokens {
                dropped += 1;
                continue;
            }

            let sentiment = self.model.classify(chunk)?;
            results.push(LineResult::new(chunk, sentiment));
        }

        Ok(dropped)
    }
}
