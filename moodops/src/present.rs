//! Rendering analysis results as text or JSON.

use crate::analyzer::{Analysis, AnalysisError, Analyzer, LineResult};
use moodops_nlp::traits::SentimentModel;
use moodops_nlp::types::Label;
use moodops_yt::transcript::TranscriptSource;
use moodops_yt::video_id::VideoId;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

/// Output format for analysis results.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Line-by-line report followed by a summary
    #[default]
    Text,
    /// Single JSON object
    Json,
}

/// Label counts and percentages over a set of results.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
}

impl Summary {
    pub fn from_results(results: &[LineResult]) -> Self {
        let total = results.len();
        let positive = results
            .iter()
            .filter(|r| r.label == Label::Positive)
            .count();
        let negative = total - positive;

        Self {
            total,
            positive,
            negative,
            positive_pct: percent(positive, total),
            negative_pct: percent(negative, total),
        }
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Render a successful analysis as the line-by-line text report.
pub fn render_text(analysis: &Analysis) -> String {
    let mut out = String::new();

    for r in &analysis.results {
        let _ = write!(
            out,
            "Line: {}\nSentiment: {} (Score: {:.2})\n\n",
            r.line, r.label, r.score
        );
    }

    let summary = Summary::from_results(&analysis.results);
    let _ = write!(
        out,
        "Summary:\nPositive Responses: {} ({:.2}%)\nNegative Responses: {} ({:.2}%)\n",
        summary.positive, summary.positive_pct, summary.negative, summary.negative_pct
    );

    out.trim().to_string()
}

/// Render a failure as a single line.
pub fn render_error(err: &AnalysisError) -> String {
    format!("Error: {err}")
}

/// Render an analysis outcome in the requested format.
pub fn render(result: &Result<Analysis, AnalysisError>, format: OutputFormat) -> String {
    match (format, result) {
        (OutputFormat::Text, Ok(analysis)) => render_text(analysis),
        (OutputFormat::Text, Err(err)) => render_error(err),
        (OutputFormat::Json, result) => render_json(result).to_string(),
    }
}

/// JSON value for an analysis outcome.
pub fn render_json(result: &Result<Analysis, AnalysisError>) -> serde_json::Value {
    match result {
        Ok(analysis) => json!({
            "video_id": analysis.video_id,
            "results": analysis.results,
            "summary": Summary::from_results(&analysis.results),
            "skipped": analysis.skipped,
        }),
        Err(err) => json!({
            "error": err.to_string(),
            "kind": err.kind(),
        }),
    }
}

/// Parse `input` as a video id or URL, analyze it and render the outcome.
///
/// Never fails: errors are rendered in the requested format.
pub fn present<S, M>(analyzer: &mut Analyzer<S, M>, input: &str, format: OutputFormat) -> String
where
    S: TranscriptSource,
    M: SentimentModel,
{
    let result = VideoId::parse(input)
        .map_err(AnalysisError::from)
        .and_then(|video_id| analyzer.analyze(&video_id));

    if let Err(err) = &result {
        tracing::warn!(input, kind = err.kind(), error = %err, "analysis failed");
    }

    render(&result, format)
}
