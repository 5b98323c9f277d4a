//! Analyzer and presenter behavior with in-memory collaborators.

use moodops::analyzer::{AnalysisError, Analyzer, AnalyzerConfig, OverlongPolicy};
use moodops::present::{OutputFormat, present};
use moodops_nlp::chunk::ChunkConfig;
use moodops_nlp::codec::TokenCodec;
use moodops_nlp::error::{ConfigError, Result as NlpResult};
use moodops_nlp::traits::SentimentModel;
use moodops_nlp::types::{Label, Sentiment};
use moodops_yt::FetchError;
use moodops_yt::transcript::{CaptionEntry, TranscriptSource};
use moodops_yt::video_id::VideoId;

const VIDEO: &str = "jNQXAC9IVRw";

/// Serves fixed caption lines, or fails when `lines` is `None`.
struct FakeSource {
    lines: Option<Vec<String>>,
}

impl FakeSource {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: Some(lines.iter().map(|l| l.to_string()).collect()),
        }
    }

    fn failing() -> Self {
        Self { lines: None }
    }
}

impl TranscriptSource for FakeSource {
    fn fetch(&self, video_id: &VideoId) -> moodops_yt::error::Result<Vec<CaptionEntry>> {
        match &self.lines {
            Some(lines) => Ok(lines
                .iter()
                .enumerate()
                .map(|(i, text)| CaptionEntry::new(text.as_str(), i as f32, 1.0))
                .collect()),
            None => Err(FetchError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            }),
        }
    }
}

/// One token per word, wrapped in two special tokens (ids 0 and 1).
///
/// Lines containing a negative keyword classify NEGATIVE, others POSITIVE.
#[derive(Default)]
struct KeywordModel {
    vocab: Vec<String>,
    classified: Vec<String>,
    fail_on: Option<&'static str>,
}

impl KeywordModel {
    fn id(&self, word: &str) -> Option<u32> {
        self.vocab
            .iter()
            .position(|w| w == word)
            .map(|i| i as u32 + 2)
    }
}

impl TokenCodec for KeywordModel {
    fn encode(&self, text: &str, add_special_tokens: bool) -> NlpResult<Vec<u32>> {
        let mut ids = Vec::new();
        if add_special_tokens {
            ids.push(0);
        }
        // Unknown words share id 2 + vocab.len(), decoded as "unk"
        ids.extend(
            text.split_whitespace()
                .map(|w| self.id(w).unwrap_or(self.vocab.len() as u32 + 2)),
        );
        if add_special_tokens {
            ids.push(1);
        }
        Ok(ids)
    }

    fn decode(&self, ids: &[u32]) -> NlpResult<String> {
        let words: Vec<&str> = ids
            .iter()
            .filter(|&&id| id >= 2)
            .map(|&id| {
                self.vocab
                    .get(id as usize - 2)
                    .map_or("unk", String::as_str)
            })
            .collect();
        Ok(words.join(" "))
    }
}

impl SentimentModel for KeywordModel {
    fn classify(&mut self, text: &str) -> NlpResult<Sentiment> {
        if self.fail_on.is_some_and(|word| text.contains(word)) {
            return Err(ConfigError::UnknownLabel("LABEL_7".to_string()).into());
        }

        self.classified.push(text.to_string());

        let negative = ["terrible", "awful", "bad"]
            .iter()
            .any(|word| text.contains(word));

        Ok(if negative {
            Sentiment::new(Label::Negative, 0.95)
        } else {
            Sentiment::new(Label::Positive, 0.9)
        })
    }
}

fn model_with_vocab(words: &[&str]) -> KeywordModel {
    KeywordModel {
        vocab: words.iter().map(|w| w.to_string()).collect(),
        ..Default::default()
    }
}

fn config(max_tokens: usize, overlong: OverlongPolicy) -> AnalyzerConfig {
    AnalyzerConfig {
        chunk: ChunkConfig::new(max_tokens),
        overlong,
    }
}

fn video() -> VideoId {
    VideoId::parse(VIDEO).unwrap()
}

#[test]
fn one_result_per_line_in_order() {
    let lines = ["first line", "second line", "third bad line", "fourth line"];
    let mut analyzer = Analyzer::new(
        FakeSource::new(&lines),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    assert_eq!(analysis.video_id, VIDEO);
    assert_eq!(analysis.skipped, 0);
    assert_eq!(
        analysis
            .results
            .iter()
            .map(|r| r.line.as_str())
            .collect::<Vec<_>>(),
        lines
    );
    assert_eq!(analysis.results[2].label, Label::Negative);
}

#[test]
fn reports_even_split() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["great video", "terrible content"]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let output = present(&mut analyzer, VIDEO, OutputFormat::Text);

    assert!(output.starts_with("Line: great video\nSentiment: POSITIVE (Score: 0.90)\n\n"));
    assert!(output.contains("Line: terrible content\nSentiment: NEGATIVE (Score: 0.95)\n\n"));
    assert!(output.ends_with(
        "Summary:\nPositive Responses: 1 (50.00%)\nNegative Responses: 1 (50.00%)"
    ));
}

#[test]
fn multiline_entries_split_into_lines() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["one\ntwo", "three"]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    let lines: Vec<_> = analysis.results.iter().map(|r| r.line.as_str()).collect();
    assert_eq!(lines, ["one", "two", "three"]);
}

#[test]
fn blank_lines_produce_no_results() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["good", "   ", "fine\n\nnice"]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    assert_eq!(analysis.results.len(), 3);
    assert_eq!(analysis.skipped, 0);
}

#[test]
fn skips_over_budget_lines() {
    // 6 words + 2 special tokens exceeds a budget of 5
    let lines = ["short one", "this line has far too many", "short two"];
    let mut analyzer = Analyzer::new(
        FakeSource::new(&lines),
        KeywordModel::default(),
        config(5, OverlongPolicy::Skip),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    let kept: Vec<_> = analysis.results.iter().map(|r| r.line.as_str()).collect();
    assert_eq!(kept, ["short one", "short two"]);
    assert_eq!(analysis.skipped, 1);
}

#[test]
fn chunks_over_budget_lines() {
    let words = ["this", "line", "has", "far", "too", "many", "bad", "words"];
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["ok", "this line has far too many bad words"]),
        model_with_vocab(&words),
        config(5, OverlongPolicy::Chunk),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    // Windows of 5 - 2 = 3 content tokens
    let lines: Vec<_> = analysis.results.iter().map(|r| r.line.as_str()).collect();
    assert_eq!(lines, ["ok", "this line has", "far too many", "bad words"]);
    assert_eq!(analysis.results[3].label, Label::Negative);
    assert_eq!(analysis.skipped, 0);
}

#[test]
fn default_budget_is_512_tokens() {
    // 510 + 2 special tokens fits, 511 + 2 does not
    let fits = vec!["w"; 510].join(" ");
    let too_long = vec!["w"; 511].join(" ");

    let mut analyzer = Analyzer::new(
        FakeSource::new(&[fits.as_str(), "short", too_long.as_str()]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    assert_eq!(analysis.results.len(), 2);
    assert_eq!(analysis.results[1].line, "short");
    assert_eq!(analysis.skipped, 1);
}

#[test]
fn budget_boundary_is_inclusive() {
    // 3 words + 2 special tokens == 5
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["exactly three words"]),
        KeywordModel::default(),
        config(5, OverlongPolicy::Skip),
    );

    let analysis = analyzer.analyze(&video()).unwrap();

    assert_eq!(analysis.results.len(), 1);
}

#[test]
fn empty_transcript_is_an_error() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&[]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let err = analyzer.analyze(&video()).unwrap_err();

    assert!(matches!(err, AnalysisError::EmptyTranscript { .. }));
    assert_eq!(err.kind(), "empty_transcript");
}

#[test]
fn fetch_failure_renders_error() {
    let mut analyzer = Analyzer::new(
        FakeSource::failing(),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let output = present(&mut analyzer, VIDEO, OutputFormat::Text);

    assert_eq!(
        output,
        "Error: transcripts are disabled for video jNQXAC9IVRw"
    );
}

#[test]
fn invalid_video_id_renders_error() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["never fetched"]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let output = present(&mut analyzer, "not a video", OutputFormat::Text);

    assert!(output.starts_with("Error: invalid video id"));
    assert!(analyzer.model().classified.is_empty());
}

#[test]
fn classification_failure_aborts_request() {
    let model = KeywordModel {
        fail_on: Some("broken"),
        ..Default::default()
    };
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["fine", "broken line", "never reached"]),
        model,
        AnalyzerConfig::default(),
    );

    let err = analyzer.analyze(&video()).unwrap_err();

    match err {
        AnalysisError::Classification { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(analyzer.model().classified, ["fine"]);
}

#[test]
fn renders_json_outcomes() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["great video", "terrible content"]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let output = present(&mut analyzer, VIDEO, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["video_id"], VIDEO);
    assert_eq!(value["results"][1]["label"], "NEGATIVE");
    assert_eq!(value["summary"]["positive_pct"], 50.0);
    assert_eq!(value["skipped"], 0);

    let mut failing = Analyzer::new(
        FakeSource::failing(),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    let output = present(&mut failing, VIDEO, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["kind"], "fetch");
}

#[test]
fn analyzer_is_reused_across_requests() {
    let mut analyzer = Analyzer::new(
        FakeSource::new(&["good"]),
        KeywordModel::default(),
        AnalyzerConfig::default(),
    );

    for _ in 0..3 {
        assert_eq!(analyzer.analyze(&video()).unwrap().results.len(), 1);
    }
    assert_eq!(analyzer.model().classified.len(), 3);
}
