//! Transcript fetch integration tests.
//!
//! Tests: track listing, transcript download and parsing, error mapping for
//! videos without captions.
//!
//! Uses "Me at the zoo" (jNQXAC9IVRw) - short, stable, English captions.

use eyre::{Context, Result};
use moodops_yt::FetchError;
use moodops_yt::transcript::{CaptionEntry, TranscriptSource};
use moodops_yt::video_id::VideoId;
use moodops_yt::youtube::{FetchConfig, YoutubeTranscripts};
use std::sync::LazyLock;

const TEST_URL: &str = "https://youtu.be/jNQXAC9IVRw";

static TRANSCRIPT: LazyLock<Result<Vec<CaptionEntry>>> = LazyLock::new(|| {
    let source = YoutubeTranscripts::new(FetchConfig::default())?;
    let video_id = VideoId::parse(TEST_URL)?;

    source
        .fetch(&video_id)
        .wrap_err("transcript fetch failed")
});

#[track_caller]
fn transcript() -> &'static [CaptionEntry] {
    TRANSCRIPT.as_ref().expect("fetch failed")
}

#[test]
#[ignore = "network I/O"]
fn fetches_non_empty_transcript() {
    let entries = transcript();

    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| !e.text.trim().is_empty()));
}

#[test]
#[ignore = "network I/O"]
fn entries_are_in_time_order() {
    let entries = transcript();

    assert!(entries.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
#[ignore = "network I/O"]
fn mentions_elephants() {
    let text = transcript()
        .iter()
        .map(|e| e.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    assert!(text.contains("elephant"), "unexpected transcript: {text}");
}

#[test]
#[ignore = "network I/O"]
fn unknown_language_lists_available_tracks() {
    let config = FetchConfig {
        languages: vec!["xx".to_string()],
        ..FetchConfig::default()
    };
    let source = YoutubeTranscripts::new(config).unwrap();
    let video_id = VideoId::parse(TEST_URL).unwrap();

    match source.fetch(&video_id) {
        Err(FetchError::NoTranscriptFound { available, .. }) => {
            assert!(available.iter().any(|l| l.starts_with("en")));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
