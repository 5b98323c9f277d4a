//! Transcript types and the source trait.

use crate::error::{FetchError, Result};
use crate::video_id::VideoId;
use serde::Serialize;

/// One timed caption segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaptionEntry {
    /// Display text
    pub text: String,
    /// Start time in seconds
    pub start: f32,
    /// Duration in seconds
    pub duration: f32,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>, start: f32, duration: f32) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// A caption track listed for a video.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionTrack {
    /// Language code, e.g. `en` or `pt-BR`
    pub language_code: String,
    /// Human readable language name
    pub language: String,
    /// Whether the track was generated by speech recognition
    pub generated: bool,
    /// Timedtext URL for this track
    pub base_url: String,
}

/// Anything that can produce the caption entries of a video.
pub trait TranscriptSource {
    /// Fetch the ordered caption entries of a video.
    fn fetch(&self, video_id: &VideoId) -> Result<Vec<CaptionEntry>>;
}

impl<S: TranscriptSource + ?Sized> TranscriptSource for &S {
    fn fetch(&self, video_id: &VideoId) -> Result<Vec<CaptionEntry>> {
        (**self).fetch(video_id)
    }
}

/// Pick the track for the first preferred language that has one.
///
/// Within a language, a manually created track wins over a generated one.
pub fn select_track<'a>(
    video_id: &VideoId,
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Result<&'a CaptionTrack> {
    let find = |code: &str, generated: bool| {
        tracks
            .iter()
            .find(|t| t.language_code == code && t.generated == generated)
    };

    languages
        .iter()
        .find_map(|code| find(code.as_str(), false).or_else(|| find(code.as_str(), true)))
        .ok_or_else(|| FetchError::NoTranscriptFound {
            video_id: video_id.to_string(),
            requested: languages.to_vec(),
            available: tracks
                .iter()
                .map(|t| {
                    if t.generated {
                        format!("{} (generated)", t.language_code)
                    } else {
                        t.language_code.clone()
                    }
                })
                .collect(),
        })
}
