//! Transcript retrieval errors.

use thiserror::Error;

/// Why a transcript could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Input is neither an 11-character video id nor a recognized YouTube URL
    #[error("invalid video id: {0:?}")]
    InvalidVideoId(String),

    /// Video does not exist or was removed
    #[error("video {video_id} is unavailable")]
    VideoUnavailable { video_id: String },

    /// Video exists but cannot be played
    #[error("video {video_id} is unplayable: {reason}")]
    VideoUnplayable { video_id: String, reason: String },

    /// Video requires signing in to confirm age
    #[error("video {video_id} is age restricted")]
    AgeRestricted { video_id: String },

    /// YouTube asked to confirm the client is not a bot
    #[error("request for video {video_id} was blocked by YouTube")]
    RequestBlocked { video_id: String },

    /// HTTP 429 or a reCAPTCHA challenge
    #[error("too many requests to YouTube")]
    TooManyRequests,

    /// Video has no caption tracks at all
    #[error("transcripts are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    /// Caption tracks exist but none match the requested languages
    #[error(
        "no transcript found for video {video_id} in languages {requested:?} (available: {available:?})"
    )]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },

    /// Response did not have the expected shape
    #[error("could not parse YouTube response: {0}")]
    Unparsable(String),

    /// Transport or HTTP status error
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Result type alias for moodops-yt operations.
pub type Result<T> = std::result::Result<T, FetchError>;
