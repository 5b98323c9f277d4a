//! YouTube video identifiers.

use crate::error::{FetchError, Result};
use std::fmt;
use std::str::FromStr;

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

/// Validated 11-character YouTube video id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare id or extract it from a YouTube URL.
    ///
    /// Accepted URL shapes: `watch?v=ID`, `youtu.be/ID`, `shorts/ID`,
    /// `embed/ID`, `live/ID`, `v/ID`, with or without scheme and `www.`/`m.`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let candidate = if is_valid_id(input) {
            Some(input)
        } else {
            extract_from_url(input)
        };

        candidate
            .filter(|id| is_valid_id(id))
            .map(|id| Self(id.to_string()))
            .ok_or_else(|| FetchError::InvalidVideoId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page URL.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn is_valid_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn extract_from_url(input: &str) -> Option<&str> {
    let rest = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);

    let rest = rest
        .strip_prefix("www.")
        .or_else(|| rest.strip_prefix("m."))
        .or_else(|| rest.strip_prefix("music."))
        .unwrap_or(rest);

    let (host, path) = rest.split_once('/')?;

    let id = match host {
        "youtu.be" => path,
        "youtube.com" | "youtube-nocookie.com" => {
            if let Some(query) = path.strip_prefix("watch?") {
                query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("v="))?
            } else {
                ["shorts/", "embed/", "live/", "v/"]
                    .iter()
                    .find_map(|prefix| path.strip_prefix(prefix))?
            }
        }
        _ => return None,
    };

    // Drop trailing query, fragment or path segments
    id.split(['?', '&', '#', '/']).next()
}
