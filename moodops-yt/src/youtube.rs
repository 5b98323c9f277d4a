//! YouTube caption retrieval over the InnerTube player API.
//!
//! 1. Load the watch page and read the InnerTube API key (accepting the cookie
//!    consent interstitial if shown).
//! 2. Ask the player endpoint for the video's caption track list.
//! 3. Download the chosen track as timedtext XML.

use crate::captions::parse_timedtext;
use crate::error::{FetchError, Result};
use crate::transcript::{CaptionEntry, CaptionTrack, TranscriptSource, select_track};
use crate::video_id::VideoId;
use regex::Regex;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use serde_json::{Value, json};
use std::sync::LazyLock;
use std::time::Duration;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT: u64 = 30;

static API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid regex")
});

static CONSENT_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="v" value="(.*?)""#).expect("valid regex"));

/// Configuration for transcript retrieval.
#[derive(clap::Args, Clone, Debug)]
pub struct FetchConfig {
    /// Preferred transcript languages, in priority order
    #[arg(long = "lang", value_name = "CODE", default_values_t = [String::from("en")])]
    pub languages: Vec<String>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT)]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            timeout_secs: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking YouTube transcript client.
#[derive(Clone, Debug)]
pub struct YoutubeTranscripts {
    client: Client,
    languages: Vec<String>,
}

impl YoutubeTranscripts {
    /// Create a client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            languages: config.languages,
        })
    }

    /// List caption tracks available for a video.
    pub fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let html = self.fetch_watch_page(video_id)?;
        let api_key = extract_api_key(&html)?;
        let player = self.fetch_player(video_id, &api_key)?;

        check_playability(video_id, &player)?;
        extract_tracks(video_id, &player)
    }

    fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String> {
        let html = self.get_watch_page(video_id, None)?;

        if let Some(consent) = consent_value(&html) {
            tracing::debug!(%video_id, "accepting cookie consent");

            let cookie = format!("CONSENT=YES+{consent}");
            let html = self.get_watch_page(video_id, Some(&cookie))?;

            if consent_value(&html).is_some() {
                return Err(FetchError::Unparsable(
                    "failed to accept cookie consent".to_string(),
                ));
            }
            return Ok(html);
        }

        Ok(html)
    }

    fn get_watch_page(&self, video_id: &VideoId, cookie: Option<&str>) -> Result<String> {
        let mut request = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id.as_str())])
            .header(ACCEPT_LANGUAGE, "en-US");

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let html = check_status(request.send()?)?.text()?;

        if html.contains(r#"class="g-recaptcha""#) {
            return Err(FetchError::TooManyRequests);
        }

        Ok(html)
    }

    fn fetch_player(&self, video_id: &VideoId, api_key: &str) -> Result<Value> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": video_id.as_str(),
        });

        let response = self
            .client
            .post(PLAYER_URL)
            .query(&[("key", api_key)])
            .header(ACCEPT_LANGUAGE, "en-US")
            .json(&body)
            .send()?;

        Ok(check_status(response)?.json()?)
    }

    fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        let url = track.base_url.replace("&fmt=srv3", "");

        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()?;

        parse_timedtext(&check_status(response)?.text()?)
    }
}

impl TranscriptSource for YoutubeTranscripts {
    fn fetch(&self, video_id: &VideoId) -> Result<Vec<CaptionEntry>> {
        tracing::info!(%video_id, "fetching transcript");

        let tracks = self.list_tracks(video_id)?;
        let track = select_track(video_id, &tracks, &self.languages)?;

        tracing::debug!(
            %video_id,
            language = %track.language_code,
            generated = track.generated,
            "selected caption track"
        );

        let entries = self.fetch_track(track)?;

        tracing::info!(%video_id, entries = entries.len(), "transcript fetched");

        Ok(entries)
    }
}

fn check_status(response: Response) -> Result<Response> {
    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::TooManyRequests);
    }
    Ok(response.error_for_status()?)
}

/// Read the InnerTube API key embedded in the watch page.
pub fn extract_api_key(html: &str) -> Result<String> {
    API_KEY
        .captures(html)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| FetchError::Unparsable("INNERTUBE_API_KEY not found".to_string()))
}

/// Value of the consent form when YouTube shows the cookie interstitial.
pub fn consent_value(html: &str) -> Option<String> {
    if !html.contains(r#"action="https://consent.youtube.com/s""#) {
        return None;
    }
    CONSENT_VALUE.captures(html).map(|caps| caps[1].to_string())
}

/// Map the player response's playability status to an error.
pub fn check_playability(video_id: &VideoId, player: &Value) -> Result<()> {
    let status = &player["playabilityStatus"];
    let state = status["status"].as_str().unwrap_or("OK");

    if state == "OK" {
        return Ok(());
    }

    let reason = status["reason"].as_str().unwrap_or_default().to_string();
    let video_id = video_id.to_string();

    tracing::debug!(%video_id, state, %reason, "video not playable");

    let err = match state {
        "LOGIN_REQUIRED" if reason.contains("not a bot") => FetchError::RequestBlocked { video_id },
        "LOGIN_REQUIRED" | "AGE_CHECK_REQUIRED" if reason.contains("age") => {
            FetchError::AgeRestricted { video_id }
        }
        "ERROR" if reason.contains("unavailable") => FetchError::VideoUnavailable { video_id },
        _ if reason.is_empty() => FetchError::VideoUnplayable {
            video_id,
            reason: state.to_string(),
        },
        _ => FetchError::VideoUnplayable { video_id, reason },
    };

    Err(err)
}

/// List caption tracks from the player response.
pub fn extract_tracks(video_id: &VideoId, player: &Value) -> Result<Vec<CaptionTrack>> {
    let tracks = player["captions"]["playerCaptionsTracklistRenderer"]["captionTracks"]
        .as_array()
        .ok_or_else(|| FetchError::TranscriptsDisabled {
            video_id: video_id.to_string(),
        })?;

    tracks
        .iter()
        .map(|track| {
            let base_url = track["baseUrl"]
                .as_str()
                .ok_or_else(|| FetchError::Unparsable("caption track without baseUrl".into()))?;

            let language_code = track["languageCode"].as_str().unwrap_or_default();

            let language = track["name"]["runs"][0]["text"]
                .as_str()
                .or_else(|| track["name"]["simpleText"].as_str())
                .unwrap_or(language_code);

            Ok(CaptionTrack {
                language_code: language_code.to_string(),
                language: language.to_string(),
                generated: track["kind"].as_str() == Some("asr"),
                base_url: base_url.to_string(),
            })
        })
        .collect()
}
