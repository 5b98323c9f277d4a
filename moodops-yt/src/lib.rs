//! moodops-yt: YouTube caption transcripts.
//!
//! ## Modules
//!
//! - [`video_id`] - Video id parsing from bare ids and URLs
//! - [`transcript`] - Caption types and the [`transcript::TranscriptSource`] trait
//! - [`youtube`] - Blocking client for the InnerTube player API
//! - [`captions`] - Timedtext XML parsing
//!
//! ## Quick Start
//!
//! ```no_run
//! use moodops_yt::transcript::TranscriptSource;
//! use moodops_yt::video_id::VideoId;
//! use moodops_yt::youtube::{FetchConfig, YoutubeTranscripts};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = YoutubeTranscripts::new(FetchConfig::default())?;
//! let video_id = VideoId::parse("https://youtu.be/jNQXAC9IVRw")?;
//!
//! for entry in source.fetch(&video_id)? {
//!     println!("[{:.2}s] {}", entry.start, entry.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod captions;
pub mod error;
pub mod transcript;
pub mod video_id;
pub mod youtube;

pub use error::FetchError;
