//! Sentiment analysis of YouTube caption transcripts.
//!
//! Each caption line is classified POSITIVE or NEGATIVE by a DistilBERT
//! model and the results are summarized as percentages. The `mood` binary
//! exposes this as a command (`mood analyze`) and as a small web form
//! (`mood serve`).

pub mod analyze;
pub mod analyzer;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod present;
pub mod serve;
pub mod web;
