//! Sentiment model implementations.

pub mod distilbert;
