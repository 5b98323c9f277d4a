//! moodops-nlp: token-bounded chunking and sentiment classification.
//!
//! # Architecture
//!
//! The library is built around two traits:
//!
//! - [`codec::TokenCodec`]: Converts text to token ids and back
//! - [`traits::SentimentModel`]: Classifies a piece of text as positive or negative
//!
//! [`models::distilbert::DistilBertClassifier`] implements both on top of an ONNX
//! export of DistilBERT fine-tuned on SST-2.
//!
//! # Quick Start
//!
//! ```ignore
//! use hf_hub::api::sync::Api;
//! use moodops_nlp::models::distilbert::{DEFAULT_MODEL_ID, DistilBertClassifier};
//! use moodops_nlp::traits::SentimentModel;
//! use moodops_nlp::types::ModelRepo;
//! use ort::session::Session;
//!
//! let repo = ModelRepo::Api(Api::new()?.model(DEFAULT_MODEL_ID.to_string()));
//! let mut classifier = DistilBertClassifier::from_repo(&repo, Session::builder()?)?;
//!
//! let sentiment = classifier.classify("great video")?;
//! println!("{} ({:.2})", sentiment.label, sentiment.score);
//! ```

pub mod chunk;
pub mod codec;
pub mod error;
pub mod models;
pub mod traits;
pub mod types;
