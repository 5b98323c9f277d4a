//! DistilBERT sequence-classification model (SST-2 sentiment).

pub mod core;
pub mod inference;
pub mod labels;

pub use self::core::{DEFAULT_MODEL_ID, DistilBertClassifier, MODEL_CANDIDATES};
