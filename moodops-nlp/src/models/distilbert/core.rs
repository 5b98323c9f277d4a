//! Core DistilBERT classifier definition and loading.

use crate::codec::TokenCodec;
use crate::error::Result as NlpResult;
use crate::models::distilbert::labels::LabelMap;
use crate::types::ModelRepo;
use eyre::{Result, WrapErr, eyre};
use ort::session::Session;
use ort::session::builder::SessionBuilder;
use tokenizers::Tokenizer;

/// Hugging Face repository with an ONNX export of DistilBERT fine-tuned on SST-2.
pub const DEFAULT_MODEL_ID: &str = "Xenova/distilbert-base-uncased-finetuned-sst-2-english";

/// ONNX model file candidates, in priority order.
pub const MODEL_CANDIDATES: &[&str] = &[
    "onnx/model.onnx",
    "model.onnx",
    "onnx/model_quantized.onnx",
];

/// DistilBERT sequence classifier.
///
/// Owns the ONNX session, the matching tokenizer and the class labels. Built
/// once at startup and reused for every request.
pub struct DistilBertClassifier {
    pub session: Session,
    pub tokenizer: Tokenizer,
    pub labels: LabelMap,
}

impl DistilBertClassifier {
    /// Create a classifier from already loaded parts.
    ///
    /// Truncation and padding are switched off so that token counts reflect
    /// the full input.
    pub fn new(session: Session, mut tokenizer: Tokenizer, labels: LabelMap) -> Result<Self> {
        tokenizer
            .with_truncation(None)
            .map_err(|e| eyre!(e))
            .wrap_err("failed to disable tokenizer truncation")?;
        tokenizer.with_padding(None);

        Ok(Self {
            session,
            tokenizer,
            labels,
        })
    }

    /// Load classifier from a model repository.
    ///
    /// # Arguments
    ///
    /// * `repo` - Model repository (local path, HF cache, or HF API)
    /// * `session_builder` - ONNX session builder for configuring execution providers
    pub fn from_repo(repo: &ModelRepo, session_builder: SessionBuilder) -> Result<Self> {
        let model_path = repo.resolve_any(MODEL_CANDIDATES)?;
        let tokenizer_path = repo.resolve("tokenizer.json")?;
        let config_path = repo.resolve("config.json")?;

        tracing::debug!(
            model = %model_path.display(),
            tokenizer = %tokenizer_path.display(),
            "resolved model files"
        );

        let session = session_builder
            .commit_from_file(&model_path)
            .wrap_err("failed to load classifier session")?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| eyre!(e))
            .wrap_err_with(|| {
                format!("failed to load tokenizer from {}", tokenizer_path.display())
            })?;

        let labels = LabelMap::from_file(&config_path).wrap_err("failed to load label map")?;

        tracing::debug!(labels = labels.len(), "loaded label map");

        Self::new(session, tokenizer, labels)
    }
}

impl TokenCodec for DistilBertClassifier {
    fn encode(&self, text: &str, add_special_tokens: bool) -> NlpResult<Vec<u32>> {
        TokenCodec::encode(&self.tokenizer, text, add_special_tokens)
    }

    fn decode(&self, ids: &[u32]) -> NlpResult<String> {
        TokenCodec::decode(&self.tokenizer, ids)
    }
}
