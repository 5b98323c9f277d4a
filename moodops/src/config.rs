//! Configuration types for resolved CLI arguments.
//!
//! This module contains Config structs and their TryFrom implementations,
//! plus model loading shared by the subcommands.
//! Args structs (for CLI parsing) remain in cli.rs.

use crate::cli::{ModelArgs, ModelSource};
use eyre::{Result, WrapErr, eyre};
use hf_hub::Cache;
use hf_hub::api::sync::Api;
use moodops_nlp::models::distilbert::DistilBertClassifier;
use moodops_nlp::types::ModelRepo;
#[allow(unused_imports)]
use ort::execution_providers::*;
use ort::session::Session;
use ort::session::builder::SessionBuilder;
use std::path::PathBuf;
use std::time::Instant;
use tokenizers::Tokenizer;

/// Resolved model configuration.
///
/// Converted from ModelArgs via TryFrom.
/// Contains the ModelRepo enum ready for use.
#[derive(Debug)]
pub struct ModelConfig {
    pub repo: ModelRepo,
}

impl TryFrom<ModelArgs> for ModelConfig {
    type Error = eyre::Error;

    fn try_from(args: ModelArgs) -> Result<Self> {
        let repo = match args.model_source {
            ModelSource::Auto => {
                let path = PathBuf::from(&args.model_id);
                if path.is_dir() {
                    ModelRepo::Path(path)
                } else {
                    let api = Api::new()?;
                    ModelRepo::Api(api.model(args.model_id))
                }
            }
            ModelSource::Path => ModelRepo::Path(PathBuf::from(args.model_id)),
            ModelSource::Cache => ModelRepo::Cache(Cache::from_env().model(args.model_id)),
            ModelSource::Api => ModelRepo::Api(Api::new()?.model(args.model_id)),
        };

        Ok(Self { repo })
    }
}

/// Load the classifier once, logging how long it took.
pub fn load_classifier(config: &ModelConfig) -> Result<DistilBertClassifier> {
    tracing::info!("loading model");

    let s = Instant::now();

    let classifier = DistilBertClassifier::from_repo(&config.repo, session_builder()?)?;

    let d = s.elapsed();
    tracing::info!(duration = %format_secs(d.as_secs_f32()), "model loaded");

    Ok(classifier)
}

/// Load only the tokenizer of the configured model.
pub fn load_tokenizer(config: &ModelConfig) -> Result<Tokenizer> {
    let path = config.repo.resolve("tokenizer.json")?;

    let mut tokenizer = Tokenizer::from_file(&path)
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("failed to load tokenizer from {}", path.display()))?;

    tokenizer
        .with_truncation(None)
        .map_err(|e| eyre!(e))
        .wrap_err("failed to disable tokenizer truncation")?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}

/// Build session builder with execution providers configured by Cargo features.
///
/// Providers are tried in order; the first available one is used and CPU is
/// always available as fallback.
///
/// # Execution Providers
///
/// Enabled via Cargo features:
/// - `cuda` - NVIDIA CUDA
/// - `tensorrt` - NVIDIA TensorRT
/// - `openvino` - Intel OpenVINO
/// - `directml` - DirectML (Windows)
/// - `coreml` - CoreML (macOS)
pub fn session_builder() -> Result<SessionBuilder> {
    let builder = Session::builder()?.with_execution_providers([
        #[cfg(feature = "cuda")]
        CUDAExecutionProvider::default().build(),
        #[cfg(feature = "tensorrt")]
        TensorRTExecutionProvider::default().build(),
        #[cfg(feature = "openvino")]
        OpenVINOExecutionProvider::default()
            .with_device_type("HETERO:GPU,CPU")
            .with_cache_dir(".cache/ort")
            .build(),
        #[cfg(feature = "directml")]
        DirectMLExecutionProvider::default().build(),
        #[cfg(feature = "coreml")]
        CoreMLExecutionProvider::default().build(),
    ])?;

    Ok(builder)
}

/// Format seconds as a string with two decimal places.
pub fn format_secs(secs: f32) -> String {
    format!("{:.2}s", secs)
}
