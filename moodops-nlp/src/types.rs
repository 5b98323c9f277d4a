//! Core types for moodops-nlp

use crate::error::ConfigError;
use eyre::{OptionExt, Result, WrapErr};
use hf_hub::CacheRepo;
use hf_hub::api::sync::ApiRepo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Binary sentiment label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POSITIVE" | "POS" => Ok(Label::Positive),
            "NEGATIVE" | "NEG" => Ok(Label::Negative),
            _ => Err(ConfigError::UnknownLabel(s.to_string())),
        }
    }
}

/// Classifier output for one piece of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sentiment {
    pub label: Label,
    /// Confidence of `label`, in `[0, 1]`
    pub score: f32,
}

impl Sentiment {
    pub fn new(label: Label, score: f32) -> Self {
        Self { label, score }
    }
}

/// Model repository sources.
#[derive(Debug)]
pub enum ModelRepo {
    /// Local filesystem path
    Path(PathBuf),
    /// HuggingFace cache repository
    Cache(CacheRepo),
    /// HuggingFace API repository
    Api(ApiRepo),
}

impl ModelRepo {
    /// Resolve a file name to its full path in this repository.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf> {
        match self {
            ModelRepo::Path(path) => path
                .join(file_name)
                .canonicalize()
                .wrap_err_with(|| ConfigError::ModelNotFound(file_name.to_string())),
            ModelRepo::Cache(cache_repo) => cache_repo
                .get(file_name)
                .ok_or_eyre(format!("model not found in cache: {file_name}")),
            ModelRepo::Api(api_repo) => api_repo
                .get(file_name)
                .wrap_err(format!("failed to download from api: {file_name}")),
        }
    }

    /// Try resolving multiple file names, return first successful match.
    pub fn resolve_any(&self, candidates: &[&str]) -> Result<PathBuf> {
        candidates
            .iter()
            .find_map(|name| self.resolve(name).ok())
            .ok_or_eyre(format!("no model found from candidates: {candidates:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("POSITIVE".parse::<Label>().unwrap(), Label::Positive);
        assert_eq!("negative".parse::<Label>().unwrap(), Label::Negative);
        assert!("NEUTRAL".parse::<Label>().is_err());
    }

    #[test]
    fn label_round_trips_through_display() {
        for label in [Label::Positive, Label::Negative] {
            assert_eq!(label.to_string().parse::<Label>().unwrap(), label);
        }
    }

    #[test]
    fn label_serializes_upper_case() {
        let json = serde_json::to_string(&Label::Negative).unwrap();
        assert_eq!(json, "\"NEGATIVE\"");
    }

    #[test]
    fn path_repo_reports_missing_file() {
        let repo = ModelRepo::Path(std::env::temp_dir());
        let err = repo.resolve("moodops-missing-model.onnx").unwrap_err();
        assert!(err.to_string().contains("moodops-missing-model.onnx"));
    }

    #[test]
    fn resolve_any_picks_first_existing() {
        let dir = std::env::temp_dir().join("moodops-nlp-resolve-any");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("b.onnx"), b"").unwrap();

        let repo = ModelRepo::Path(dir.clone());
        let path = repo.resolve_any(&["a.onnx", "b.onnx"]).unwrap();

        assert!(path.ends_with("b.onnx"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
