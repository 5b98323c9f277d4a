//! Class index → sentiment label mapping from a Hugging Face `config.json`.

use crate::error::{ConfigError, Result};
use crate::types::Label;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The subset of `config.json` needed for classification.
#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

/// Labels indexed by class id.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelMap(Vec<Label>);

impl LabelMap {
    /// SST-2 ordering: class 0 is negative, class 1 is positive.
    pub fn sst2() -> Self {
        Self(vec![Label::Negative, Label::Positive])
    }

    /// Parse `id2label` from the contents of a `config.json`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(json)
            .map_err(|e| ConfigError::InvalidModelConfig(e.to_string()))?;

        let mut entries = config
            .id2label
            .into_iter()
            .map(|(id, label)| {
                let id = id
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidLabelId(id.clone()))?;
                Ok((id, label.parse::<Label>()?))
            })
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;

        entries.sort_by_key(|(id, _)| *id);

        if let Some(gap) = entries.iter().enumerate().find(|(i, (id, _))| i != id) {
            return Err(ConfigError::InvalidLabelId(gap.1.0.to_string()).into());
        }

        Ok(Self(entries.into_iter().map(|(_, label)| label).collect()))
    }

    /// Load `id2label` from a `config.json` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidModelConfig(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn get(&self, index: usize) -> Option<Label> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
