//! Error types for moodops-nlp organized by processing stage.

use ndarray::ShapeError;
use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

/// Sentiment pipeline error variants organized by processing stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration stage error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Model inference stage error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Tokenizer error
    #[error("tokenizer error: {0}")]
    Tokenizers(tokenizers::Error),
}

/// Configuration errors (chunking, model loading, label mapping).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Window size of zero tokens
    #[error("invalid max tokens: {0} (minimum 1)")]
    InvalidMaxTokens(usize),

    /// Label in model config is neither POSITIVE nor NEGATIVE
    #[error("unknown sentiment label: {0:?}")]
    UnknownLabel(String),

    /// Label id in model config is not an integer
    #[error("invalid label id: {0:?}")]
    InvalidLabelId(String),

    /// Model config could not be read or parsed
    #[error("invalid model config: {0}")]
    InvalidModelConfig(String),

    /// Model file not found
    #[error("model file not found: {0}")]
    ModelNotFound(String),
}

/// Model inference errors (ONNX, ndarray operations).
#[derive(Debug, Error)]
pub enum ModelError {
    /// Missing expected output tensor
    #[error("missing model output: {name}")]
    MissingOutput { name: String },

    /// Predicted class has no label in the model config
    #[error("class index {index} has no label (model has {labels} labels)")]
    UnlabeledClass { index: usize, labels: usize },

    /// ONNX Runtime error
    #[error(transparent)]
    Ort(#[from] ort::Error),

    /// ndarray shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// ndarray-stats min/max error
    #[error(transparent)]
    MinMax(#[from] MinMaxError),
}

/// Result type alias for moodops-nlp operations.
pub type Result<T> = std::result::Result<T, Error>;

// Nested From implementations for automatic error conversion chains

// tokenizers::Error → Error
impl From<tokenizers::Error> for Error {
    fn from(e: tokenizers::Error) -> Self {
        Error::Tokenizers(e)
    }
}

// ort::Error → ModelError → Error
impl From<ort::Error> for Error {
    fn from(e: ort::Error) -> Self {
        Error::Model(ModelError::Ort(e))
    }
}

// ShapeError → ModelError → Error
impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Error::Model(ModelError::Shape(e))
    }
}

// MinMaxError → ModelError → Error
impl From<MinMaxError> for Error {
    fn from(e: MinMaxError) -> Self {
        Error::Model(ModelError::MinMax(e))
    }
}
