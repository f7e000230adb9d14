use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning raw selections into a feature vector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
}

/// Errors that can occur while loading the model artifact
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model file is corrupt: {0}")]
    Corrupt(#[from] rmp_serde::decode::Error),

    #[error("Model does not match its feature columns: {0}")]
    Incompatible(String),

    #[error("Failed to write model file: {0}")]
    Write(#[from] rmp_serde::encode::Error),
}

/// Errors a classifier may raise during inference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    #[error("Feature names mismatch: model expects {expected:?}, got {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Expected {expected} features per row, got {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("{0}")]
    Internal(String),
}

/// Failure half of the predictor's tagged result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionFailure {
    #[error(transparent)]
    Classifier(#[from] PredictError),

    #[error("Classifier returned no prediction")]
    EmptyOutput,
}

/// Errors that make the accident dataset unusable for insights
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset contains no rows")]
    Empty,
}

/// Errors that can occur during configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value: {0}")]
    Validation(String),
}
