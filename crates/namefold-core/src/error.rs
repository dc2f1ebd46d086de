//! Error types for namefold-core

use thiserror::Error;

/// Result type alias for namefold operations
pub type Result<T> = std::result::Result<T, NamefoldError>;

/// Main error type for namefold operations
#[derive(Error, Debug)]
pub enum NamefoldError {
    /// A threshold, cutoff or limit is outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input cannot produce a meaningful result (e.g. no candidates)
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Dataset loading errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Errors raised at the dataset boundary
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
}

impl From<toml::de::Error> for NamefoldError {
    fn from(err: toml::de::Error) -> Self {
        NamefoldError::InvalidConfiguration(err.to_string())
    }
}

impl From<serde_json::Error> for NamefoldError {
    fn from(err: serde_json::Error) -> Self {
        NamefoldError::InvalidConfiguration(err.to_string())
    }
}

/// Check that a 0-100 score bound is in range
pub(crate) fn check_score_bound(name: &str, value: u8) -> Result<()> {
    if value > 100 {
        return Err(NamefoldError::InvalidConfiguration(format!(
            "{} must be between 0 and 100, got {}",
            name, value
        )));
    }
    Ok(())
}
