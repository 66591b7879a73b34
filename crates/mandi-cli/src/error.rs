//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] mandi_store::StoreError),

    /// Extractor could not be built
    #[error("Extractor error: {0}")]
    Extractor(#[from] mandi_extractor::ExtractorError),

    /// Aggregation pass failed
    #[error("Aggregator error: {0}")]
    Aggregator(#[from] mandi_aggregator::AggregatorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced post or supplier does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
