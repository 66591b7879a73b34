//! Error types for Aggregator operations

use thiserror::Error;

/// Errors that can occur during Aggregator operations
///
/// Analysis itself is total; only configuration and the store can fail.
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
