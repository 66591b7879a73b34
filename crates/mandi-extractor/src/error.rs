//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building an extractor
///
/// Detection itself never fails; these surface once, when the rule table
/// is compiled.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A rule pattern is not a valid regular expression
    #[error("Invalid pattern '{0}': {1}")]
    InvalidPattern(String, String),

    /// A rule pattern lacks the capture group its tier reads from
    #[error("Pattern '{0}' has no '{1}' capture group")]
    MissingGroup(String, &'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

