//! Error types for the EBS volume mapper
//!
//! The mapping itself is total over well-typed options; errors only arise
//! while loading an options mapping from text, files, or loose values.

use thiserror::Error;

/// Unified error type for the mapper
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if retrying the same operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type alias for the mapper
pub type Result<T> = std::result::Result<T, Error>;
