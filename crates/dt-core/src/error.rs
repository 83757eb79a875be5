//! Error types for datathread

use thiserror::Error;

/// Main error type for datathread
#[derive(Debug, Error)]
pub enum DataThreadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Thread not found
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DataThreadError>,
    },
}

impl DataThreadError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DataThreadError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for DataThreadError {
    fn from(err: toml::de::Error) -> Self {
        DataThreadError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for DataThreadError {
    fn from(err: toml::ser::Error) -> Self {
        DataThreadError::Toml(err.to_string())
    }
}

/// Result type alias for datathread
pub type Result<T> = std::result::Result<T, DataThreadError>;
