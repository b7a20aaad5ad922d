//! Error types for the fightbot crate

use thiserror::Error;

/// Main error type for the fightbot crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown token '{token}' in macro '{action}'")]
    UnknownToken { action: String, token: String },

    #[error("macro '{action}' has no tokens")]
    EmptyMacro { action: String },

    #[error("action index {index} out of range (catalog has {size} entries)")]
    ActionOutOfRange { index: usize, size: usize },

    #[error("invalid player '{0}' (expected 1 or 2)")]
    InvalidPlayer(String),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("tensor data error: {0}")]
    Tensor(String),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result alias for fightbot operations
pub type Result<T> = std::result::Result<T, Error>;
