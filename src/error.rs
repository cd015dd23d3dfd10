//! Error types for MochaDB

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MochaError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Out of range: {0}")]
    Range(String),

    #[error("Command error: {0}")]
    Command(String),

    #[error("Naming error: {0}")]
    Naming(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MochaError {
    /// The generic malformed-command failure
    pub fn invalid_query() -> Self {
        MochaError::Command("invalid query".to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MochaError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, MochaError>;
