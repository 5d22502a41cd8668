//! Error types for secret lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a secret to its keys.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Secret store not found: {0}")]
    StoreNotFound(PathBuf),

    #[error("Invalid key id '{key_id}': {reason}")]
    InvalidKeyId { key_id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SecretError {
    /// Create an invalid key id error.
    pub fn invalid_key_id(key_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyId {
            key_id: key_id.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience result alias for secret lookup.
pub type Result<T> = std::result::Result<T, SecretError>;
