//! Secret store backends.
//!
//! Defines the [`SecretStore`] trait and provides [`FileSecretStore`], which
//! reads a YAML document mapping each secret name to its encrypted values.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, SecretError};
use crate::values::SecretValues;

/// Top-level keys with this prefix hold store metadata, not secrets.
const RESERVED_PREFIX: char = '_';

/// Async trait for secret storage backends.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Get every stored value for a secret.
    async fn get(&self, name: &str) -> Result<SecretValues>;

    /// List secret names in sorted order.
    async fn names(&self) -> Result<Vec<String>>;
}

/// A secret store backed by a single YAML file.
///
/// ```yaml
/// database_password:
///   - key_id: arn:aws:kms:us-east-1:123456789012:alias/app
///     key_manager: kms
///     algorithm: secretbox
///     key_ciphertext: ...
///     ciphertext: ...
/// ```
///
/// The file is re-read on every call.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Create a store reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_document(&self) -> Result<BTreeMap<String, serde_yaml::Value>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SecretError::StoreNotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get(&self, name: &str) -> Result<SecretValues> {
        if is_reserved(name) {
            return Err(SecretError::NotFound(name.to_string()));
        }

        let mut document = self.read_document().await?;
        let raw = document
            .remove(name)
            .ok_or_else(|| SecretError::NotFound(name.to_string()))?;
        let values: SecretValues = serde_yaml::from_value(raw)?;

        debug!(name, path = %self.path.display(), count = values.len(), "read secret values");
        Ok(values)
    }

    async fn names(&self) -> Result<Vec<String>> {
        let document = self.read_document().await?;
        // BTreeMap keys are already sorted
        Ok(document.into_keys().filter(|n| !is_reserved(n)).collect())
    }
}
