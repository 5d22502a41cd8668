//! Encrypted values as recorded in the secret store.

use serde::{Deserialize, Serialize};

/// Key manager label for values protected by AWS KMS.
pub const KMS_LABEL: &str = "kms";

/// One encrypted copy of a secret.
///
/// A secret may be stored several times, once per key that protects it.
/// Only the key metadata matters here; ciphertexts are carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretValue {
    /// Key identifier. For KMS this is the alias ARN.
    #[serde(default)]
    pub key_id: String,

    /// Key manager that owns `key_id` (e.g. "kms").
    #[serde(default)]
    pub key_manager: String,

    /// Data encryption algorithm.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub algorithm: String,

    /// Data key, encrypted under `key_id`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_ciphertext: String,

    /// Secret payload, encrypted under the data key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ciphertext: String,
}

impl SecretValue {
    /// Create a value protected by `key_id` under `key_manager`.
    pub fn new(key_id: impl Into<String>, key_manager: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_manager: key_manager.into(),
            ..Default::default()
        }
    }
}

/// All stored values for one secret name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValues(Vec<SecretValue>);

impl SecretValues {
    /// Wrap a list of values.
    pub fn new(values: Vec<SecretValue>) -> Self {
        Self(values)
    }

    /// Keep only the values owned by the given key manager.
    pub fn filter_by_key_manager(self, label: &str) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|v| v.key_manager == label)
                .collect(),
        )
    }

    /// Iterate the values.
    pub fn iter(&self) -> std::slice::Iter<'_, SecretValue> {
        self.0.iter()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SecretValue>> for SecretValues {
    fn from(values: Vec<SecretValue>) -> Self {
        Self(values)
    }
}

impl<'a> IntoIterator for &'a SecretValues {
    type Item = &'a SecretValue;
    type IntoIter = std::slice::Iter<'a, SecretValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
