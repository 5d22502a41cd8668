//! Error types for grant listing.

use grantlens_secrets::SecretError;
use thiserror::Error;

use crate::reconcile::Divergence;

/// Result type for grant listing.
pub type Result<T> = std::result::Result<T, GrantError>;

/// Failure of a single regional grant fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider API call failed.
    #[error("KMS API error: {0}")]
    Sdk(String),

    /// The alias does not resolve to a key in the region.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The fetcher is not set up for the request.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Create an SDK error.
    pub fn sdk(message: impl Into<String>) -> Self {
        Self::Sdk(message.into())
    }

    /// Create a key-not-found error.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound(key.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Errors surfaced by [`crate::GrantLister::list_grants`].
#[derive(Debug, Error)]
pub enum GrantError {
    /// The secret could not be resolved to its keys.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] SecretError),

    /// A regional fetch failed; the whole alias is abandoned.
    #[error("Failed to fetch grants for alias '{alias}' in {region}: {source}")]
    Fetch {
        alias: String,
        region: String,
        #[source]
        source: FetchError,
    },

    /// Regional copies of a grant disagree and divergence is fatal.
    #[error("Grant on alias '{alias}' differs between regions: {divergence}")]
    Divergent { alias: String, divergence: Divergence },
}

impl GrantError {
    /// The region whose fetch failed, if this is a fetch error.
    pub fn failed_region(&self) -> Option<&str> {
        match self {
            Self::Fetch { region, .. } => Some(region),
            _ => None,
        }
    }
}
