//! Secret store lookup for grantlens.
//!
//! Reads the encrypted-secret store, keeps the values protected by KMS, and
//! resolves them to the multi-region aliases (and the regions each alias
//! spans) whose grants govern access to the secret.

pub mod arn;
pub mod error;
pub mod lookup;
pub mod store;
pub mod values;

pub use arn::KmsAliasArn;
pub use error::{Result, SecretError};
pub use lookup::{resolve_aliases_and_regions, AliasRegions, KeyLookup, StoreKeyLookup};
pub use store::{FileSecretStore, SecretStore};
pub use values::{SecretValue, SecretValues, KMS_LABEL};
