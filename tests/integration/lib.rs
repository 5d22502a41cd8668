//! Shared fixtures for grantlens integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use grantlens_core::Grant;
use grantlens_kms::{GrantLister, ListOptions, StaticGrantFetcher};
use grantlens_secrets::{FileSecretStore, StoreKeyLookup};
use tempfile::TempDir;

/// Account used in every fixture ARN.
pub const ACCOUNT: &str = "123456789012";

/// A store entry protected by `alias` in each of `regions`.
pub fn kms_entry(alias: &str, regions: &[&str]) -> String {
    regions
        .iter()
        .map(|region| {
            format!(
                "  - key_id: arn:aws:kms:{region}:{ACCOUNT}:alias/{alias}\n    key_manager: kms\n    ciphertext: c2VjcmV0\n"
            )
        })
        .collect()
}

/// Write a secret store file into a fresh temp directory.
pub fn write_store(content: &str) -> (PathBuf, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("secrets.yml");
    std::fs::write(&path, content).expect("write store");
    (path, dir)
}

/// A grant for role `x` authorizing Decrypt.
pub fn decrypt_grant(name: &str, id: &str) -> Grant {
    Grant::new(name, id, format!("arn:aws:iam::{ACCOUNT}:role/x")).with_operations(["Decrypt"])
}

/// A lister reading `store` and serving grants from `fetcher`.
pub fn lister(store: PathBuf, fetcher: Arc<StaticGrantFetcher>, options: ListOptions) -> GrantLister {
    GrantLister::new(
        Arc::new(StoreKeyLookup::new(FileSecretStore::new(store))),
        fetcher,
        options,
    )
}
